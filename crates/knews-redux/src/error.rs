use thiserror::Error;

/// Errors reported by the store and its dispatchers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The owning scope was cancelled; no further actions are accepted
    #[error("store is closed, its scope has been cancelled")]
    Closed,

    /// The action buffer is full and the overflow policy does not evict
    #[error("action buffer is full")]
    BufferFull,

    /// A routed store was built without a reducer for this action kind
    #[error("no reducer registered for action kind {kind}")]
    MissingReducer { kind: String },
}
