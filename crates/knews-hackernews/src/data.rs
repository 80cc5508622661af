//! Four-state wrapper around an asynchronous fetch
//!
//! `Loading` keeps the last known value so a refresh can keep showing it
//! instead of a blank screen.

/// Outcome of a fetch as seen by the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Data<V, E> {
    /// Nothing requested yet
    Initial,
    /// A fetch is in flight; carries the previous value, if any
    Loading(Option<V>),
    Success(V),
    Failure(E),
}

impl<V, E> Default for Data<V, E> {
    fn default() -> Self {
        Data::Initial
    }
}

impl<V, E> Data<V, E> {
    pub fn is_initial(&self) -> bool {
        matches!(self, Data::Initial)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Data::Loading(_))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Data::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Data::Failure(_))
    }

    /// `Success` or `Failure`
    pub fn is_complete(&self) -> bool {
        self.is_success() || self.is_failure()
    }

    /// `Initial` or `Loading`
    pub fn is_incomplete(&self) -> bool {
        !self.is_complete()
    }

    /// The successful value, or the previous one while loading
    pub fn value(&self) -> Option<&V> {
        match self {
            Data::Loading(previous) => previous.as_ref(),
            Data::Success(value) => Some(value),
            Data::Initial | Data::Failure(_) => None,
        }
    }

    pub fn into_value(self) -> Option<V> {
        match self {
            Data::Loading(previous) => previous,
            Data::Success(value) => Some(value),
            Data::Initial | Data::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            Data::Failure(error) => Some(error),
            _ => None,
        }
    }

    /// Transform the carried value, keeping the variant
    pub fn map<U, F>(self, transform: F) -> Data<U, E>
    where
        F: FnOnce(V) -> U,
    {
        match self {
            Data::Initial => Data::Initial,
            Data::Loading(previous) => Data::Loading(previous.map(transform)),
            Data::Success(value) => Data::Success(transform(value)),
            Data::Failure(error) => Data::Failure(error),
        }
    }

    pub fn map_error<EE, F>(self, transform: F) -> Data<V, EE>
    where
        F: FnOnce(E) -> EE,
    {
        match self {
            Data::Initial => Data::Initial,
            Data::Loading(previous) => Data::Loading(previous),
            Data::Success(value) => Data::Success(value),
            Data::Failure(error) => Data::Failure(transform(error)),
        }
    }
}

impl<V, E> From<Result<V, E>> for Data<V, E> {
    fn from(result: Result<V, E>) -> Self {
        match result {
            Ok(value) => Data::Success(value),
            Err(error) => Data::Failure(error),
        }
    }
}
