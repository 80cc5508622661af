//! Dispatcher for sending actions into the store pipeline
//!
//! Every `Dispatcher` feeds the same bounded buffer as the store it came from.
//! Middleware receives one in each hook and clones it into the side-effect
//! tasks it spawns, so their results re-enter the pipeline instead of
//! touching state directly.
//!
//! A dispatcher can be bound to an additional `Scope` (usually the one of a
//! middleware's `Environment`). Once that scope is cancelled the dispatcher
//! refuses every action, even if the store itself is still running.

use crate::buffer::{ActionBuffer, Rejected};
use crate::error::StoreError;
use crate::scope::Scope;
use futures::{Stream, StreamExt};
use std::sync::Arc;

pub struct Dispatcher<A> {
    buffer: Arc<ActionBuffer<A>>,
    guard: Option<Scope>,
}

impl<A> Clone for Dispatcher<A> {
    fn clone(&self) -> Self {
        Self {
            buffer: Arc::clone(&self.buffer),
            guard: self.guard.clone(),
        }
    }
}

impl<A: Send + 'static> Dispatcher<A> {
    pub(crate) fn new(buffer: Arc<ActionBuffer<A>>) -> Self {
        Self {
            buffer,
            guard: None,
        }
    }

    /// Return a dispatcher that also closes when `scope` is cancelled
    pub fn bind(&self, scope: &Scope) -> Self {
        Self {
            buffer: Arc::clone(&self.buffer),
            guard: Some(scope.clone()),
        }
    }

    /// Whether actions sent through this dispatcher are still accepted
    pub fn is_closed(&self) -> bool {
        self.buffer.is_closed() || self.guard.as_ref().is_some_and(Scope::is_cancelled)
    }

    /// Dispatch an action into the pipeline
    ///
    /// Resolves once the action is accepted into the buffer, not once it has
    /// been reduced. Concurrent callers are totally ordered by acceptance.
    pub async fn dispatch(&self, action: A) -> Result<(), StoreError> {
        if self.is_closed() {
            return Err(StoreError::Closed);
        }

        match &self.guard {
            Some(guard) => {
                tokio::select! {
                    result = self.buffer.push(action) => result,
                    _ = guard.cancelled() => Err(StoreError::Closed),
                }
            }
            None => self.buffer.push(action).await,
        }
    }

    /// Dispatch without waiting
    ///
    /// Returns `false` when the action was not accepted: the dispatcher is
    /// closed, or the buffer is full under `Overflow::Suspend`.
    pub fn try_dispatch(&self, action: A) -> bool {
        self.try_send(action).is_ok()
    }

    /// Like `try_dispatch`, reporting why the action was refused
    pub fn try_send(&self, action: A) -> Result<(), StoreError> {
        if self.is_closed() {
            return Err(StoreError::Closed);
        }

        match self.buffer.offer(action) {
            Ok(()) => Ok(()),
            Err(Rejected::Full(_)) => {
                log::debug!("Dispatcher: buffer full, action rejected");
                Err(StoreError::BufferFull)
            }
            Err(Rejected::Closed) => Err(StoreError::Closed),
        }
    }

    /// Dispatch every element of a stream, in stream order
    ///
    /// Stops at the first action that is not accepted.
    pub async fn dispatch_all<S>(&self, actions: S) -> Result<(), StoreError>
    where
        S: Stream<Item = A>,
    {
        let mut actions = std::pin::pin!(actions);
        while let Some(action) = actions.next().await {
            self.dispatch(action).await?;
        }
        Ok(())
    }
}

impl<A> std::fmt::Debug for Dispatcher<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("bound", &self.guard.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Overflow;

    fn dispatcher(scope: &Scope, capacity: usize, overflow: Overflow) -> Dispatcher<u32> {
        Dispatcher::new(Arc::new(ActionBuffer::new(scope.clone(), capacity, overflow)))
    }

    #[tokio::test]
    async fn test_bound_dispatcher_closes_with_its_scope() {
        let store_scope = Scope::current();
        let effect_scope = Scope::current();
        let dispatcher = dispatcher(&store_scope, 4, Overflow::DropOldest);
        let bound = dispatcher.bind(&effect_scope);

        assert!(bound.try_dispatch(1));
        effect_scope.cancel();

        assert!(bound.is_closed());
        assert!(!bound.try_dispatch(2));
        assert_eq!(bound.dispatch(3).await, Err(StoreError::Closed));

        // the unbound handle still reaches the store
        assert!(!dispatcher.is_closed());
        assert!(dispatcher.try_dispatch(4));
    }

    #[tokio::test]
    async fn test_try_dispatch_fails_when_full_under_suspend() {
        let scope = Scope::current();
        let dispatcher = dispatcher(&scope, 1, Overflow::Suspend);

        assert!(dispatcher.try_dispatch(1));
        assert!(!dispatcher.try_dispatch(2));
        assert_eq!(dispatcher.try_send(3), Err(StoreError::BufferFull));

        scope.cancel();
        assert_eq!(dispatcher.try_send(4), Err(StoreError::Closed));
    }

    #[tokio::test]
    async fn test_try_dispatch_always_accepts_under_drop_oldest() {
        let scope = Scope::current();
        let dispatcher = dispatcher(&scope, 1, Overflow::DropOldest);

        assert!(dispatcher.try_dispatch(1));
        assert!(dispatcher.try_dispatch(2));
    }

    #[tokio::test]
    async fn test_dispatch_all_stops_when_closed() {
        let scope = Scope::current();
        let dispatcher = dispatcher(&scope, 8, Overflow::DropOldest);
        scope.cancel();

        let result = dispatcher
            .dispatch_all(futures::stream::iter(vec![1, 2, 3]))
            .await;
        assert_eq!(result, Err(StoreError::Closed));
    }
}
