//! Bounded action buffer feeding the pipeline
//!
//! Producers push from any task; the single pipeline task pops. The buffer
//! closes together with the scope it was created for.

use crate::error::StoreError;
use crate::scope::Scope;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use tokio::sync::Notify;

/// Default number of queued actions before the overflow policy applies
pub const DEFAULT_CAPACITY: usize = 16;

/// What happens when an action arrives and the buffer is full
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Overflow {
    /// Evict the oldest unprocessed action to make room
    ///
    /// Producers never wait. Under sustained overload the oldest queued
    /// actions are lost; each eviction is logged at warn level.
    #[default]
    DropOldest,

    /// Keep every action; `dispatch` waits for room and `try_dispatch` fails
    Suspend,
}

pub(crate) enum Rejected<A> {
    Full(A),
    Closed,
}

pub(crate) struct ActionBuffer<A> {
    queue: Mutex<VecDeque<A>>,
    capacity: usize,
    overflow: Overflow,
    scope: Scope,
    readable: Notify,
    writable: Notify,
}

impl<A> ActionBuffer<A> {
    pub(crate) fn new(scope: Scope, capacity: usize, overflow: Overflow) -> Self {
        let capacity = capacity.max(1);
        Self {
            queue: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            overflow,
            scope,
            readable: Notify::new(),
            writable: Notify::new(),
        }
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.scope.is_cancelled()
    }

    /// Single non-blocking attempt to enqueue
    pub(crate) fn offer(&self, action: A) -> Result<(), Rejected<A>> {
        if self.is_closed() {
            return Err(Rejected::Closed);
        }

        let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        if queue.len() >= self.capacity {
            match self.overflow {
                Overflow::DropOldest => {
                    queue.pop_front();
                    log::warn!(
                        "ActionBuffer: full ({} slots), dropped oldest pending action",
                        self.capacity
                    );
                }
                Overflow::Suspend => return Err(Rejected::Full(action)),
            }
        }
        queue.push_back(action);
        drop(queue);

        self.readable.notify_one();
        Ok(())
    }

    /// Enqueue, waiting for room when the policy is `Suspend`
    pub(crate) async fn push(&self, mut action: A) -> Result<(), StoreError> {
        loop {
            let writable = self.writable.notified();
            tokio::pin!(writable);
            writable.as_mut().enable();

            match self.offer(action) {
                Ok(()) => return Ok(()),
                Err(Rejected::Closed) => return Err(StoreError::Closed),
                Err(Rejected::Full(rejected)) => action = rejected,
            }

            tokio::select! {
                _ = &mut writable => {}
                _ = self.scope.cancelled() => return Err(StoreError::Closed),
            }
        }
    }

    /// Dequeue the next action in acceptance order
    ///
    /// Returns `None` once the scope is cancelled.
    pub(crate) async fn pop(&self) -> Option<A> {
        loop {
            let readable = self.readable.notified();
            tokio::pin!(readable);
            readable.as_mut().enable();

            if self.is_closed() {
                return None;
            }

            let next = self
                .queue
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .pop_front();
            if let Some(action) = next {
                self.writable.notify_one();
                return Some(action);
            }

            tokio::select! {
                _ = &mut readable => {}
                _ = self.scope.cancelled() => return None,
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
