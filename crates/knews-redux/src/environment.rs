//! Dependencies injected into middleware
//!
//! An environment is not state: the reducer never sees it. It carries the
//! scope side effects run on plus whatever data access a feature needs.

use crate::scope::Scope;
use std::future::Future;

pub trait Environment: Send + Sync {
    /// Scope that owns every side effect started with this environment
    fn scope(&self) -> &Scope;

    /// Spawn a side effect on the environment's scope
    ///
    /// Dropped silently when the scope is already cancelled.
    fn launch<F>(&self, effect: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if self.scope().spawn(effect).is_none() {
            log::debug!("Environment: scope cancelled, side effect not started");
        }
    }
}
