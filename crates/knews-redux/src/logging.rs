use crate::dispatcher::Dispatcher;
use crate::middleware::{Middleware, Order};
use std::fmt::Debug;

/// LoggingMiddleware - logs every action together with the state it produced
pub struct LoggingMiddleware {
    target: &'static str,
}

impl LoggingMiddleware {
    pub fn new(target: &'static str) -> Self {
        Self { target }
    }
}

impl<S: Debug, A: Debug> Middleware<S, A> for LoggingMiddleware {
    fn process(&self, order: Order, _dispatcher: &Dispatcher<A>, state: &S, action: &A) {
        // only the reduced side is interesting
        if order == Order::AfterReduce {
            log::debug!(target: self.target, "Action: {:?} -> {:?}", action, state);
        }
    }
}
