use crate::dispatcher::Dispatcher;

/// Which side of the reduction a middleware hook runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// Before the reducer, with the pre-reduction state
    BeforeReduce,
    /// After the reducer, with the state the action produced
    AfterReduce,
}

/// Middleware trait - observes every action around its reduction
///
/// `process` is called twice per action, once per `Order`. It runs on the
/// pipeline task, so it must return quickly: anything asynchronous is spawned
/// on the middleware's `Environment` scope and reports back by dispatching a
/// result action.
///
/// - `order`: which hook this is
/// - `dispatcher`: clone this into spawned tasks to feed results back
/// - `state`: pre-reduction state for `BeforeReduce`, next state for `AfterReduce`
/// - `action`: the action being processed
///
/// An `AfterReduce` hook must not dispatch synchronously for the action it
/// is observing; follow-ups go through a spawned task like any other effect.
pub trait Middleware<S, A>: Send + Sync {
    fn process(&self, order: Order, dispatcher: &Dispatcher<A>, state: &S, action: &A);
}
