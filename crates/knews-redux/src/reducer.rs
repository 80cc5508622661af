//! Reducers - pure functions from (state, action) to next state
//!
//! A reducer must return the state unchanged for actions it does not
//! recognize. That identity fallback is what lets independently written
//! reducers be folded together with `combine_reducers`.

/// Reducer trait
///
/// Implemented for every `Fn(S, &A) -> S`, so plain `fn reduce(state, action)`
/// functions can be passed wherever a reducer is expected.
pub trait Reducer<S, A>: Send + Sync {
    fn reduce(&self, state: S, action: &A) -> S;
}

impl<S, A, F> Reducer<S, A> for F
where
    F: Fn(S, &A) -> S + Send + Sync,
{
    fn reduce(&self, state: S, action: &A) -> S {
        self(state, action)
    }
}

/// Reducer folding the state through a list of reducers, in order
pub struct CompositeReducer<S, A> {
    reducers: Vec<Box<dyn Reducer<S, A>>>,
}

impl<S, A> Reducer<S, A> for CompositeReducer<S, A> {
    fn reduce(&self, state: S, action: &A) -> S {
        self.reducers
            .iter()
            .fold(state, |state, reducer| reducer.reduce(state, action))
    }
}

pub fn combine_reducers<S, A>(reducers: Vec<Box<dyn Reducer<S, A>>>) -> CompositeReducer<S, A> {
    CompositeReducer { reducers }
}
