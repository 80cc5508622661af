//! Identifier-routed store wiring
//!
//! Instead of one reducer matching on every action, each action kind gets its
//! own small reducer and, optionally, its own middleware. Kinds are a closed
//! enum (typically derived with `strum::EnumDiscriminants`), so the builder
//! can check at construction time that every kind has a reducer.
//!
//! ```rust,ignore
//! #[derive(EnumDiscriminants)]
//! #[strum_discriminants(name(CounterKind), derive(Hash, EnumIter))]
//! enum CounterAction { Add(i32), Reset }
//!
//! let store = RoutedStoreBuilder::new()
//!     .reducer(CounterKind::Add, add_reducer)
//!     .reducer(CounterKind::Reset, reset_reducer)
//!     .middleware(CounterKind::Add, add_effect)
//!     .build(&scope, 0)?;
//! ```

use crate::dispatcher::Dispatcher;
use crate::error::StoreError;
use crate::middleware::{Middleware, Order};
use crate::reducer::Reducer;
use crate::scope::Scope;
use crate::store::{Engine, Store, StoreOptions};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use strum::IntoEnumIterator;

/// Actions that expose a runtime discriminant for routing
pub trait Identifiable {
    type Kind: Copy + Eq + Hash + Debug + IntoEnumIterator + Send + Sync + 'static;

    fn kind(&self) -> Self::Kind;
}

/// Builder for a store routed by action kind
pub struct RoutedStoreBuilder<S, A: Identifiable> {
    reducers: HashMap<A::Kind, Box<dyn Reducer<S, A>>>,
    middlewares: HashMap<A::Kind, Arc<dyn Middleware<S, A>>>,
    options: StoreOptions,
}

impl<S, A> Default for RoutedStoreBuilder<S, A>
where
    A: Identifiable,
{
    fn default() -> Self {
        Self {
            reducers: HashMap::new(),
            middlewares: HashMap::new(),
            options: StoreOptions::default(),
        }
    }
}

impl<S, A> RoutedStoreBuilder<S, A>
where
    S: Clone + Send + Sync + 'static,
    A: Identifiable + Send + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(mut self, options: StoreOptions) -> Self {
        self.options = options;
        self
    }

    /// Route `kind` to `reducer`, replacing any earlier registration
    pub fn reducer<R>(mut self, kind: A::Kind, reducer: R) -> Self
    where
        R: Reducer<S, A> + 'static,
    {
        if self.reducers.insert(kind, Box::new(reducer)).is_some() {
            log::warn!("RoutedStoreBuilder: reducer for {:?} replaced", kind);
        }
        self
    }

    /// Run `middleware` around reductions of `kind` only
    pub fn middleware(mut self, kind: A::Kind, middleware: Arc<dyn Middleware<S, A>>) -> Self {
        if self.middlewares.insert(kind, middleware).is_some() {
            log::warn!("RoutedStoreBuilder: middleware for {:?} replaced", kind);
        }
        self
    }

    /// Start the store on `scope`
    ///
    /// Fails with `StoreError::MissingReducer` naming the first action kind
    /// that has no reducer.
    pub fn build(self, scope: &Scope, initial_state: S) -> Result<Store<S, A>, StoreError> {
        if let Some(kind) = A::Kind::iter().find(|kind| !self.reducers.contains_key(kind)) {
            return Err(StoreError::MissingReducer {
                kind: format!("{:?}", kind),
            });
        }

        let engine = RoutedEngine {
            reducers: self.reducers,
            middlewares: self.middlewares,
        };
        Ok(Store::from_engine(
            scope,
            initial_state,
            Box::new(engine),
            self.options,
        ))
    }
}

struct RoutedEngine<S, A: Identifiable> {
    reducers: HashMap<A::Kind, Box<dyn Reducer<S, A>>>,
    middlewares: HashMap<A::Kind, Arc<dyn Middleware<S, A>>>,
}

impl<S, A> Engine<S, A> for RoutedEngine<S, A>
where
    A: Identifiable + Send + 'static,
    S: 'static,
{
    fn step(&self, state: S, action: &A, dispatcher: &Dispatcher<A>) -> S {
        let kind = action.kind();

        // build() rejects incomplete routing tables, so a miss here is a wiring bug
        let Some(reducer) = self.reducers.get(&kind) else {
            panic!("no reducer registered for action kind {:?}", kind);
        };
        let middleware = self.middlewares.get(&kind);

        if let Some(middleware) = middleware {
            middleware.process(Order::BeforeReduce, dispatcher, &state, action);
        }
        let next = reducer.reduce(state, action);
        if let Some(middleware) = middleware {
            middleware.process(Order::AfterReduce, dispatcher, &next, action);
        }
        next
    }
}
