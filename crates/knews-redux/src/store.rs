//! Store - holds the canonical state and runs the action pipeline
//!
//! Exactly one pipeline task per store pops actions from the bounded buffer
//! and processes them one at a time:
//!
//! 1. every middleware's `BeforeReduce` hook with the current state
//! 2. the reducer (or the routed per-kind reducer)
//! 3. the `replace_reducer` post-transform
//! 4. every middleware's `AfterReduce` hook with the next state
//! 5. publish the next state to all subscribers
//!
//! The middleware list is copy-on-write: `add_middleware` / `remove_middleware`
//! swap in a new list, and each action iterates the snapshot taken when its
//! processing started.

use crate::buffer::{ActionBuffer, Overflow, DEFAULT_CAPACITY};
use crate::dispatcher::Dispatcher;
use crate::error::StoreError;
use crate::middleware::{Middleware, Order};
use crate::reducer::Reducer;
use crate::scope::Scope;
use futures::Stream;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio_stream::wrappers::UnboundedReceiverStream;

/// Tuning for the action buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    pub capacity: usize,
    pub overflow: Overflow,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            overflow: Overflow::default(),
        }
    }
}

/// One reduction step, excluding store-wide middleware
pub(crate) trait Engine<S, A>: Send + Sync {
    fn step(&self, state: S, action: &A, dispatcher: &Dispatcher<A>) -> S;
}

struct ReducerEngine<R> {
    reducer: R,
}

impl<S, A, R: Reducer<S, A>> Engine<S, A> for ReducerEngine<R> {
    fn step(&self, state: S, action: &A, _dispatcher: &Dispatcher<A>) -> S {
        self.reducer.reduce(state, action)
    }
}

type MiddlewareList<S, A> = Arc<Vec<Arc<dyn Middleware<S, A>>>>;
type ReplaceReducer<S, A> = Arc<dyn Fn(S, &A) -> S + Send + Sync>;

struct Published<S> {
    current: S,
    subscribers: Vec<UnboundedSender<S>>,
}

struct Shared<S, A> {
    engine: Box<dyn Engine<S, A>>,
    middlewares: RwLock<MiddlewareList<S, A>>,
    replace_reducer: RwLock<ReplaceReducer<S, A>>,
    published: Mutex<Published<S>>,
}

impl<S: Clone, A> Shared<S, A> {
    fn middlewares(&self) -> MiddlewareList<S, A> {
        Arc::clone(
            &self
                .middlewares
                .read()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }

    fn process(&self, state: S, action: &A, dispatcher: &Dispatcher<A>) -> S {
        let middlewares = self.middlewares();

        for middleware in middlewares.iter() {
            middleware.process(Order::BeforeReduce, dispatcher, &state, action);
        }

        let reduced = self.engine.step(state, action, dispatcher);
        let replace = Arc::clone(
            &self
                .replace_reducer
                .read()
                .unwrap_or_else(PoisonError::into_inner),
        );
        let next = replace(reduced, action);

        for middleware in middlewares.iter() {
            middleware.process(Order::AfterReduce, dispatcher, &next, action);
        }

        self.publish(&next);
        next
    }

    fn publish(&self, next: &S) {
        let mut published = self
            .published
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        published.current = next.clone();
        published
            .subscribers
            .retain(|subscriber| subscriber.send(next.clone()).is_ok());
    }
}

/// Handle to a running store
///
/// Cloning is cheap; all clones drive the same pipeline. The store lives as
/// long as the scope it was created on: cancelling that scope stops the
/// pipeline and closes every dispatcher.
pub struct Store<S, A> {
    shared: Arc<Shared<S, A>>,
    dispatcher: Dispatcher<A>,
}

impl<S, A> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            dispatcher: self.dispatcher.clone(),
        }
    }
}

impl<S, A> Store<S, A>
where
    S: Clone + Send + Sync + 'static,
    A: Send + 'static,
{
    /// Create a store with the default buffer options
    pub fn new<R>(scope: &Scope, initial_state: S, reducer: R) -> Self
    where
        R: Reducer<S, A> + 'static,
    {
        Self::with_options(scope, initial_state, reducer, StoreOptions::default())
    }

    pub fn with_options<R>(scope: &Scope, initial_state: S, reducer: R, options: StoreOptions) -> Self
    where
        R: Reducer<S, A> + 'static,
    {
        Self::from_engine(
            scope,
            initial_state,
            Box::new(ReducerEngine { reducer }),
            options,
        )
    }

    pub(crate) fn from_engine(
        scope: &Scope,
        initial_state: S,
        engine: Box<dyn Engine<S, A>>,
        options: StoreOptions,
    ) -> Self {
        let buffer = Arc::new(ActionBuffer::new(
            scope.clone(),
            options.capacity,
            options.overflow,
        ));
        let dispatcher = Dispatcher::new(Arc::clone(&buffer));
        let identity: ReplaceReducer<S, A> = Arc::new(|state: S, _: &A| state);

        let shared = Arc::new(Shared {
            engine,
            middlewares: RwLock::new(Arc::new(Vec::new())),
            replace_reducer: RwLock::new(identity),
            published: Mutex::new(Published {
                current: initial_state.clone(),
                subscribers: Vec::new(),
            }),
        });

        let pipeline = {
            let shared = Arc::clone(&shared);
            let dispatcher = dispatcher.clone();
            async move {
                log::debug!("Store: pipeline started");
                let mut state = initial_state;
                while let Some(action) = buffer.pop().await {
                    state = shared.process(state, &action, &dispatcher);
                }
                log::debug!("Store: pipeline stopped");
            }
        };
        if scope.spawn(pipeline).is_none() {
            log::warn!("Store: created on a cancelled scope, no action will be processed");
        }

        Self { shared, dispatcher }
    }

    /// Builder-style `add_middleware`
    pub fn with_middleware(self, middleware: Arc<dyn Middleware<S, A>>) -> Self {
        self.add_middleware(middleware);
        self
    }

    /// Dispatch an action; resolves once it is accepted into the buffer
    pub async fn dispatch(&self, action: A) -> Result<(), StoreError> {
        self.dispatcher.dispatch(action).await
    }

    /// Non-blocking dispatch; `false` when the action was not accepted
    pub fn try_dispatch(&self, action: A) -> bool {
        self.dispatcher.try_dispatch(action)
    }

    /// Dispatch every element of `actions`, preserving their order
    pub async fn dispatch_all<St>(&self, actions: St) -> Result<(), StoreError>
    where
        St: Stream<Item = A>,
    {
        self.dispatcher.dispatch_all(actions).await
    }

    /// A dispatcher feeding this store
    pub fn dispatcher(&self) -> Dispatcher<A> {
        self.dispatcher.clone()
    }

    /// Subscribe to state snapshots
    ///
    /// The stream yields the current state immediately, then every state the
    /// pipeline publishes, including states equal to the previous one.
    ///
    /// Each subscriber has its own unbounded queue: a stream that is held but
    /// never polled keeps every published state in memory until it is
    /// dropped. Drop streams you no longer read.
    pub fn states(&self) -> impl Stream<Item = S> + Unpin + Send + 'static {
        let (tx, rx) = mpsc::unbounded_channel();

        let mut published = self
            .shared
            .published
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // the receiver is alive, so this cannot fail
        let _ = tx.send(published.current.clone());
        published.subscribers.push(tx);

        UnboundedReceiverStream::new(rx)
    }

    /// The latest published state
    pub fn current_state(&self) -> S {
        self.shared
            .published
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .current
            .clone()
    }

    /// Register a middleware; takes effect from the next processed action
    pub fn add_middleware(&self, middleware: Arc<dyn Middleware<S, A>>) {
        let mut middlewares = self
            .shared
            .middlewares
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let mut next = Vec::with_capacity(middlewares.len() + 1);
        next.extend(middlewares.iter().cloned());
        next.push(middleware);
        *middlewares = Arc::new(next);
    }

    /// Unregister a middleware by identity; `false` if it was not registered
    pub fn remove_middleware(&self, middleware: &Arc<dyn Middleware<S, A>>) -> bool {
        let mut middlewares = self
            .shared
            .middlewares
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let Some(index) = middlewares.iter().position(|m| Arc::ptr_eq(m, middleware)) else {
            return false;
        };

        let mut next: Vec<_> = middlewares.iter().cloned().collect();
        next.remove(index);
        *middlewares = Arc::new(next);
        true
    }

    /// Install a post-reduction transform applied after every reducer run
    ///
    /// The default is the identity.
    pub fn replace_reducer<F>(&self, transform: F)
    where
        F: Fn(S, &A) -> S + Send + Sync + 'static,
    {
        *self
            .shared
            .replace_reducer
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::new(transform);
    }
}
