//! Unidirectional state container
//!
//! This crate provides the `Store`: a single serialized action pipeline that
//! owns the canonical state, runs middleware hooks around a pure reducer and
//! publishes every resulting state to its subscribers.
//!
//! # Architecture
//!
//! ```text
//!  dispatch(action) ──► ActionBuffer (bounded) ──► pipeline task
//!                                                     │
//!        ┌────────────────────────────────────────────┘
//!        ▼
//!  middleware.process(BeforeReduce, state, action)
//!  next = reducer(state, action)
//!  middleware.process(AfterReduce, next, action)
//!  publish(next) ──► states() subscribers
//! ```
//!
//! Middleware never mutates state. Side effects run on the `Scope` of their
//! `Environment` and feed their outcome back through `Dispatcher::dispatch`,
//! so every change re-enters the same pipeline.
//!
//! Two wirings are available:
//! - `Store::new` with one reducer (use `combine_reducers` to fold several)
//! - `RoutedStoreBuilder`, which maps each action kind to its own reducer and
//!   optional middleware
//!
//! # Example
//!
//! ```rust,no_run
//! use knews_redux::{Scope, Store};
//!
//! # async fn example() -> Result<(), knews_redux::StoreError> {
//! let scope = Scope::current();
//! let store = Store::new(&scope, 0_i32, |state: i32, action: &i32| state + action);
//!
//! store.dispatch(2).await?;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod buffer;
pub mod dispatcher;
pub mod environment;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod reducer;
pub mod scope;
pub mod store;

pub use adapter::{Identifiable, RoutedStoreBuilder};
pub use buffer::{Overflow, DEFAULT_CAPACITY};
pub use dispatcher::Dispatcher;
pub use environment::Environment;
pub use error::StoreError;
pub use logging::LoggingMiddleware;
pub use middleware::{Middleware, Order};
pub use reducer::{combine_reducers, CompositeReducer, Reducer};
pub use scope::Scope;
pub use store::{Store, StoreOptions};
