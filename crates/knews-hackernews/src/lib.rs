//! Hacker News features for knews
//!
//! This crate provides:
//! - `Data<V, E>`, the four-state wrapper around an asynchronous fetch
//! - Domain models (`Story`, `Comment`) and the service/repository boundary
//! - The list feature (top stories, paging, sorting)
//! - The detail feature (one story and its first-level comments)
//!
//! Each feature exposes a single-reducer wiring (`reducer` + `middleware`)
//! and an identifier-routed wiring (`routed_store`), plus a view model that
//! owns the execution scope of its store.

pub mod config;
pub mod data;
pub mod detail;
pub mod list;
pub mod mapper;
pub mod models;
pub mod repository;

#[cfg(test)]
mod test_support;

pub use config::store_options;
pub use data::Data;
pub use detail::{DetailAction, DetailError, DetailUiState, DetailViewModel};
pub use list::{ListAction, ListError, ListUiSortCondition, ListUiState, ListViewModel};
pub use models::{Comment, Story};
pub use repository::{HackerNewsRepository, HackerNewsRepositoryImpl, HackerNewsService};
