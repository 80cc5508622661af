//! Top stories list: paging and client-side sorting

mod actions;
mod middleware;
mod reducer;
mod state;
mod store;
mod view_model;

pub use actions::{ListAction, ListActionKind};
pub use middleware::{ListEnvironment, ListMiddleware, LoadNextStoriesEffect, LoadStoriesEffect, SortEffect};
pub use reducer::{
    load_next_stories, load_next_stories_result, load_stories, load_stories_result, reduce, sort,
};
pub use state::{ListError, ListUiRowState, ListUiSortCondition, ListUiState};
pub use store::{list_store, routed_store};
pub use view_model::ListViewModel;
