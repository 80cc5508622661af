//! Story detail: the story itself and its first-level comments

mod actions;
mod middleware;
mod reducer;
mod state;
mod store;
mod view_model;

pub use actions::{DetailAction, DetailActionKind};
pub use middleware::{DetailEnvironment, DetailMiddleware, LoadStoryCommentsEffect, LoadStoryEffect};
pub use reducer::{
    load_story, load_story_comments, load_story_comments_result, load_story_result, reduce,
    set_initial_story,
};
pub use state::{DetailError, DetailUiCommentRowState, DetailUiState, DetailUiStoryState};
pub use store::{detail_store, routed_store};
pub use view_model::DetailViewModel;
