use crate::data::Data;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailUiStoryState {
    pub id: u64,
    pub title: String,
    pub url: String,
    pub comment_ids: Option<Vec<u64>>,
    pub descendants: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailUiCommentRowState {
    pub text: String,
    pub by: String,
    /// Seconds since the comment was posted
    pub from_now: i64,
    pub from_now_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetailError {
    #[error("{0}")]
    LoadStory(String),

    #[error("{0}")]
    LoadStoryComments(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailUiState {
    /// Story to load; `None` until one is chosen
    pub story_id: Option<u64>,
    pub story: Data<DetailUiStoryState, DetailError>,
    /// `Success(None)` for a story without comments
    pub comments: Data<Option<Vec<DetailUiCommentRowState>>, DetailError>,
}

impl DetailUiState {
    /// State for a story that still has to be fetched
    pub fn for_story(id: u64) -> Self {
        Self {
            story_id: Some(id),
            ..Default::default()
        }
    }

    /// State seeded with an already known story
    pub fn with_story(story: DetailUiStoryState) -> Self {
        Self {
            story_id: Some(story.id),
            story: Data::Success(story),
            ..Default::default()
        }
    }
}
