use crate::data::Data;
use std::cmp::{Ordering, Reverse};
use strum::{Display, EnumIter};
use thiserror::Error;

/// One story as shown in the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListUiRowState {
    pub id: u64,
    pub title: String,
    pub url: Option<String>,
    pub score: i64,
    pub by: String,
    /// Seconds since the story was posted
    pub from_now: i64,
    pub from_now_text: String,
    pub comment_ids: Option<Vec<u64>>,
    pub descendants: Option<u64>,
}

/// Client-side ordering of the list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum ListUiSortCondition {
    /// Order as served
    #[default]
    None,
    /// Most recent first
    Recent,
    Title,
    /// Highest score first
    Score,
}

pub type Comparator = fn(&ListUiRowState, &ListUiRowState) -> Ordering;

fn by_recent(a: &ListUiRowState, b: &ListUiRowState) -> Ordering {
    a.from_now.cmp(&b.from_now)
}

fn by_title(a: &ListUiRowState, b: &ListUiRowState) -> Ordering {
    a.title.cmp(&b.title)
}

fn by_score(a: &ListUiRowState, b: &ListUiRowState) -> Ordering {
    Reverse(a.score).cmp(&Reverse(b.score))
}

impl ListUiSortCondition {
    pub fn comparator(&self) -> Option<Comparator> {
        match self {
            ListUiSortCondition::None => None,
            ListUiSortCondition::Recent => Some(by_recent),
            ListUiSortCondition::Title => Some(by_title),
            ListUiSortCondition::Score => Some(by_score),
        }
    }

    /// Stable sort in place; `None` keeps the current order
    pub fn sort(&self, rows: &mut [ListUiRowState]) {
        if let Some(comparator) = self.comparator() {
            rows.sort_by(comparator);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    #[error("{0}")]
    LoadStories(String),

    #[error("{0}")]
    LoadNextStories(String),

    /// Next page requested before the first page loaded
    #[error("Data inconsistency, not loading next page")]
    DataInconsistency,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListUiState {
    pub sort_condition: ListUiSortCondition,
    pub stories: Data<Vec<ListUiRowState>, ListError>,
    /// Outcome of the latest next-page load; `Success(None)` past the end
    pub next_stories: Data<Option<Vec<ListUiRowState>>, ListError>,
}
