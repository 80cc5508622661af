//! Mapping from item payloads to UI row state

use crate::detail::{DetailUiCommentRowState, DetailUiStoryState};
use crate::list::ListUiRowState;
use crate::models::{Comment, Story};
use chrono::{DateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// Human readable age for a number of elapsed seconds
pub fn from_now_text(seconds: i64) -> String {
    match seconds {
        s if s < 0 => "Unknown ago".to_string(),
        s if s < MINUTE => format!("{} seconds ago", s),
        s if s < HOUR => format!("{} minutes ago", s / MINUTE),
        s if s < DAY => format!("{} hours ago", s / HOUR),
        s => format!("{} days ago", s / DAY),
    }
}

fn seconds_since(time: i64, now: DateTime<Utc>) -> i64 {
    now.timestamp() - time
}

pub fn list_row(story: &Story) -> ListUiRowState {
    list_row_at(story, Utc::now())
}

pub fn list_row_at(story: &Story, now: DateTime<Utc>) -> ListUiRowState {
    let from_now = seconds_since(story.time, now);
    ListUiRowState {
        id: story.id,
        title: story.title.clone(),
        url: (!story.url.is_empty()).then(|| story.url.clone()),
        score: story.score,
        by: story.by.clone(),
        from_now,
        from_now_text: from_now_text(from_now),
        comment_ids: story.kids.clone(),
        descendants: story.descendants,
    }
}

pub fn detail_story(story: &Story) -> DetailUiStoryState {
    DetailUiStoryState {
        id: story.id,
        title: story.title.clone(),
        url: story.url.clone(),
        comment_ids: story.kids.clone(),
        descendants: story.descendants,
    }
}

pub fn detail_comment_row(comment: &Comment) -> DetailUiCommentRowState {
    detail_comment_row_at(comment, Utc::now())
}

pub fn detail_comment_row_at(comment: &Comment, now: DateTime<Utc>) -> DetailUiCommentRowState {
    let from_now = seconds_since(comment.time, now);
    DetailUiCommentRowState {
        text: comment.text.clone(),
        by: comment.by.clone(),
        from_now,
        from_now_text: from_now_text(from_now),
    }
}

impl From<&ListUiRowState> for DetailUiStoryState {
    fn from(row: &ListUiRowState) -> Self {
        Self {
            id: row.id,
            title: row.title.clone(),
            url: row.url.clone().unwrap_or_default(),
            comment_ids: row.comment_ids.clone(),
            descendants: row.descendants,
        }
    }
}
