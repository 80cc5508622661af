//! Data access for Hacker News items
//!
//! `HackerNewsService` is the raw item API (implemented by the transport
//! layer). `HackerNewsRepository` layers paging over the top-story id list
//! and fans out item fetches; it is what the feature middleware talks to.

use crate::models::{Comment, Story};
use anyhow::ensure;
use async_trait::async_trait;
use futures::future::try_join_all;
use std::sync::{Arc, Mutex, PoisonError};

/// Stories per page when the config does not say otherwise
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Raw item API
#[async_trait]
pub trait HackerNewsService: Send + Sync {
    /// Ids of the current top stories, best first
    async fn get_top_stories(&self) -> anyhow::Result<Vec<u64>>;

    async fn get_story(&self, id: u64) -> anyhow::Result<Story>;

    async fn get_comment(&self, id: u64) -> anyhow::Result<Comment>;
}

/// Paged access used by the list and detail features
#[async_trait]
pub trait HackerNewsRepository: Send + Sync {
    /// Stories of a 1-based page; `Ok(None)` once the page is past the end
    async fn get_top_stories(&self, page: usize) -> anyhow::Result<Option<Vec<Story>>>;

    async fn get_story(&self, id: u64) -> anyhow::Result<Story>;

    /// First-level comments of a story; `Ok(None)` when it has none
    async fn get_story_comments(&self, id: u64) -> anyhow::Result<Option<Vec<Comment>>>;

    async fn get_comment(&self, id: u64) -> anyhow::Result<Comment>;

    /// Fetch every comment; fails if any single fetch fails
    async fn get_comments(&self, ids: &[u64]) -> anyhow::Result<Vec<Comment>>;
}

/// Repository over a `HackerNewsService` with a cached top-story id list
///
/// The id list is fetched for page 1 and whenever the previous fetch failed;
/// later pages slice the cached list.
pub struct HackerNewsRepositoryImpl<S> {
    service: S,
    page_size: usize,
    top_story_ids: Mutex<Option<Arc<Vec<u64>>>>,
}

impl<S: HackerNewsService> HackerNewsRepositoryImpl<S> {
    pub fn new(service: S) -> Self {
        Self::with_page_size(service, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(service: S, page_size: usize) -> Self {
        Self {
            service,
            page_size: page_size.max(1),
            top_story_ids: Mutex::new(None),
        }
    }

    async fn top_story_ids(&self, page: usize) -> anyhow::Result<Arc<Vec<u64>>> {
        if page > 1 {
            let cached = self
                .top_story_ids
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone();
            if let Some(ids) = cached {
                return Ok(ids);
            }
        }

        log::debug!("HackerNewsRepository: fetching top story ids");
        let result = self.service.get_top_stories().await.map(Arc::new);

        *self
            .top_story_ids
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = result.as_ref().ok().cloned();
        result
    }

    async fn get_stories(&self, ids: &[u64]) -> anyhow::Result<Vec<Story>> {
        try_join_all(ids.iter().map(|&id| self.service.get_story(id))).await
    }
}

#[async_trait]
impl<S: HackerNewsService> HackerNewsRepository for HackerNewsRepositoryImpl<S> {
    async fn get_top_stories(&self, page: usize) -> anyhow::Result<Option<Vec<Story>>> {
        ensure!(page > 0, "page must be greater than 0, got {}", page);

        let ids = self.top_story_ids(page).await?;
        let start = (page - 1) * self.page_size;
        if start >= ids.len() {
            log::debug!(
                "HackerNewsRepository: page {} is past the {} available stories",
                page,
                ids.len()
            );
            return Ok(None);
        }
        let end = (start + self.page_size).min(ids.len());

        self.get_stories(&ids[start..end]).await.map(Some)
    }

    async fn get_story(&self, id: u64) -> anyhow::Result<Story> {
        self.service.get_story(id).await
    }

    async fn get_story_comments(&self, id: u64) -> anyhow::Result<Option<Vec<Comment>>> {
        let story = self.service.get_story(id).await?;
        match story.kids {
            Some(kids) => self.get_comments(&kids).await.map(Some),
            None => Ok(None),
        }
    }

    async fn get_comment(&self, id: u64) -> anyhow::Result<Comment> {
        self.service.get_comment(id).await
    }

    async fn get_comments(&self, ids: &[u64]) -> anyhow::Result<Vec<Comment>> {
        try_join_all(ids.iter().map(|&id| self.service.get_comment(id))).await
    }
}

/// Message carried into feature errors
pub fn error_message(error: &anyhow::Error) -> String {
    let message = error.to_string();
    if message.is_empty() {
        "Unknown error".to_string()
    } else {
        message
    }
}
