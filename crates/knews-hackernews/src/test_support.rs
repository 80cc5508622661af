//! Fixtures and fake services shared by the unit tests

use crate::detail::DetailUiCommentRowState;
use crate::list::ListUiRowState;
use crate::mapper::{detail_comment_row_at, list_row_at};
use crate::models::{Comment, Story};
use crate::repository::HackerNewsService;
use anyhow::{anyhow, bail};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use futures::{Stream, StreamExt};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Next state matching `predicate`; panics after two seconds
pub async fn wait_for<St>(states: &mut St, predicate: impl Fn(&St::Item) -> bool) -> St::Item
where
    St: Stream + Unpin,
{
    let next = async {
        while let Some(state) = states.next().await {
            if predicate(&state) {
                return Some(state);
            }
        }
        None
    };

    tokio::time::timeout(Duration::from_secs(2), next)
        .await
        .expect("timed out waiting for state")
        .expect("state stream ended")
}

// kids of story n are n+10, n+20, n+30
pub fn create_random_story(id: u64) -> Story {
    Story {
        id,
        title: format!("Story{}", id),
        url: format!("http://{}.com", id),
        score: 100 * id as i64,
        by: format!("Ann{}", id),
        time: 100 + id as i64,
        kids: Some((1..=3).map(|k| id + 10 * k).collect()),
        descendants: Some(10),
    }
}

pub fn create_random_comment(id: u64) -> Comment {
    Comment {
        id,
        parent: 10 + id,
        text: format!("Comment{}", id),
        by: format!("Ann{}", id),
        time: 200 + id as i64,
        kids: Some((0..3).map(|k| id + 10 * k).collect()),
    }
}

fn fixed_now() -> DateTime<Utc> {
    Utc.timestamp_opt(10_000, 0).single().unwrap_or_default()
}

pub fn create_row(id: u64) -> ListUiRowState {
    list_row_at(&create_random_story(id), fixed_now())
}

pub fn create_comment_row(id: u64) -> DetailUiCommentRowState {
    detail_comment_row_at(&create_random_comment(id), fixed_now())
}

#[derive(Default)]
struct Calls {
    top_stories: usize,
    stories: usize,
    comments: usize,
}

/// In-memory service over stories `ids` and their comments
///
/// Story 100 has no comments, story 101 points at a comment that does not
/// exist.
#[derive(Clone)]
pub struct MockService {
    ids: Vec<u64>,
    stories: Arc<HashMap<u64, Story>>,
    comments: Arc<HashMap<u64, Comment>>,
    delay: Duration,
    calls: Arc<Mutex<Calls>>,
}

impl MockService {
    pub fn new(ids: Vec<u64>) -> Self {
        let mut stories: HashMap<u64, Story> =
            ids.iter().map(|&id| (id, create_random_story(id))).collect();
        stories.insert(
            100,
            Story {
                kids: None,
                ..create_random_story(100)
            },
        );
        stories.insert(
            101,
            Story {
                kids: Some(vec![9999]),
                ..create_random_story(101)
            },
        );

        let comments = ids
            .iter()
            .flat_map(|&id| (0..=3).map(move |k| id + 10 * k))
            .map(|id| (id, create_random_comment(id)))
            .collect();

        Self {
            ids,
            stories: Arc::new(stories),
            comments: Arc::new(comments),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Calls::default())),
        }
    }

    /// Delay every call, to keep fetches in flight
    pub fn with_delay_millis(mut self, millis: u64) -> Self {
        self.delay = Duration::from_millis(millis);
        self
    }

    pub fn story(&self, id: u64) -> Option<Story> {
        self.stories.get(&id).cloned()
    }

    pub fn top_stories_calls(&self) -> usize {
        self.calls.lock().unwrap().top_stories
    }

    pub fn story_calls(&self) -> usize {
        self.calls.lock().unwrap().stories
    }

    pub fn comment_calls(&self) -> usize {
        self.calls.lock().unwrap().comments
    }

    async fn delay(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl HackerNewsService for MockService {
    async fn get_top_stories(&self) -> anyhow::Result<Vec<u64>> {
        self.calls.lock().unwrap().top_stories += 1;
        self.delay().await;
        Ok(self.ids.clone())
    }

    async fn get_story(&self, id: u64) -> anyhow::Result<Story> {
        self.calls.lock().unwrap().stories += 1;
        self.delay().await;
        self.story(id).ok_or_else(|| anyhow!("No story found"))
    }

    async fn get_comment(&self, id: u64) -> anyhow::Result<Comment> {
        self.calls.lock().unwrap().comments += 1;
        self.delay().await;
        self.comments
            .get(&id)
            .cloned()
            .ok_or_else(|| anyhow!("No comment found"))
    }
}

/// Top stories resolve, every item fetch fails
pub struct StoryFailureMockService;

#[async_trait]
impl HackerNewsService for StoryFailureMockService {
    async fn get_top_stories(&self) -> anyhow::Result<Vec<u64>> {
        Ok(vec![1, 2, 3, 4, 5, 6])
    }

    async fn get_story(&self, _id: u64) -> anyhow::Result<Story> {
        bail!("not implemented")
    }

    async fn get_comment(&self, _id: u64) -> anyhow::Result<Comment> {
        bail!("not implemented")
    }
}

/// Six stories; story 6, the only one on page 2, cannot be fetched
pub struct NextPageFailureMockService;

#[async_trait]
impl HackerNewsService for NextPageFailureMockService {
    async fn get_top_stories(&self) -> anyhow::Result<Vec<u64>> {
        Ok(vec![1, 2, 3, 4, 5, 6])
    }

    async fn get_story(&self, id: u64) -> anyhow::Result<Story> {
        if id == 6 {
            bail!("6 cannot be found");
        }
        Ok(create_random_story(id))
    }

    async fn get_comment(&self, _id: u64) -> anyhow::Result<Comment> {
        bail!("not implemented")
    }
}

/// Top story ids fail, always or only on the first call
#[derive(Clone)]
pub struct TopStoriesFailureMockService {
    inner: MockService,
    failures_left: Arc<Mutex<Option<usize>>>,
}

impl TopStoriesFailureMockService {
    pub fn always() -> Self {
        Self {
            inner: MockService::new(Vec::new()),
            failures_left: Arc::new(Mutex::new(None)),
        }
    }

    pub fn failing_once(ids: Vec<u64>) -> Self {
        Self {
            inner: MockService::new(ids),
            failures_left: Arc::new(Mutex::new(Some(1))),
        }
    }

    pub fn top_stories_calls(&self) -> usize {
        self.inner.top_stories_calls()
    }
}

#[async_trait]
impl HackerNewsService for TopStoriesFailureMockService {
    async fn get_top_stories(&self) -> anyhow::Result<Vec<u64>> {
        let fail = {
            let mut failures_left = self.failures_left.lock().unwrap();
            match failures_left.as_mut() {
                None => true,
                Some(0) => false,
                Some(left) => {
                    *left -= 1;
                    true
                }
            }
        };
        if fail {
            self.inner.calls.lock().unwrap().top_stories += 1;
            bail!("not implemented");
        }
        self.inner.get_top_stories().await
    }

    async fn get_story(&self, id: u64) -> anyhow::Result<Story> {
        self.inner.get_story(id).await
    }

    async fn get_comment(&self, id: u64) -> anyhow::Result<Comment> {
        self.inner.get_comment(id).await
    }
}
