//! Detail side effects

use super::actions::DetailAction;
use super::state::{DetailError, DetailUiState};
use crate::data::Data;
use crate::mapper::{detail_comment_row, detail_story};
use crate::repository::{error_message, HackerNewsRepository};
use anyhow::anyhow;
use knews_redux::{Dispatcher, Environment, Middleware, Order, Scope};
use std::sync::Arc;

/// Scope and data access for detail side effects
#[derive(Clone)]
pub struct DetailEnvironment {
    scope: Scope,
    repository: Arc<dyn HackerNewsRepository>,
}

impl DetailEnvironment {
    pub fn new(scope: Scope, repository: Arc<dyn HackerNewsRepository>) -> Self {
        Self { scope, repository }
    }
}

impl Environment for DetailEnvironment {
    fn scope(&self) -> &Scope {
        &self.scope
    }
}

/// Where comment ids come from
enum CommentSource {
    /// The loaded story; `None` when it has no comments
    Ids(Option<Vec<u64>>),
    /// Fetch the story first
    Story(Option<u64>),
}

async fn send(dispatcher: &Dispatcher<DetailAction>, action: DetailAction) {
    if let Err(e) = dispatcher.dispatch(action).await {
        log::debug!("DetailMiddleware: result dropped: {}", e);
    }
}

fn load_story(
    environment: &DetailEnvironment,
    dispatcher: &Dispatcher<DetailAction>,
    state: &DetailUiState,
) {
    if state.story.is_loading() {
        log::debug!("DetailMiddleware: story already loading, skipping");
        return;
    }

    let story_id = state.story_id;
    let repository = Arc::clone(&environment.repository);
    let dispatcher = dispatcher.bind(environment.scope());
    environment.launch(async move {
        let result = match story_id {
            Some(id) => {
                log::info!("DetailMiddleware: loading story {}", id);
                repository.get_story(id).await
            }
            None => Err(anyhow!("No story selected")),
        };
        let result = result.map(|story| detail_story(&story)).map_err(|e| {
            log::warn!("DetailMiddleware: failed to load story: {}", e);
            DetailError::LoadStory(error_message(&e))
        });
        send(&dispatcher, DetailAction::LoadStoryResult(result)).await;
    });
}

fn load_story_comments(
    environment: &DetailEnvironment,
    dispatcher: &Dispatcher<DetailAction>,
    state: &DetailUiState,
) {
    if state.comments.is_loading() {
        log::debug!("DetailMiddleware: comments already loading, skipping");
        return;
    }

    let source = match &state.story {
        Data::Success(story) => CommentSource::Ids(story.comment_ids.clone()),
        _ => CommentSource::Story(state.story_id),
    };
    let repository = Arc::clone(&environment.repository);
    let dispatcher = dispatcher.bind(environment.scope());
    environment.launch(async move {
        let result = match source {
            CommentSource::Ids(Some(ids)) => {
                log::info!("DetailMiddleware: loading {} comments", ids.len());
                repository.get_comments(&ids).await.map(Some)
            }
            CommentSource::Ids(None) => Ok(None),
            CommentSource::Story(Some(id)) => {
                log::info!("DetailMiddleware: loading comments of story {}", id);
                repository.get_story_comments(id).await
            }
            CommentSource::Story(None) => Err(anyhow!("No story selected")),
        };
        let result = result
            .map(|comments| comments.map(|comments| comments.iter().map(detail_comment_row).collect()))
            .map_err(|e| {
                log::warn!("DetailMiddleware: failed to load comments: {}", e);
                DetailError::LoadStoryComments(error_message(&e))
            });
        send(&dispatcher, DetailAction::LoadStoryCommentsResult(result)).await;
    });
}

/// All detail side effects, for the single-reducer wiring
pub struct DetailMiddleware {
    environment: DetailEnvironment,
}

impl DetailMiddleware {
    pub fn new(environment: DetailEnvironment) -> Self {
        Self { environment }
    }
}

impl Middleware<DetailUiState, DetailAction> for DetailMiddleware {
    fn process(
        &self,
        order: Order,
        dispatcher: &Dispatcher<DetailAction>,
        state: &DetailUiState,
        action: &DetailAction,
    ) {
        if order == Order::AfterReduce {
            return;
        }

        match action {
            DetailAction::LoadStory => load_story(&self.environment, dispatcher, state),
            DetailAction::LoadStoryComments => {
                load_story_comments(&self.environment, dispatcher, state)
            }
            DetailAction::SetInitialStory(_)
            | DetailAction::LoadStoryResult(_)
            | DetailAction::LoadStoryCommentsResult(_) => {}
        }
    }
}

/// `LoadStory` side effect for the routed wiring
pub struct LoadStoryEffect {
    environment: DetailEnvironment,
}

impl LoadStoryEffect {
    pub fn new(environment: DetailEnvironment) -> Self {
        Self { environment }
    }
}

impl Middleware<DetailUiState, DetailAction> for LoadStoryEffect {
    fn process(
        &self,
        order: Order,
        dispatcher: &Dispatcher<DetailAction>,
        state: &DetailUiState,
        action: &DetailAction,
    ) {
        if order == Order::BeforeReduce && matches!(action, DetailAction::LoadStory) {
            load_story(&self.environment, dispatcher, state);
        }
    }
}

/// `LoadStoryComments` side effect for the routed wiring
pub struct LoadStoryCommentsEffect {
    environment: DetailEnvironment,
}

impl LoadStoryCommentsEffect {
    pub fn new(environment: DetailEnvironment) -> Self {
        Self { environment }
    }
}

impl Middleware<DetailUiState, DetailAction> for LoadStoryCommentsEffect {
    fn process(
        &self,
        order: Order,
        dispatcher: &Dispatcher<DetailAction>,
        state: &DetailUiState,
        action: &DetailAction,
    ) {
        if order == Order::BeforeReduce && matches!(action, DetailAction::LoadStoryComments) {
            load_story_comments(&self.environment, dispatcher, state);
        }
    }
}
