//! List side effects
//!
//! Fetches start in the `BeforeReduce` hook, while the state still shows
//! whether a load of the same resource is already in flight. Results come
//! back as `*Result` actions through a dispatcher bound to the environment
//! scope, so nothing lands in the store after the owner is torn down.

use super::actions::ListAction;
use super::state::{ListError, ListUiSortCondition, ListUiState};
use crate::mapper::list_row;
use crate::repository::{error_message, HackerNewsRepository};
use knews_redux::{Dispatcher, Environment, Middleware, Order, Scope};
use std::sync::Arc;

/// Scope and data access for list side effects
#[derive(Clone)]
pub struct ListEnvironment {
    scope: Scope,
    repository: Arc<dyn HackerNewsRepository>,
}

impl ListEnvironment {
    pub fn new(scope: Scope, repository: Arc<dyn HackerNewsRepository>) -> Self {
        Self { scope, repository }
    }
}

impl Environment for ListEnvironment {
    fn scope(&self) -> &Scope {
        &self.scope
    }
}

async fn send(dispatcher: &Dispatcher<ListAction>, action: ListAction) {
    if let Err(e) = dispatcher.dispatch(action).await {
        log::debug!("ListMiddleware: result dropped: {}", e);
    }
}

fn load_stories(environment: &ListEnvironment, dispatcher: &Dispatcher<ListAction>, state: &ListUiState) {
    if state.stories.is_loading() {
        log::debug!("ListMiddleware: stories already loading, skipping");
        return;
    }

    let repository = Arc::clone(&environment.repository);
    let dispatcher = dispatcher.bind(environment.scope());
    environment.launch(async move {
        log::info!("ListMiddleware: loading top stories");
        let result = repository
            .get_top_stories(1)
            .await
            .map(|stories| stories.unwrap_or_default().iter().map(list_row).collect())
            .map_err(|e| {
                log::warn!("ListMiddleware: failed to load top stories: {}", e);
                ListError::LoadStories(error_message(&e))
            });
        send(&dispatcher, ListAction::LoadStoriesResult(result)).await;
    });
}

fn load_next_stories(
    environment: &ListEnvironment,
    dispatcher: &Dispatcher<ListAction>,
    state: &ListUiState,
    page: usize,
) {
    if state.next_stories.is_loading() {
        log::debug!("ListMiddleware: next page already loading, skipping page {}", page);
        return;
    }

    let dispatcher = dispatcher.bind(environment.scope());
    if !state.stories.is_success() {
        log::warn!(
            "ListMiddleware: page {} requested before the first page loaded",
            page
        );
        environment.launch(async move {
            let result = Err(ListError::DataInconsistency);
            send(&dispatcher, ListAction::LoadNextStoriesResult(result)).await;
        });
        return;
    }

    let repository = Arc::clone(&environment.repository);
    environment.launch(async move {
        log::info!("ListMiddleware: loading page {}", page);
        let result = repository
            .get_top_stories(page)
            .await
            .map(|stories| stories.map(|stories| stories.iter().map(list_row).collect()))
            .map_err(|e| {
                log::warn!("ListMiddleware: failed to load page {}: {}", page, e);
                ListError::LoadNextStories(error_message(&e))
            });
        send(&dispatcher, ListAction::LoadNextStoriesResult(result)).await;
    });
}

fn sort(
    environment: &ListEnvironment,
    dispatcher: &Dispatcher<ListAction>,
    state: &ListUiState,
    condition: ListUiSortCondition,
) {
    // served order cannot be rebuilt from a sorted list
    if condition != ListUiSortCondition::None || state.sort_condition == ListUiSortCondition::None {
        return;
    }
    if !state.stories.is_complete() {
        log::debug!("ListMiddleware: nothing loaded yet, no reload for served order");
        return;
    }

    log::debug!("ListMiddleware: back to served order, reloading stories");
    let dispatcher = dispatcher.bind(environment.scope());
    environment.launch(async move {
        send(&dispatcher, ListAction::LoadStories).await;
    });
}

/// All list side effects, for the single-reducer wiring
pub struct ListMiddleware {
    environment: ListEnvironment,
}

impl ListMiddleware {
    pub fn new(environment: ListEnvironment) -> Self {
        Self { environment }
    }
}

impl Middleware<ListUiState, ListAction> for ListMiddleware {
    fn process(
        &self,
        order: Order,
        dispatcher: &Dispatcher<ListAction>,
        state: &ListUiState,
        action: &ListAction,
    ) {
        if order == Order::AfterReduce {
            return;
        }

        match action {
            ListAction::LoadStories => load_stories(&self.environment, dispatcher, state),
            ListAction::LoadNextStories(page) => {
                load_next_stories(&self.environment, dispatcher, state, *page)
            }
            ListAction::Sort(condition) => sort(&self.environment, dispatcher, state, *condition),
            ListAction::LoadStoriesResult(_) | ListAction::LoadNextStoriesResult(_) => {}
        }
    }
}

/// `LoadStories` side effect for the routed wiring
pub struct LoadStoriesEffect {
    environment: ListEnvironment,
}

impl LoadStoriesEffect {
    pub fn new(environment: ListEnvironment) -> Self {
        Self { environment }
    }
}

impl Middleware<ListUiState, ListAction> for LoadStoriesEffect {
    fn process(
        &self,
        order: Order,
        dispatcher: &Dispatcher<ListAction>,
        state: &ListUiState,
        action: &ListAction,
    ) {
        if order == Order::BeforeReduce && matches!(action, ListAction::LoadStories) {
            load_stories(&self.environment, dispatcher, state);
        }
    }
}

/// `LoadNextStories` side effect for the routed wiring
pub struct LoadNextStoriesEffect {
    environment: ListEnvironment,
}

impl LoadNextStoriesEffect {
    pub fn new(environment: ListEnvironment) -> Self {
        Self { environment }
    }
}

impl Middleware<ListUiState, ListAction> for LoadNextStoriesEffect {
    fn process(
        &self,
        order: Order,
        dispatcher: &Dispatcher<ListAction>,
        state: &ListUiState,
        action: &ListAction,
    ) {
        if let (Order::BeforeReduce, ListAction::LoadNextStories(page)) = (order, action) {
            load_next_stories(&self.environment, dispatcher, state, *page);
        }
    }
}

/// `Sort` side effect for the routed wiring
pub struct SortEffect {
    environment: ListEnvironment,
}

impl SortEffect {
    pub fn new(environment: ListEnvironment) -> Self {
        Self { environment }
    }
}

impl Middleware<ListUiState, ListAction> for SortEffect {
    fn process(
        &self,
        order: Order,
        dispatcher: &Dispatcher<ListAction>,
        state: &ListUiState,
        action: &ListAction,
    ) {
        if let (Order::BeforeReduce, ListAction::Sort(condition)) = (order, action) {
            sort(&self.environment, dispatcher, state, *condition);
        }
    }
}
