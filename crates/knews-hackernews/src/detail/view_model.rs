use super::actions::DetailAction;
use super::middleware::DetailEnvironment;
use super::state::{DetailUiState, DetailUiStoryState};
use super::store::{detail_store, DetailStore};
use crate::config::store_options;
use crate::repository::{HackerNewsRepository, HackerNewsRepositoryImpl, HackerNewsService};
use futures::Stream;
use knews_config::AppConfig;
use knews_redux::{Scope, StoreError, StoreOptions};
use std::sync::Arc;

/// Owner of the detail store and of the scope its side effects run on
pub struct DetailViewModel {
    scope: Scope,
    store: DetailStore,
}

impl DetailViewModel {
    pub fn new<S: HackerNewsService + 'static>(
        service: S,
        config: &AppConfig,
        initial_state: DetailUiState,
    ) -> Self {
        let repository =
            HackerNewsRepositoryImpl::with_page_size(service, config.repository.page_size);
        Self::with_repository(Arc::new(repository), initial_state, store_options(config))
    }

    pub fn with_repository(
        repository: Arc<dyn HackerNewsRepository>,
        initial_state: DetailUiState,
        options: StoreOptions,
    ) -> Self {
        let scope = Scope::current();
        let store = detail_store(
            DetailEnvironment::new(scope.clone(), repository),
            initial_state,
            options,
        );
        Self { scope, store }
    }

    pub fn states(&self) -> impl Stream<Item = DetailUiState> + Unpin + Send + 'static {
        self.store.states()
    }

    pub fn current_state(&self) -> DetailUiState {
        self.store.current_state()
    }

    /// Show a story the caller already has, e.g. a row picked from the list
    pub async fn set_initial_story(&self, story: DetailUiStoryState) -> Result<(), StoreError> {
        self.store.dispatch(DetailAction::SetInitialStory(story)).await
    }

    pub async fn load_story(&self) -> Result<(), StoreError> {
        self.store.dispatch(DetailAction::LoadStory).await
    }

    pub async fn load_story_comments(&self) -> Result<(), StoreError> {
        self.store.dispatch(DetailAction::LoadStoryComments).await
    }
}

impl Drop for DetailViewModel {
    fn drop(&mut self) {
        log::debug!("DetailViewModel: dropped, cancelling scope");
        self.scope.cancel();
    }
}
