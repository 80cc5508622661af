use super::actions::ListAction;
use super::middleware::ListEnvironment;
use super::state::{ListUiSortCondition, ListUiState};
use super::store::{list_store, ListStore};
use crate::config::store_options;
use crate::repository::{HackerNewsRepository, HackerNewsRepositoryImpl, HackerNewsService};
use futures::Stream;
use knews_config::AppConfig;
use knews_redux::{Scope, StoreError, StoreOptions};
use std::sync::Arc;

/// Owner of the list store and of the scope its side effects run on
///
/// Dropping the view model cancels the scope: in-flight fetches are aborted
/// and the store stops accepting actions.
pub struct ListViewModel {
    scope: Scope,
    store: ListStore,
    current_page: usize,
}

impl ListViewModel {
    /// Create on the current tokio runtime, tuned by `config`
    pub fn new<S: HackerNewsService + 'static>(service: S, config: &AppConfig) -> Self {
        let repository =
            HackerNewsRepositoryImpl::with_page_size(service, config.repository.page_size);
        Self::with_repository(Arc::new(repository), store_options(config))
    }

    pub fn with_repository(
        repository: Arc<dyn HackerNewsRepository>,
        options: StoreOptions,
    ) -> Self {
        let scope = Scope::current();
        let store = list_store(ListEnvironment::new(scope.clone(), repository), options);
        Self {
            scope,
            store,
            current_page: 1,
        }
    }

    pub fn states(&self) -> impl Stream<Item = ListUiState> + Unpin + Send + 'static {
        self.store.states()
    }

    pub fn current_state(&self) -> ListUiState {
        self.store.current_state()
    }

    /// Last page requested
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Reload from the first page
    pub async fn load_stories(&mut self) -> Result<(), StoreError> {
        self.current_page = 1;
        self.store.dispatch(ListAction::LoadStories).await
    }

    pub async fn load_next_stories(&mut self) -> Result<(), StoreError> {
        self.current_page += 1;
        self.store
            .dispatch(ListAction::LoadNextStories(self.current_page))
            .await
    }

    pub async fn sort_by(&self, condition: ListUiSortCondition) -> Result<(), StoreError> {
        self.store.dispatch(ListAction::Sort(condition)).await
    }
}

impl Drop for ListViewModel {
    fn drop(&mut self) {
        log::debug!("ListViewModel: dropped, cancelling scope");
        self.scope.cancel();
    }
}
