use super::actions::{ListAction, ListActionKind};
use super::middleware::{
    ListEnvironment, ListMiddleware, LoadNextStoriesEffect, LoadStoriesEffect, SortEffect,
};
use super::reducer;
use super::state::ListUiState;
use knews_redux::{
    Environment, LoggingMiddleware, RoutedStoreBuilder, Store, StoreError, StoreOptions,
};
use std::sync::Arc;

pub type ListStore = Store<ListUiState, ListAction>;

/// List store with one reducer and one middleware for every action
pub fn list_store(environment: ListEnvironment, options: StoreOptions) -> ListStore {
    let scope = environment.scope().clone();
    Store::with_options(&scope, ListUiState::default(), reducer::reduce, options)
        .with_middleware(Arc::new(ListMiddleware::new(environment)))
        .with_middleware(Arc::new(LoggingMiddleware::new("knews::list")))
}

/// List store routed by action kind
pub fn routed_store(
    environment: ListEnvironment,
    options: StoreOptions,
) -> Result<ListStore, StoreError> {
    let scope = environment.scope().clone();
    RoutedStoreBuilder::<ListUiState, ListAction>::new()
        .options(options)
        .reducer(ListActionKind::LoadStories, reducer::load_stories)
        .reducer(ListActionKind::LoadStoriesResult, reducer::load_stories_result)
        .reducer(ListActionKind::LoadNextStories, reducer::load_next_stories)
        .reducer(
            ListActionKind::LoadNextStoriesResult,
            reducer::load_next_stories_result,
        )
        .reducer(ListActionKind::Sort, reducer::sort)
        .middleware(
            ListActionKind::LoadStories,
            Arc::new(LoadStoriesEffect::new(environment.clone())),
        )
        .middleware(
            ListActionKind::LoadNextStories,
            Arc::new(LoadNextStoriesEffect::new(environment.clone())),
        )
        .middleware(ListActionKind::Sort, Arc::new(SortEffect::new(environment)))
        .build(&scope, ListUiState::default())
        .map(|store| store.with_middleware(Arc::new(LoggingMiddleware::new("knews::list"))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Data;
    use crate::list::{ListError, ListUiSortCondition};
    use crate::repository::HackerNewsRepositoryImpl;
    use crate::test_support::{
        init_logger, wait_for, MockService, NextPageFailureMockService, StoryFailureMockService,
    };
    use crate::HackerNewsService;
    use knews_redux::Scope;

    type Wiring = fn(ListEnvironment) -> ListStore;

    fn single(environment: ListEnvironment) -> ListStore {
        list_store(environment, StoreOptions::default())
    }

    fn routed(environment: ListEnvironment) -> ListStore {
        routed_store(environment, StoreOptions::default()).unwrap()
    }

    const WIRINGS: [(&str, Wiring); 2] = [("single", single), ("routed", routed)];

    fn environment<S: HackerNewsService + 'static>(scope: &Scope, service: S) -> ListEnvironment {
        ListEnvironment::new(scope.clone(), Arc::new(HackerNewsRepositoryImpl::new(service)))
    }

    fn story_ids(state: &ListUiState) -> Vec<u64> {
        state
            .stories
            .value()
            .map(|rows| rows.iter().map(|r| r.id).collect())
            .unwrap_or_default()
    }

    fn scores(state: &ListUiState) -> Vec<i64> {
        state
            .stories
            .value()
            .map(|rows| rows.iter().map(|r| r.score).collect())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_load_stories_then_success() {
        init_logger();
        for (name, wiring) in WIRINGS {
            let scope = Scope::current();
            let store = wiring(environment(&scope, MockService::new((1..=10).collect())));
            let mut states = store.states();

            store.dispatch(ListAction::LoadStories).await.unwrap();

            let state = wait_for(&mut states, |s| s.stories.is_success()).await;
            assert_eq!(story_ids(&state), vec![1, 2, 3, 4, 5], "{}", name);
            assert!(state.next_stories.is_initial(), "{}", name);
            scope.cancel();
        }
    }

    #[tokio::test]
    async fn test_publishes_loading_before_success() {
        let scope = Scope::current();
        let store = single(environment(&scope, MockService::new((1..=10).collect())));
        let mut states = store.states();

        store.dispatch(ListAction::LoadStories).await.unwrap();

        assert!(wait_for(&mut states, |_| true).await.stories.is_initial());
        assert_eq!(wait_for(&mut states, |_| true).await.stories, Data::Loading(None));
        assert!(wait_for(&mut states, |_| true).await.stories.is_success());
        scope.cancel();
    }

    #[tokio::test]
    async fn test_load_stories_at_most_one_in_flight() {
        for (name, wiring) in WIRINGS {
            let scope = Scope::current();
            let service = MockService::new((1..=10).collect()).with_delay_millis(50);
            let store = wiring(environment(&scope, service.clone()));
            let mut states = store.states();

            store.dispatch(ListAction::LoadStories).await.unwrap();
            store.dispatch(ListAction::LoadStories).await.unwrap();

            wait_for(&mut states, |s| s.stories.is_success()).await;
            assert_eq!(service.top_stories_calls(), 1, "{}", name);
            scope.cancel();
        }
    }

    #[tokio::test]
    async fn test_next_pages_append_until_the_end() {
        for (name, wiring) in WIRINGS {
            let scope = Scope::current();
            let store = wiring(environment(&scope, MockService::new((1..=10).collect())));
            let mut states = store.states();

            store.dispatch(ListAction::LoadStories).await.unwrap();
            wait_for(&mut states, |s| s.stories.is_success()).await;

            store.dispatch(ListAction::LoadNextStories(2)).await.unwrap();
            let state = wait_for(&mut states, |s| s.next_stories.is_success()).await;
            assert_eq!(story_ids(&state), (1..=10).collect::<Vec<_>>(), "{}", name);

            store.dispatch(ListAction::LoadNextStories(3)).await.unwrap();
            let state = wait_for(&mut states, |s| s.next_stories == Data::Success(None)).await;
            assert_eq!(story_ids(&state).len(), 10, "{}", name);
            scope.cancel();
        }
    }

    #[tokio::test]
    async fn test_load_stories_failure() {
        for (name, wiring) in WIRINGS {
            let scope = Scope::current();
            let store = wiring(environment(&scope, StoryFailureMockService));
            let mut states = store.states();

            store.dispatch(ListAction::LoadStories).await.unwrap();

            let state = wait_for(&mut states, |s| s.stories.is_failure()).await;
            assert!(
                matches!(state.stories.error(), Some(ListError::LoadStories(_))),
                "{}",
                name
            );
            scope.cancel();
        }
    }

    #[tokio::test]
    async fn test_next_page_before_first_page_is_inconsistent() {
        for (name, wiring) in WIRINGS {
            let scope = Scope::current();
            let service = MockService::new((1..=10).collect());
            let store = wiring(environment(&scope, service.clone()));
            let mut states = store.states();

            store.dispatch(ListAction::LoadNextStories(2)).await.unwrap();

            let state = wait_for(&mut states, |s| s.next_stories.is_failure()).await;
            assert_eq!(
                state.next_stories,
                Data::Failure(ListError::DataInconsistency),
                "{}",
                name
            );
            assert!(state.stories.is_initial(), "{}", name);
            assert_eq!(service.top_stories_calls(), 0, "{}", name);
            assert_eq!(service.story_calls(), 0, "{}", name);
            scope.cancel();
        }
    }

    #[tokio::test]
    async fn test_next_page_failure_keeps_stories() {
        for (name, wiring) in WIRINGS {
            let scope = Scope::current();
            let store = wiring(environment(&scope, NextPageFailureMockService));
            let mut states = store.states();

            store.dispatch(ListAction::LoadStories).await.unwrap();
            wait_for(&mut states, |s| s.stories.is_success()).await;
            store.dispatch(ListAction::LoadNextStories(2)).await.unwrap();

            let state = wait_for(&mut states, |s| s.next_stories.is_failure()).await;
            assert!(
                matches!(state.next_stories.error(), Some(ListError::LoadNextStories(_))),
                "{}",
                name
            );
            assert_eq!(story_ids(&state), vec![1, 2, 3, 4, 5], "{}", name);
            scope.cancel();
        }
    }

    #[tokio::test]
    async fn test_sort_after_next_page() {
        for (name, wiring) in WIRINGS {
            let scope = Scope::current();
            let store = wiring(environment(&scope, MockService::new((1..=10).collect())));
            let mut states = store.states();

            store.dispatch(ListAction::LoadStories).await.unwrap();
            wait_for(&mut states, |s| s.stories.is_success()).await;
            store.dispatch(ListAction::LoadNextStories(2)).await.unwrap();
            wait_for(&mut states, |s| s.next_stories.is_success()).await;

            store
                .dispatch(ListAction::Sort(ListUiSortCondition::Score))
                .await
                .unwrap();
            let state = wait_for(&mut states, |s| {
                s.sort_condition == ListUiSortCondition::Score
            })
            .await;
            assert_eq!(&scores(&state)[..2], &[1000, 900], "{}", name);

            // a second identical sort changes nothing
            store
                .dispatch(ListAction::Sort(ListUiSortCondition::Score))
                .await
                .unwrap();
            let again = wait_for(&mut states, |_| true).await;
            assert_eq!(again, state, "{}", name);
            scope.cancel();
        }
    }

    #[tokio::test]
    async fn test_sort_before_load_applies_to_results() {
        let scope = Scope::current();
        let store = single(environment(&scope, MockService::new((1..=10).collect())));
        let mut states = store.states();

        store
            .dispatch(ListAction::Sort(ListUiSortCondition::Score))
            .await
            .unwrap();
        store.dispatch(ListAction::LoadStories).await.unwrap();
        let state = wait_for(&mut states, |s| s.stories.is_success()).await;
        assert_eq!(scores(&state), vec![500, 400, 300, 200, 100]);

        store.dispatch(ListAction::LoadNextStories(2)).await.unwrap();
        let state = wait_for(&mut states, |s| s.next_stories.is_success()).await;
        assert_eq!(&scores(&state)[..2], &[1000, 900]);
        scope.cancel();
    }

    #[tokio::test]
    async fn test_switching_to_no_sort_reloads() {
        for (name, wiring) in WIRINGS {
            let scope = Scope::current();
            let service = MockService::new((1..=10).collect());
            let store = wiring(environment(&scope, service.clone()));
            let mut states = store.states();

            store
                .dispatch(ListAction::Sort(ListUiSortCondition::Score))
                .await
                .unwrap();
            store.dispatch(ListAction::LoadStories).await.unwrap();
            wait_for(&mut states, |s| s.stories.is_success()).await;
            assert_eq!(service.top_stories_calls(), 1, "{}", name);

            store
                .dispatch(ListAction::Sort(ListUiSortCondition::None))
                .await
                .unwrap();
            wait_for(&mut states, |s| s.stories.is_loading()).await;
            let state = wait_for(&mut states, |s| s.stories.is_success()).await;

            assert_eq!(story_ids(&state), vec![1, 2, 3, 4, 5], "{}", name);
            assert_eq!(service.top_stories_calls(), 2, "{}", name);
            scope.cancel();
        }
    }

    #[tokio::test]
    async fn test_no_sort_before_load_does_not_fetch() {
        for (name, wiring) in WIRINGS {
            let scope = Scope::current();
            let service = MockService::new((1..=10).collect());
            let store = wiring(environment(&scope, service.clone()));
            let mut states = store.states();

            store
                .dispatch(ListAction::Sort(ListUiSortCondition::Score))
                .await
                .unwrap();
            store
                .dispatch(ListAction::Sort(ListUiSortCondition::None))
                .await
                .unwrap();
            // the replayed state already has no sort
            wait_for(&mut states, |s| {
                s.sort_condition == ListUiSortCondition::Score
            })
            .await;
            let state = wait_for(&mut states, |s| {
                s.sort_condition == ListUiSortCondition::None
            })
            .await;
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;

            assert!(state.stories.is_initial(), "{}", name);
            assert!(store.current_state().stories.is_initial(), "{}", name);
            assert_eq!(service.top_stories_calls(), 0, "{}", name);
            scope.cancel();
        }
    }

    #[tokio::test]
    async fn test_no_result_after_scope_cancelled() {
        let scope = Scope::current();
        let service = MockService::new((1..=10).collect()).with_delay_millis(50);
        let store = single(environment(&scope, service.clone()));

        store.dispatch(ListAction::LoadStories).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        scope.cancel();
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;

        assert_eq!(store.current_state().stories, Data::Loading(None));
        assert_eq!(
            store.dispatch(ListAction::LoadStories).await,
            Err(StoreError::Closed)
        );
    }
}
