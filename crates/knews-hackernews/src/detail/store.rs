use super::actions::{DetailAction, DetailActionKind};
use super::middleware::{
    DetailEnvironment, DetailMiddleware, LoadStoryCommentsEffect, LoadStoryEffect,
};
use super::reducer;
use super::state::DetailUiState;
use knews_redux::{
    Environment, LoggingMiddleware, RoutedStoreBuilder, Store, StoreError, StoreOptions,
};
use std::sync::Arc;

pub type DetailStore = Store<DetailUiState, DetailAction>;

/// Detail store with one reducer and one middleware for every action
pub fn detail_store(
    environment: DetailEnvironment,
    initial_state: DetailUiState,
    options: StoreOptions,
) -> DetailStore {
    let scope = environment.scope().clone();
    Store::with_options(&scope, initial_state, reducer::reduce, options)
        .with_middleware(Arc::new(DetailMiddleware::new(environment)))
        .with_middleware(Arc::new(LoggingMiddleware::new("knews::detail")))
}

/// Detail store routed by action kind
pub fn routed_store(
    environment: DetailEnvironment,
    initial_state: DetailUiState,
    options: StoreOptions,
) -> Result<DetailStore, StoreError> {
    let scope = environment.scope().clone();
    RoutedStoreBuilder::<DetailUiState, DetailAction>::new()
        .options(options)
        .reducer(DetailActionKind::SetInitialStory, reducer::set_initial_story)
        .reducer(DetailActionKind::LoadStory, reducer::load_story)
        .reducer(DetailActionKind::LoadStoryResult, reducer::load_story_result)
        .reducer(DetailActionKind::LoadStoryComments, reducer::load_story_comments)
        .reducer(
            DetailActionKind::LoadStoryCommentsResult,
            reducer::load_story_comments_result,
        )
        .middleware(
            DetailActionKind::LoadStory,
            Arc::new(LoadStoryEffect::new(environment.clone())),
        )
        .middleware(
            DetailActionKind::LoadStoryComments,
            Arc::new(LoadStoryCommentsEffect::new(environment)),
        )
        .build(&scope, initial_state)
        .map(|store| store.with_middleware(Arc::new(LoggingMiddleware::new("knews::detail"))))
}
