//! List reducers
//!
//! One function per action kind. Each returns the state unchanged for any
//! other action, so they can be registered one by one in a routed store or
//! combined through `reduce`.

use super::actions::ListAction;
use super::state::{ListUiRowState, ListUiState};
use crate::data::Data;

pub fn reduce(state: ListUiState, action: &ListAction) -> ListUiState {
    match action {
        ListAction::LoadStories => load_stories(state, action),
        ListAction::LoadStoriesResult(_) => load_stories_result(state, action),
        ListAction::LoadNextStories(_) => load_next_stories(state, action),
        ListAction::LoadNextStoriesResult(_) => load_next_stories_result(state, action),
        ListAction::Sort(_) => sort(state, action),
    }
}

pub fn load_stories(state: ListUiState, action: &ListAction) -> ListUiState {
    let ListAction::LoadStories = action else {
        return state;
    };
    ListUiState {
        stories: Data::Loading(state.stories.into_value()),
        ..state
    }
}

pub fn load_stories_result(state: ListUiState, action: &ListAction) -> ListUiState {
    let ListAction::LoadStoriesResult(result) = action else {
        return state;
    };
    let stories = result.clone().map(|mut rows| {
        state.sort_condition.sort(&mut rows);
        rows
    });
    ListUiState {
        stories: stories.into(),
        ..state
    }
}

pub fn load_next_stories(state: ListUiState, action: &ListAction) -> ListUiState {
    let ListAction::LoadNextStories(_) = action else {
        return state;
    };
    if state.next_stories.is_loading() {
        return state;
    }
    ListUiState {
        next_stories: Data::Loading(None),
        ..state
    }
}

pub fn load_next_stories_result(state: ListUiState, action: &ListAction) -> ListUiState {
    let ListAction::LoadNextStoriesResult(result) = action else {
        return state;
    };
    match result {
        Ok(page) => {
            let sort_condition = state.sort_condition;
            let stories = state.stories.map(|mut rows: Vec<ListUiRowState>| {
                rows.extend(page.iter().flatten().cloned());
                sort_condition.sort(&mut rows);
                rows
            });
            ListUiState {
                stories,
                next_stories: Data::Success(page.clone()),
                ..state
            }
        }
        Err(error) => ListUiState {
            next_stories: Data::Failure(error.clone()),
            ..state
        },
    }
}

pub fn sort(state: ListUiState, action: &ListAction) -> ListUiState {
    let ListAction::Sort(condition) = action else {
        return state;
    };
    if *condition == state.sort_condition {
        return state;
    }
    ListUiState {
        sort_condition: *condition,
        stories: state.stories.map(|mut rows| {
            condition.sort(&mut rows);
            rows
        }),
        ..state
    }
}
