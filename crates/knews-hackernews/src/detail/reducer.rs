use super::actions::DetailAction;
use super::state::DetailUiState;
use crate::data::Data;

pub fn reduce(state: DetailUiState, action: &DetailAction) -> DetailUiState {
    match action {
        DetailAction::SetInitialStory(_) => set_initial_story(state, action),
        DetailAction::LoadStory => load_story(state, action),
        DetailAction::LoadStoryResult(_) => load_story_result(state, action),
        DetailAction::LoadStoryComments => load_story_comments(state, action),
        DetailAction::LoadStoryCommentsResult(_) => load_story_comments_result(state, action),
    }
}

pub fn set_initial_story(state: DetailUiState, action: &DetailAction) -> DetailUiState {
    let DetailAction::SetInitialStory(story) = action else {
        return state;
    };
    DetailUiState {
        story_id: Some(story.id),
        story: Data::Success(story.clone()),
        ..state
    }
}

pub fn load_story(state: DetailUiState, action: &DetailAction) -> DetailUiState {
    let DetailAction::LoadStory = action else {
        return state;
    };
    DetailUiState {
        story: Data::Loading(state.story.into_value()),
        ..state
    }
}

pub fn load_story_result(state: DetailUiState, action: &DetailAction) -> DetailUiState {
    let DetailAction::LoadStoryResult(result) = action else {
        return state;
    };
    DetailUiState {
        story: result.clone().into(),
        ..state
    }
}

pub fn load_story_comments(state: DetailUiState, action: &DetailAction) -> DetailUiState {
    let DetailAction::LoadStoryComments = action else {
        return state;
    };
    DetailUiState {
        comments: Data::Loading(state.comments.into_value()),
        ..state
    }
}

pub fn load_story_comments_result(state: DetailUiState, action: &DetailAction) -> DetailUiState {
    let DetailAction::LoadStoryCommentsResult(result) = action else {
        return state;
    };
    DetailUiState {
        comments: result.clone().into(),
        ..state
    }
}
