use super::state::{DetailError, DetailUiCommentRowState, DetailUiStoryState};
use knews_redux::Identifiable;
use strum::{EnumDiscriminants, EnumIter};

#[derive(Debug, Clone, PartialEq, Eq, EnumDiscriminants)]
#[strum_discriminants(name(DetailActionKind), derive(Hash, EnumIter))]
pub enum DetailAction {
    /// Seed the story from a value the caller already has, skipping the fetch
    SetInitialStory(DetailUiStoryState),
    LoadStory,
    LoadStoryResult(Result<DetailUiStoryState, DetailError>),
    LoadStoryComments,
    LoadStoryCommentsResult(Result<Option<Vec<DetailUiCommentRowState>>, DetailError>),
}

impl Identifiable for DetailAction {
    type Kind = DetailActionKind;

    fn kind(&self) -> DetailActionKind {
        self.into()
    }
}
