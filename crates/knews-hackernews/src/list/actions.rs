use super::state::{ListError, ListUiRowState, ListUiSortCondition};
use knews_redux::Identifiable;
use strum::{EnumDiscriminants, EnumIter};

#[derive(Debug, Clone, PartialEq, Eq, EnumDiscriminants)]
#[strum_discriminants(name(ListActionKind), derive(Hash, EnumIter))]
pub enum ListAction {
    /// (Re)load the first page
    LoadStories,
    LoadStoriesResult(Result<Vec<ListUiRowState>, ListError>),
    /// Load the given 1-based page and append it
    LoadNextStories(usize),
    LoadNextStoriesResult(Result<Option<Vec<ListUiRowState>>, ListError>),
    Sort(ListUiSortCondition),
}

impl Identifiable for ListAction {
    type Kind = ListActionKind;

    fn kind(&self) -> ListActionKind {
        self.into()
    }
}
