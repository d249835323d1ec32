use thiserror::Error;

use crate::{
    catalog::CatalogError,
    repository::{FolderId, Mutation},
    sync::{FolderLimitError, ResolutionError, TransportError},
};

/// A batch of mutations stopped at `failed`.
///
/// Everything in `applied` is committed on the account, `failed` and
/// `pending` are not. Running the same operation again only redoes what is
/// still missing.
#[derive(Debug, Error)]
#[error(
    "{failed} failed after {} of {} changes",
    .applied.len(),
    .applied.len() + 1 + .pending.len()
)]
pub struct ApplyError {
    pub applied: Vec<Mutation>,
    pub failed: Mutation,
    pub pending: Vec<Mutation>,
    pub converged: Vec<FolderId>,
    #[source]
    pub source: TransportError,
}

impl ApplyError {
    /// Folders with changes that did not reach the account, ascending.
    pub fn unconverged(&self) -> Vec<FolderId> {
        let mut ids: Vec<FolderId> = std::iter::once(&self.failed)
            .chain(&self.pending)
            .map(Mutation::folder_id)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("invalid folder configuration")]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    FolderLimit(#[from] FolderLimitError),
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    #[error("fetching folders failed")]
    Fetch(#[source] TransportError),
    #[error(transparent)]
    Apply(#[from] ApplyError),
}

#[cfg(test)]
mod tests {
    use assertables::*;
    use rstest::*;

    use super::*;

    fn id(n: u32) -> FolderId {
        assert_ok!(FolderId::try_from(n))
    }

    fn create(n: u32) -> Mutation {
        Mutation::CreateFolder {
            id: id(n),
            title: format!("Folder {n}"),
        }
    }

    #[fixture]
    fn error() -> ApplyError {
        ApplyError {
            applied: vec![create(1)],
            failed: create(3),
            pending: vec![create(2), create(3)],
            converged: vec![id(1), id(4)],
            source: TransportError::new("apply failed", "FLOOD_WAIT"),
        }
    }

    #[rstest]
    fn test_unconverged_is_sorted_and_unique(error: ApplyError) {
        assert_eq!(vec![id(2), id(3)], error.unconverged());
    }

    #[rstest]
    fn test_message_names_failed_change_and_progress(error: ApplyError) {
        assert_eq!(
            "create folder 3 \"Folder 3\" failed after 1 of 4 changes",
            error.to_string()
        );
    }
}
