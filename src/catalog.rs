use std::collections::HashSet;

use log::trace;
use thiserror::Error;

use crate::repository::{FolderId, FolderSpec, MAX_FOLDERS, MAX_TITLE_LEN};

#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("folder {0} is declared more than once")]
    DuplicateId(FolderId),
    #[error("folder {0} has an empty title")]
    EmptyTitle(FolderId),
    #[error(
        "title of folder {id} has {len} characters, at most {max} are allowed",
        max = MAX_TITLE_LEN
    )]
    TitleTooLong { id: FolderId, len: usize },
    #[error("{0} folders declared, an account holds at most {max}", max = MAX_FOLDERS)]
    TooManyFolders(usize),
    #[error("folder {0} is not managed")]
    UnknownFolder(FolderId),
}

/// The managed folders and the titles they should carry.
///
/// Entries are validated on construction and kept in ascending id order, so
/// everything derived from a catalog comes out in a reproducible order.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    specs: Vec<FolderSpec>,
}

impl Catalog {
    pub fn new(specs: impl IntoIterator<Item = FolderSpec>) -> Result<Self, CatalogError> {
        let mut specs: Vec<FolderSpec> = specs.into_iter().collect();
        if specs.len() > MAX_FOLDERS {
            return Err(CatalogError::TooManyFolders(specs.len()));
        }

        let mut seen = HashSet::with_capacity(specs.len());
        for spec in &specs {
            if !seen.insert(spec.id()) {
                return Err(CatalogError::DuplicateId(spec.id()));
            }
            if spec.title().trim().is_empty() {
                return Err(CatalogError::EmptyTitle(spec.id()));
            }
            let len = spec.title().chars().count();
            if len > MAX_TITLE_LEN {
                return Err(CatalogError::TitleTooLong { id: spec.id(), len });
            }
        }
        specs.sort_unstable_by_key(FolderSpec::id);
        trace!("catalog = {specs:?}");

        Ok(Self { specs })
    }

    pub fn specs(&self) -> &[FolderSpec] {
        &self.specs
    }

    pub fn get(&self, id: FolderId) -> Option<&FolderSpec> {
        self.specs
            .binary_search_by_key(&id, FolderSpec::id)
            .ok()
            .map(|index| &self.specs[index])
    }

    pub fn contains(&self, id: FolderId) -> bool {
        self.get(id).is_some()
    }

    /// Looks up a managed folder, failing for ids outside the catalog.
    pub fn require(&self, id: FolderId) -> Result<&FolderSpec, CatalogError> {
        self.get(id).ok_or(CatalogError::UnknownFolder(id))
    }
}
