use std::collections::HashMap;

use log::trace;
use thiserror::Error;

use crate::{
    catalog::Catalog,
    repository::{FolderId, MAX_FOLDERS, Mutation, RemoteFolder},
};

#[derive(Debug, Error, PartialEq)]
#[error(
    "account holds {existing} folders, creating {missing} more would exceed the limit of {max}",
    max = MAX_FOLDERS
)]
pub struct FolderLimitError {
    pub existing: usize,
    pub missing: usize,
}

/// Computes the changes that bring the managed folders of an account in line
/// with `catalog`.
///
/// Mutations come out in catalog order. Folders the catalog does not know are
/// never looked at, and nothing is ever deleted. Renames carry the observed
/// member list so the write does not clear it.
pub fn plan(catalog: &Catalog, remote: &[RemoteFolder]) -> Result<Vec<Mutation>, FolderLimitError> {
    let remote: HashMap<FolderId, &RemoteFolder> =
        remote.iter().map(|folder| (folder.id(), folder)).collect();

    let mut mutations = Vec::new();
    for spec in catalog.specs() {
        match remote.get(&spec.id()) {
            None => {
                trace!("folder {} missing", spec.id());
                mutations.push(Mutation::CreateFolder {
                    id: spec.id(),
                    title: spec.title().clone(),
                });
            }
            Some(folder) if folder.title() != spec.title() => {
                trace!(
                    "folder {} titled \"{}\" instead of \"{}\"",
                    spec.id(),
                    folder.title(),
                    spec.title()
                );
                mutations.push(Mutation::RenameFolder {
                    id: spec.id(),
                    new_title: spec.title().clone(),
                    peers: folder.peers().clone(),
                });
            }
            Some(_) => trace!("folder {} up to date", spec.id()),
        }
    }

    let missing = mutations
        .iter()
        .filter(|mutation| matches!(mutation, Mutation::CreateFolder { .. }))
        .count();
    if missing > 0 && remote.len() + missing > MAX_FOLDERS {
        return Err(FolderLimitError {
            existing: remote.len(),
            missing,
        });
    }

    Ok(mutations)
}
