use std::fmt::Display;

use crate::repository::{FolderId, Peer};

/// One remote change computed by a reconciliation pass or a peer operation.
///
/// The platform writes title and members of a folder in one call. Every
/// variant that touches an existing folder therefore carries the complete
/// member list to submit, so nothing can fall back to an empty set by
/// accident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    CreateFolder {
        id: FolderId,
        title: String,
    },
    RenameFolder {
        id: FolderId,
        new_title: String,
        /// Members observed before the rename, echoed verbatim.
        peers: Vec<Peer>,
    },
    AddPeer {
        folder_id: FolderId,
        /// Title observed on the account, echoed verbatim.
        title: String,
        peer: Peer,
        /// Previous members followed by `peer`.
        peers: Vec<Peer>,
    },
    RemovePeer {
        folder_id: FolderId,
        title: String,
        peer: Peer,
        /// Previous members without `peer`, in their previous order.
        peers: Vec<Peer>,
    },
}

/// The single folder write a [`Mutation`] boils down to.
#[derive(Debug, PartialEq, Eq)]
pub struct FolderUpdate<'a> {
    pub id: FolderId,
    pub title: &'a str,
    pub peers: &'a [Peer],
}

impl Mutation {
    pub fn folder_id(&self) -> FolderId {
        match self {
            Mutation::CreateFolder { id, .. } | Mutation::RenameFolder { id, .. } => *id,
            Mutation::AddPeer { folder_id, .. } | Mutation::RemovePeer { folder_id, .. } => {
                *folder_id
            }
        }
    }

    pub fn update(&self) -> FolderUpdate<'_> {
        match self {
            Mutation::CreateFolder { id, title } => FolderUpdate {
                id: *id,
                title,
                peers: &[],
            },
            Mutation::RenameFolder {
                id,
                new_title,
                peers,
            } => FolderUpdate {
                id: *id,
                title: new_title,
                peers,
            },
            Mutation::AddPeer {
                folder_id,
                title,
                peers,
                ..
            }
            | Mutation::RemovePeer {
                folder_id,
                title,
                peers,
                ..
            } => FolderUpdate {
                id: *folder_id,
                title,
                peers,
            },
        }
    }
}

impl Display for Mutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mutation::CreateFolder { id, title } => write!(f, "create folder {id} \"{title}\""),
            Mutation::RenameFolder {
                id,
                new_title,
                peers,
            } => write!(
                f,
                "rename folder {id} to \"{new_title}\" keeping {} peers",
                peers.len()
            ),
            Mutation::AddPeer {
                folder_id, peer, ..
            } => write!(f, "add {peer} to folder {folder_id}"),
            Mutation::RemovePeer {
                folder_id, peer, ..
            } => write!(f, "remove {peer} from folder {folder_id}"),
        }
    }
}
