use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

use crate::repository::{FolderId, Peer, PeerKey};

/// Longest folder title the platform accepts, in characters.
pub const MAX_TITLE_LEN: usize = 12;

/// Number of folders an account can hold.
pub const MAX_FOLDERS: usize = 10;

/// Desired state of one managed folder.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Getters)]
pub struct FolderSpec {
    #[getter(skip)]
    id: FolderId,
    title: String,
}

impl FolderSpec {
    pub fn new(id: FolderId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }

    pub fn id(&self) -> FolderId {
        self.id
    }
}

/// A folder as observed on the account at the start of a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, Builder)]
pub struct RemoteFolder {
    #[getter(skip)]
    id: FolderId,
    #[builder(setter(into))]
    title: String,
    #[serde(default)]
    #[builder(default)]
    peers: Vec<Peer>,
}

impl RemoteFolder {
    pub fn new(id: FolderId, title: impl Into<String>, peers: Vec<Peer>) -> Self {
        Self {
            id,
            title: title.into(),
            peers,
        }
    }

    pub fn id(&self) -> FolderId {
        self.id
    }

    pub fn contains(&self, key: PeerKey) -> bool {
        self.peers.iter().any(|peer| peer.key() == key)
    }
}
