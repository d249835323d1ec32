mod folder;
mod folder_id;
mod mutation;
mod peer;

pub use folder::FolderSpec;
pub use folder::MAX_FOLDERS;
pub use folder::MAX_TITLE_LEN;
pub use folder::RemoteFolder;
pub use folder::RemoteFolderBuilder;
pub use folder_id::FolderId;
pub use mutation::Mutation;
pub use peer::Peer;
pub use peer::PeerKey;
pub use peer::PeerKind;
