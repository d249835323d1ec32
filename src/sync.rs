mod error;
mod merge;
mod plan;
mod syncer;
mod transport;

pub use error::ApplyError;
pub use error::SyncError;
pub use merge::Merge;
pub use merge::merge_peer;
pub use merge::move_peer;
pub use merge::unmerge_peer;
pub use plan::FolderLimitError;
pub use plan::plan;
pub use syncer::Report;
pub use syncer::Syncer;
pub use transport::ResolutionError;
pub use transport::ResolvePeer;
pub use transport::Transport;
pub use transport::TransportError;
