use std::error::Error as StdError;

use thiserror::Error;

use crate::repository::{Mutation, Peer, RemoteFolder};

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// A failed round trip to the account. The cause is kept as is.
#[derive(Debug, Error)]
#[error("{context}")]
pub struct TransportError {
    context: String,
    #[source]
    source: BoxError,
}

impl TransportError {
    pub fn new(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            context: context.into(),
            source: source.into(),
        }
    }
}

/// A peer descriptor the resolver could not turn into a peer.
#[derive(Debug, Error)]
#[error("cannot resolve peer {descriptor}")]
pub struct ResolutionError {
    descriptor: String,
    #[source]
    source: BoxError,
}

impl ResolutionError {
    pub fn new(descriptor: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            descriptor: descriptor.into(),
            source: source.into(),
        }
    }

    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }
}

/// Access to the folders of one account.
///
/// Each call is one round trip that either succeeds completely or fails
/// without effect. Retrying is up to the implementation.
pub trait Transport {
    async fn fetch_folders(&mut self) -> Result<Vec<RemoteFolder>, TransportError>;

    /// Submits the folder write of `mutation`, see [`Mutation::update`].
    async fn apply(&mut self, mutation: &Mutation) -> Result<(), TransportError>;
}

/// Turns user supplied peer descriptors (handles, ids, invite links) into
/// peers.
pub trait ResolvePeer {
    async fn resolve(&mut self, descriptor: &str) -> Result<Peer, ResolutionError>;
}
