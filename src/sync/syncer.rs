use log::{debug, info, trace, warn};

use crate::{
    catalog::Catalog,
    repository::{FolderId, Mutation, Peer, RemoteFolder},
    sync::{
        ApplyError, Merge, ResolvePeer, SyncError, Transport, merge_peer, move_peer, plan,
        unmerge_peer,
    },
};

/// Result of a completed reconciliation pass.
#[derive(Debug, Default, PartialEq)]
pub struct Report {
    pub applied: Vec<Mutation>,
    pub converged: Vec<FolderId>,
}

/// Runs fetch, diff and apply against one account.
///
/// Every operation starts from a fresh fetch and applies its mutations one at
/// a time, in order, stopping at the first failure. Nothing is remembered
/// between operations.
pub struct Syncer<'a, T: Transport> {
    catalog: &'a Catalog,
    transport: T,
}

impl<'a, T: Transport> Syncer<'a, T> {
    pub fn new(catalog: &'a Catalog, transport: T) -> Self {
        Self { catalog, transport }
    }

    #[cfg(test)]
    pub fn into_transport(self) -> T {
        self.transport
    }

    pub async fn folders(&mut self) -> Result<Vec<RemoteFolder>, SyncError> {
        let folders = self
            .transport
            .fetch_folders()
            .await
            .map_err(SyncError::Fetch)?;
        debug!("fetched {} folders", folders.len());
        trace!("folders = {folders:?}");

        Ok(folders)
    }

    /// Computes the mutations of a reconciliation pass without applying them.
    pub async fn plan(&mut self) -> Result<Vec<Mutation>, SyncError> {
        let remote = self.folders().await?;

        Ok(plan(self.catalog, &remote)?)
    }

    pub async fn reconcile(&mut self) -> Result<Report, SyncError> {
        let mutations = self.plan().await?;
        let all: Vec<FolderId> = self.catalog.specs().iter().map(|spec| spec.id()).collect();
        if mutations.is_empty() {
            info!("all {} managed folders up to date", all.len());
        }
        let applied = self.apply_all(mutations, &all).await?;

        Ok(Report {
            applied,
            converged: all,
        })
    }

    pub async fn add_peer<R: ResolvePeer>(
        &mut self,
        resolver: &mut R,
        folder_id: FolderId,
        descriptor: &str,
    ) -> Result<Merge, SyncError> {
        self.catalog.require(folder_id)?;
        let peer = resolve(resolver, descriptor).await?;
        let remote = self.folders().await?;

        let merge = merge_peer(self.catalog, folder_id, peer, find(&remote, folder_id))?;
        self.apply_merge(&merge, folder_id).await?;

        Ok(merge)
    }

    pub async fn remove_peer<R: ResolvePeer>(
        &mut self,
        resolver: &mut R,
        folder_id: FolderId,
        descriptor: &str,
    ) -> Result<Merge, SyncError> {
        self.catalog.require(folder_id)?;
        let peer = resolve(resolver, descriptor).await?;
        let remote = self.folders().await?;

        let merge = unmerge_peer(self.catalog, folder_id, &peer, find(&remote, folder_id))?;
        self.apply_merge(&merge, folder_id).await?;

        Ok(merge)
    }

    /// Puts a peer into `folder_id` and takes it out of all other managed
    /// folders. Returns the mutations that were applied.
    pub async fn move_peer<R: ResolvePeer>(
        &mut self,
        resolver: &mut R,
        folder_id: FolderId,
        descriptor: &str,
    ) -> Result<Vec<Mutation>, SyncError> {
        self.catalog.require(folder_id)?;
        let peer = resolve(resolver, descriptor).await?;
        let remote = self.folders().await?;

        let mutations = move_peer(self.catalog, folder_id, &peer, &remote)?;
        if mutations.is_empty() {
            info!("{peer} already only in folder {folder_id}");
        }
        let mut touched: Vec<FolderId> = mutations.iter().map(Mutation::folder_id).collect();
        touched.sort_unstable();

        Ok(self.apply_all(mutations, &touched).await?)
    }

    async fn apply_merge(&mut self, merge: &Merge, folder_id: FolderId) -> Result<(), ApplyError> {
        match merge {
            Merge::NoOp => {
                info!("folder {folder_id} unchanged");
                Ok(())
            }
            Merge::Update(mutation) => {
                self.apply_all(vec![mutation.clone()], &[folder_id])
                    .await
                    .map(|_| ())
            }
        }
    }

    /// Applies `mutations` in order. `scope` lists the folders this batch is
    /// responsible for; on failure those without outstanding changes are
    /// reported as converged.
    async fn apply_all(
        &mut self,
        mutations: Vec<Mutation>,
        scope: &[FolderId],
    ) -> Result<Vec<Mutation>, ApplyError> {
        let mut remaining = mutations.into_iter();
        let mut applied = Vec::new();

        while let Some(mutation) = remaining.next() {
            if let Err(source) = self.transport.apply(&mutation).await {
                warn!("{mutation} failed: {source}");
                let pending: Vec<Mutation> = remaining.collect();
                let outstanding: Vec<FolderId> = std::iter::once(&mutation)
                    .chain(&pending)
                    .map(Mutation::folder_id)
                    .collect();
                let converged = scope
                    .iter()
                    .copied()
                    .filter(|id| !outstanding.contains(id))
                    .collect();

                return Err(ApplyError {
                    applied,
                    failed: mutation,
                    pending,
                    converged,
                    source,
                });
            }
            info!("{mutation}");
            applied.push(mutation);
        }

        Ok(applied)
    }
}

async fn resolve<R: ResolvePeer>(resolver: &mut R, descriptor: &str) -> Result<Peer, SyncError> {
    let peer = resolver
        .resolve(descriptor)
        .await
        .inspect_err(|e| warn!("{} did not resolve: {e}", e.descriptor()))?;
    debug!("{descriptor} resolved to {peer}");

    Ok(peer)
}

fn find(remote: &[RemoteFolder], id: FolderId) -> Option<&RemoteFolder> {
    remote.iter().find(|folder| folder.id() == id)
}
