use anyhow::Result;
use log::{error, info};

use crate::{
    cli::join_ids,
    sync::{SyncError, Syncer, Transport},
};

pub async fn sync<T: Transport>(syncer: &mut Syncer<'_, T>, dry_run: bool) -> Result<()> {
    if dry_run {
        let mutations = syncer.plan().await?;
        if mutations.is_empty() {
            println!("nothing to do");
        }
        for mutation in mutations {
            println!("{mutation}");
        }
        return Ok(());
    }

    match syncer.reconcile().await {
        Ok(report) => {
            info!(
                "{} changes applied, folders {} in place",
                report.applied.len(),
                join_ids(&report.converged)
            );
            Ok(())
        }
        Err(SyncError::Apply(e)) => {
            error!(
                "folders {} in place, folders {} not",
                join_ids(&e.converged),
                join_ids(&e.unconverged())
            );
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}
