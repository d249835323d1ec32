mod list;
mod peer;
mod sync;

use anyhow::{Context as _, Result};
use log::debug;

use crate::{
    Command, account::LocalAccount, config::Config, repository::FolderId, sync::Syncer,
};

pub fn run(command: &Command, config: &Config) -> Result<()> {
    let catalog = config
        .catalog()
        .context("folders in configuration are invalid")?;
    let account = LocalAccount::in_data_dir(config.data_dir(), config.account());
    debug!("using account file {}", account.path().display());

    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .context("building tokio runtime failed")?;

    rt.block_on(async {
        let mut syncer = Syncer::new(&catalog, account);
        match command {
            Command::Sync { dry_run } => sync::sync(&mut syncer, *dry_run).await,
            Command::Add { folder, peer } => peer::add(&mut syncer, *folder, peer).await,
            Command::Remove { folder, peer } => peer::remove(&mut syncer, *folder, peer).await,
            Command::Move { folder, peer } => peer::move_to(&mut syncer, *folder, peer).await,
            Command::List => list::list(&mut syncer, &catalog).await,
        }
    })
}

fn join_ids(ids: &[FolderId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
