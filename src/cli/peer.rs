use anyhow::{Context as _, Result};

use crate::{
    account::NumericResolver,
    repository::FolderId,
    sync::{Merge, Syncer, Transport},
};

pub async fn add<T: Transport>(
    syncer: &mut Syncer<'_, T>,
    folder: FolderId,
    peer: &str,
) -> Result<()> {
    let merge = syncer
        .add_peer(&mut NumericResolver, folder, peer)
        .await
        .with_context(|| format!("adding {peer} to folder {folder} failed"))?;
    report(&merge);

    Ok(())
}

pub async fn remove<T: Transport>(
    syncer: &mut Syncer<'_, T>,
    folder: FolderId,
    peer: &str,
) -> Result<()> {
    let merge = syncer
        .remove_peer(&mut NumericResolver, folder, peer)
        .await
        .with_context(|| format!("removing {peer} from folder {folder} failed"))?;
    report(&merge);

    Ok(())
}

pub async fn move_to<T: Transport>(
    syncer: &mut Syncer<'_, T>,
    folder: FolderId,
    peer: &str,
) -> Result<()> {
    let applied = syncer
        .move_peer(&mut NumericResolver, folder, peer)
        .await
        .with_context(|| format!("moving {peer} to folder {folder} failed"))?;
    if applied.is_empty() {
        println!("nothing to do");
    }
    for mutation in applied {
        println!("{mutation}");
    }

    Ok(())
}

fn report(merge: &Merge) {
    match merge {
        Merge::NoOp => println!("nothing to do"),
        Merge::Update(mutation) => println!("{mutation}"),
    }
}
