use anyhow::Result;

use crate::{
    catalog::Catalog,
    sync::{Syncer, Transport},
};

pub async fn list<T: Transport>(syncer: &mut Syncer<'_, T>, catalog: &Catalog) -> Result<()> {
    let mut folders = syncer.folders().await?;
    folders.sort_unstable_by_key(|folder| folder.id());

    for folder in &folders {
        let marker = if catalog.contains(folder.id()) { '*' } else { ' ' };
        println!("{marker} {:>2} {}", folder.id(), folder.title());
        for peer in folder.peers() {
            println!("       {peer}");
        }
    }
    for spec in catalog.specs() {
        if !folders.iter().any(|folder| folder.id() == spec.id()) {
            println!("! {:>2} {} (missing)", spec.id(), spec.title());
        }
    }

    Ok(())
}
