use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::{
    repository::{Mutation, RemoteFolder, RemoteFolderBuilder},
    sync::{Transport, TransportError},
};

#[derive(Debug, Default, Serialize, Deserialize)]
struct AccountFile {
    #[serde(default)]
    folders: Vec<RemoteFolder>,
}

/// Folder list of an account kept in a TOML file.
///
/// Writes replace title and members of a folder as a whole and create it if
/// it does not exist, the same way the platform handles a folder update.
#[derive(Debug, Clone)]
pub struct LocalAccount {
    path: PathBuf,
}

impl LocalAccount {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn in_data_dir(data_dir: &Path, account: &str) -> Self {
        Self::new(data_dir.join(account).join("folders.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Vec<RemoteFolder>, TransportError> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{} does not exist yet", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(TransportError::new(
                    format!("cannot read {}", self.path.display()),
                    e,
                ));
            }
        };
        let file: AccountFile = toml::from_str(&contents).map_err(|e| {
            TransportError::new(format!("cannot parse {}", self.path.display()), e)
        })?;

        Ok(file.folders)
    }

    async fn store(&self, folders: Vec<RemoteFolder>) -> Result<(), TransportError> {
        let contents = toml::to_string_pretty(&AccountFile { folders })
            .map_err(|e| TransportError::new("cannot serialize folders", e))?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                TransportError::new(format!("cannot create {}", parent.display()), e)
            })?;
        }
        let temp = self.path.with_extension("toml.tmp");
        trace!("writing {}", temp.display());
        fs::write(&temp, contents).await.map_err(|e| {
            TransportError::new(format!("cannot write {}", temp.display()), e)
        })?;
        fs::rename(&temp, &self.path).await.map_err(|e| {
            TransportError::new(format!("cannot replace {}", self.path.display()), e)
        })
    }
}

impl Transport for LocalAccount {
    async fn fetch_folders(&mut self) -> Result<Vec<RemoteFolder>, TransportError> {
        self.load().await
    }

    async fn apply(&mut self, mutation: &Mutation) -> Result<(), TransportError> {
        let mut folders = self.load().await?;
        let update = mutation.update();
        let folder = RemoteFolderBuilder::default()
            .id(update.id)
            .title(update.title)
            .peers(update.peers.to_vec())
            .build()
            .map_err(|e| TransportError::new(format!("cannot build folder {}", update.id), e))?;

        if let Some(existing) = folders.iter_mut().find(|f| f.id() == update.id) {
            *existing = folder;
        } else {
            folders.push(folder);
        }

        self.store(folders).await
    }
}
