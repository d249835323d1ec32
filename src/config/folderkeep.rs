use std::{
    fs::read_to_string,
    io,
    path::{Path, PathBuf},
};

use derive_getters::Getters;
use log::debug;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    catalog::{Catalog, CatalogError},
    config::{config_home, data_home},
    repository::{FolderId, FolderSpec},
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Deserialize, Getters)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "account")]
    account: String,
    #[serde(default = "data_dir")]
    data_dir: PathBuf,
    #[serde(default = "folders")]
    #[getter(skip)]
    folders: Vec<FolderSpec>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            account: account(),
            data_dir: data_dir(),
            folders: folders(),
        }
    }
}

impl Config {
    /// Reads `file`, or the default location if none is given. A missing
    /// default config file yields the default config.
    pub fn load_from_file(file: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match file {
            Some(file) => file.to_path_buf(),
            None => {
                let path = default_location();
                if !path.exists() {
                    debug!("no config at {}, using defaults", path.display());
                    return Ok(Self::default());
                }
                path
            }
        };
        debug!("reading config from {}", path.display());
        let contents = read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse { path, source })
    }

    pub fn set_account(&mut self, account: String) {
        self.account = account;
    }

    pub fn catalog(&self) -> Result<Catalog, CatalogError> {
        Catalog::new(self.folders.iter().cloned())
    }
}

fn default_location() -> PathBuf {
    config_home().join("config.toml")
}

fn account() -> String {
    "default".to_string()
}

fn data_dir() -> PathBuf {
    data_home()
}

fn folders() -> Vec<FolderSpec> {
    [(1, "Manual"), (2, "Bot"), (3, "Timewaster"), (4, "Confirmation")]
        .into_iter()
        .filter_map(|(id, title)| Some(FolderSpec::new(FolderId::try_from(id).ok()?, title)))
        .collect()
}
