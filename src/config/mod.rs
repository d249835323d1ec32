mod folderkeep;

use std::{env, path::PathBuf};

pub use folderkeep::Config;
pub use folderkeep::ConfigError;

fn home() -> PathBuf {
    env::var_os("HOME").map_or_else(|| PathBuf::from("."), PathBuf::from)
}

fn config_home() -> PathBuf {
    let mut config_dir = if let Some(config_home) = env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(config_home)
    } else {
        let mut config_home = home();
        config_home.push(".config");
        config_home
    };
    config_dir.push(env!("CARGO_PKG_NAME"));

    config_dir
}

fn data_home() -> PathBuf {
    let mut data_home = if let Some(data_home) = env::var_os("XDG_DATA_HOME") {
        PathBuf::from(data_home)
    } else {
        let mut data_home = home();
        data_home.push(".local/share");
        data_home
    };
    data_home.push(env!("CARGO_PKG_NAME"));

    data_home
}
