mod account;
mod catalog;
mod cli;
mod config;
mod logging;
mod repository;
mod sync;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use config::Config;
use repository::FolderId;

/// Keeps a fixed set of chat folders in place and files peers into them.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Config file to use instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Account to operate on, overrides the config file
    #[arg(short, long)]
    account: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create and rename managed folders until they match the config
    Sync {
        /// Only print the changes a sync would make
        #[arg(long)]
        dry_run: bool,
    },
    /// Add a peer such as `user:123` to a managed folder
    Add {
        #[arg(value_parser = parse_folder_id)]
        folder: FolderId,
        peer: String,
    },
    /// Remove a peer from a managed folder
    Remove {
        #[arg(value_parser = parse_folder_id)]
        folder: FolderId,
        peer: String,
    },
    /// Put a peer into one managed folder and take it out of the others
    Move {
        #[arg(value_parser = parse_folder_id)]
        folder: FolderId,
        peer: String,
    },
    /// Show all folders of the account
    List,
}

fn parse_folder_id(value: &str) -> Result<FolderId, String> {
    let id: u32 = value.parse().map_err(|e| format!("{e}"))?;
    FolderId::try_from(id).map_err(ToString::to_string)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config =
        Config::load_from_file(args.config.as_deref()).context("loading configuration failed")?;
    if let Some(account) = &args.account {
        config.set_account(account.clone());
    }
    logging::init(Some(config.account()));

    cli::run(&args.command, &config)
}
