use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fakeboard_core::{BoardConfig, IdPolicy};

#[derive(Parser, Debug)]
#[command(author, version, about = "Drive a fake board from the command line")]
pub struct Args {
    /// Store version; above 3 the board fails to initialize.
    #[arg(short, long, allow_negative_numbers = true)]
    pub store_version: Option<i32>,

    /// Reject device id == device count instead of faulting on it.
    #[arg(long)]
    pub strict_ids: bool,

    /// JSON board config. Flags override it.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the built-in board scenarios.
    Selftest,
    /// Initialize the board and list its devices.
    Info,
    /// Initialize the board and run operations against it, e.g. `put 1 7 0x12345678`.
    Exec {
        #[arg(required = true)]
        ops: Vec<String>,
    },
}

impl Args {
    pub fn board_config(&self) -> Result<BoardConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => BoardConfig::default(),
        };
        if let Some(version) = self.store_version {
            config.store_version = version;
        }
        if self.strict_ids {
            config.id_policy = IdPolicy::Strict;
        }
        Ok(config)
    }
}

pub fn load_config(path: &Path) -> Result<BoardConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read board config {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Invalid board config {}", path.display()))
}
