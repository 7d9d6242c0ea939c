//! Command-line options and runtime configuration

use std::path::PathBuf;

use clap::Parser;

/// Default save file name
pub const SAVE_FILE: &str = "save_player.json";
/// Default log file name
pub const LOG_FILE: &str = "delvekeep.log";

/// Delvekeep - wander the dungeon, spend your gold at the castle
#[derive(Parser, Debug)]
#[command(name = "delvekeep")]
#[command(author, version, about = "A turn-based dungeon crawl with a castle shop", long_about = None)]
pub struct Args {
    /// Save file path
    #[arg(short = 's', long = "save")]
    pub save: Option<PathBuf>,

    /// Seed for reproducible encounters and combat
    #[arg(long = "seed")]
    pub seed: Option<u64>,

    /// Log file path
    #[arg(long = "log")]
    pub log: Option<PathBuf>,

    /// Keep progress in memory only
    #[arg(long = "no-save")]
    pub no_save: bool,
}

/// Resolved runtime settings
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Where the hero is saved, `None` for in-memory only
    pub save_path: Option<PathBuf>,
    pub seed: Option<u64>,
    pub log_path: PathBuf,
}

impl Config {
    pub fn from_args(args: Args) -> Self {
        let save_path = if args.no_save {
            None
        } else {
            Some(args.save.unwrap_or_else(default_save_path))
        };
        Self {
            save_path,
            seed: args.seed,
            log_path: args.log.unwrap_or_else(|| PathBuf::from(LOG_FILE)),
        }
    }
}

/// Save file in the platform data directory
pub fn default_save_path() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "delvekeep", "Delvekeep") {
        let mut path = proj_dirs.data_local_dir().to_path_buf();
        path.push(SAVE_FILE);
        path
    } else {
        // Fallback to current directory
        PathBuf::from(".").join(SAVE_FILE)
    }
}
