use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// lunabuild - build and watch tool for transpiled Lua mods
#[derive(Parser, Debug)]
#[command(name = "lunabuild")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output NDJSON events for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one full build and exit
    Build {
        /// Project root (containing manifest.cfg)
        #[arg(short, long, default_value = ".")]
        project: PathBuf,
    },

    /// Build, then watch for changes and rebuild continuously
    Watch {
        /// Project root (containing manifest.cfg)
        #[arg(short, long, default_value = ".")]
        project: PathBuf,
    },

    /// Emit the merged declaration artifact and exit
    Declarations {
        /// Project root (containing manifest.cfg)
        #[arg(short, long, default_value = ".")]
        project: PathBuf,
    },
}
