//! lunabuild CLI - build and watch tool for transpiled Lua mods
//!
//! Usage: lunabuild <COMMAND>
//!
//! Commands:
//!   build         Run one full build and exit
//!   watch         Build, then watch for changes and rebuild continuously
//!   declarations  Emit the merged declaration artifact and exit

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { project } => commands::cmd_build(&project, cli.json, cli.verbose),
        Commands::Watch { project } => commands::cmd_watch(&project, cli.json),
        Commands::Declarations { project } => commands::cmd_declarations(&project, cli.json),
    }
}
