//! promptkit - prompt template installer
//!
//! Discovers prompt commands and agents from bundled or workspace source
//! trees, drives a conditionally-visible prompt flow to select what to
//! install, writes the selection into a global or local target directory and
//! keeps an idempotent manifest of everything ever installed there.

use clap::Parser;

mod cli;
mod commands;
mod defaults;
mod error;
mod installer;
mod manifest;
mod options;
mod progress;
mod resolver;
mod schema;
mod target;
mod ui;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init(args) => commands::init::run(args),
        Commands::List(args) => commands::list::run(args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
