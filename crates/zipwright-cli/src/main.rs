//! Zipwright CLI - policy-driven ZIP archive creation and extraction.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    match &cli.command {
        cli::Commands::Create(args) => commands::create::execute(args, cli.json),
        cli::Commands::Extract(args) => commands::extract::execute(args, cli.json),
    }
}
