use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod fields;
mod payload;

use self::cli::Cli;

fn main() -> Result<()> {
    Cli::parse().run()
}
