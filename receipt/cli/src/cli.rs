use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::commands::{DumpCommand, InspectCommand};

/**
    App Store receipt payload inspector.
*/
#[derive(Parser)]
#[command(name = "receipt", version)]
pub struct Cli {
    /// Log filter directive (e.g. "warn", "receipt_core=debug").
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the known fields of a receipt payload by name.
    Inspect(InspectCommand),
    /// Print every attribute of a receipt payload as raw bytes.
    Dump(DumpCommand),
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let filter = EnvFilter::try_new(&self.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .init();

        match self.command {
            Command::Inspect(cmd) => cmd.run(),
            Command::Dump(cmd) => cmd.run(),
        }
    }
}
