//! onemore-server – entry point.

use clap::{Parser, Subcommand};
use onemore_server::Command;

#[derive(Debug, Parser)]
#[command(name = "onemore-server", version, about = "Serve one more short text at a time")]
struct Cli {
    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Run the HTTP server (default).
    Serve,
    /// Insert the starter catalog into an empty database.
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = match cli.command {
        None | Some(CliCommand::Serve) => Command::Serve,
        Some(CliCommand::Seed) => Command::Seed,
    };
    onemore_server::run(command).await
}
