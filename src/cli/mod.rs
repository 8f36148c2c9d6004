//! CLI module for SAMURAI
//!
//! Provides commands:
//! - `serve`: Start the HTTP server (default)
//! - `ask`: One completion through the provider router

use clap::{Parser, Subcommand};

pub mod ask;

/// SAMURAI chat gateway CLI
#[derive(Parser, Debug)]
#[command(name = "samurai")]
#[command(about = "Multi-provider chat orchestration gateway")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the server (default)
    Serve,
    /// Send one message through the provider router and print the reply
    Ask {
        /// Message to send
        message: String,
        /// Model hint passed to every provider
        #[arg(long)]
        model: Option<String>,
    },
}

/// Run the CLI command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Ask { message, model }) => ask::run(&message, model.as_deref()).await,
        Some(Commands::Serve) | None => crate::server::run().await,
    }
}
