use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod chat;
pub mod models;
pub mod serve;

use crate::core::AppConfig;

#[derive(Subcommand)]
enum Command {
    /// Run the API server
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Set the server port
        #[arg(long, default_value = "8060")]
        port: String,
    },
    /// Start a chat session in the terminal
    Chat {
        /// Model to chat with, defaults to the configured chat model
        #[arg(long)]
        model: Option<String>,
    },
    /// List the models available on the model server
    Models {},
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();
    let config = AppConfig::default();

    // Handle each sub command
    match args.command {
        Some(Command::Serve { host, port }) => {
            serve::run(host, port, config).await?;
        }
        Some(Command::Chat { model }) => {
            chat::run(model, config).await?;
        }
        Some(Command::Models {}) => {
            models::run(config).await?;
        }
        None => {}
    }

    Ok(())
}
