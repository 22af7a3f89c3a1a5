pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::client::{ApiClient, DEFAULT_API_URL};
use crate::types::DesignSelection;

#[derive(Parser)]
#[command(name = "stackweb")]
#[command(about = "StackWeb CLI - submit project requests and review them as admin")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(
        long,
        global = true,
        env = "STACKWEB_API_URL",
        default_value = DEFAULT_API_URL,
        help = "Base URL of the StackWeb API"
    )]
    pub url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Fill in the project intake form and submit it")]
    Submit {
        #[arg(long, help = "Submit a JSON request body from a file instead of prompting")]
        file: Option<String>,
        #[arg(long, help = "Portfolio design to start from")]
        design_id: Option<String>,
        #[arg(long, requires = "design_id", help = "Title of the chosen design")]
        design_title: Option<String>,
    },

    #[command(about = "Review and manage submitted projects")]
    Admin {
        #[command(subcommand)]
        cmd: commands::admin::AdminCommands,
    },

    #[command(about = "Show API and storage status")]
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let client = ApiClient::new(&cli.url)?;

    match cli.command {
        Commands::Submit {
            file,
            design_id,
            design_title,
        } => {
            let design = design_id.map(|id| DesignSelection {
                id,
                title: design_title,
                category: None,
                image_url: None,
            });
            commands::submit::handle(&client, file, design, output_format).await
        }
        Commands::Admin { cmd } => commands::admin::handle(&client, cmd, output_format).await,
        Commands::Status => commands::status::handle(&client, output_format).await,
    }
}
