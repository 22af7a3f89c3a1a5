use clap::Subcommand;
use serde_json::json;

use super::report;
use crate::cli::utils::{confirm, output_projects, output_success, prompt};
use crate::cli::OutputFormat;
use crate::client::ApiClient;

#[derive(Subcommand)]
pub enum AdminCommands {
    #[command(about = "List all project submissions, newest first")]
    List {
        #[arg(long, env = "STACKWEB_ADMIN_CODE", help = "Admin access code (prompted when omitted)")]
        code: Option<String>,
    },

    #[command(about = "Delete one project submission")]
    Delete {
        #[arg(help = "Project ID")]
        id: String,
        #[arg(long, env = "STACKWEB_ADMIN_CODE", help = "Admin access code (prompted when omitted)")]
        code: Option<String>,
    },

    #[command(about = "Delete every project submission")]
    Clear {
        #[arg(long, env = "STACKWEB_ADMIN_CODE", help = "Admin access code (prompted when omitted)")]
        code: Option<String>,
        #[arg(long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

fn admin_code(code: Option<String>) -> anyhow::Result<String> {
    match code {
        Some(code) => Ok(code),
        None => prompt("Admin code: "),
    }
}

pub async fn handle(
    client: &ApiClient,
    cmd: AdminCommands,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        AdminCommands::List { code } => {
            let code = admin_code(code)?;
            match client.verify_admin(&code).await {
                Ok(projects) => output_projects(&output_format, &projects),
                Err(err) => report(&output_format, err),
            }
        }
        AdminCommands::Delete { id, code } => {
            let code = admin_code(code)?;
            match client.delete_project(&code, &id).await {
                Ok(message) => output_success(&output_format, &message, Some(json!({ "id": id }))),
                Err(err) => report(&output_format, err),
            }
        }
        AdminCommands::Clear { code, yes } => {
            let code = admin_code(code)?;
            if !yes && !confirm("Delete ALL project submissions?")? {
                return output_success(&output_format, "Nothing deleted", None);
            }
            match client.clear_projects(&code).await {
                Ok(message) => output_success(&output_format, &message, None),
                Err(err) => report(&output_format, err),
            }
        }
    }
}
