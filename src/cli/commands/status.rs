use serde_json::Value;

use super::report;
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::client::ApiClient;

pub async fn handle(client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let status = match client.status().await {
        Ok(status) => status,
        Err(err) => return report(&output_format, err),
    };

    let message = status
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("API is reachable")
        .to_string();

    match output_format {
        OutputFormat::Json => output_success(&output_format, &message, Some(status)),
        OutputFormat::Text => {
            output_success(&output_format, &message, None)?;
            println!("API:     {}", client.base_url());
            if let Some(storage) = status.get("storage").and_then(Value::as_str) {
                println!("Storage: {}", storage);
            }
            if let Some(Value::Object(env)) = status.get("environment") {
                for (key, value) in env {
                    println!("  {:<12} {}", key, value.as_str().unwrap_or_default());
                }
            }
            Ok(())
        }
    }
}
