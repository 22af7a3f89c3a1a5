pub mod admin;
pub mod status;
pub mod submit;

use serde_json::Value;

use crate::cli::utils::output_error;
use crate::cli::OutputFormat;
use crate::client::ClientError;

/// Report an API rejection with its field errors, then fail the command
pub(crate) fn report(output_format: &OutputFormat, err: ClientError) -> anyhow::Result<()> {
    if let ClientError::Api { message, field_errors, .. } = &err {
        let fields = (!field_errors.is_empty())
            .then(|| serde_json::to_value(field_errors).unwrap_or(Value::Null));
        output_error(output_format, message, fields.as_ref())?;
        anyhow::bail!("Request rejected by the API");
    }
    Err(err.into())
}
