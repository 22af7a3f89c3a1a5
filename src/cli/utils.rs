use serde_json::{json, Map, Value};
use std::io::{self, BufRead, Write};

use crate::cli::OutputFormat;
use crate::types::Project;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = Map::new();
            response.insert("success".to_string(), json!(true));
            response.insert("message".to_string(), json!(message));

            match data {
                Some(Value::Object(fields)) => response.extend(fields),
                Some(other) => {
                    response.insert("data".to_string(), other);
                }
                None => {}
            }

            println!("{}", serde_json::to_string_pretty(&Value::Object(response))?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(
    output_format: &OutputFormat,
    message: &str,
    field_errors: Option<&Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(fields) = field_errors {
                response["fieldErrors"] = fields.clone();
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
            if let Some(Value::Object(fields)) = field_errors {
                for (field, reason) in fields {
                    eprintln!("  {}: {}", field, reason.as_str().unwrap_or_default());
                }
            }
        }
    }
    Ok(())
}

/// Output a project list, newest first as received
pub fn output_projects(output_format: &OutputFormat, projects: &[Project]) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({ "success": true, "projects": projects }))?
            );
        }
        OutputFormat::Text => {
            if projects.is_empty() {
                println!("No project submissions yet");
            } else {
                print!("{}", render_project_table(projects));
            }
        }
    }
    Ok(())
}

/// Compact per-project summary used by `admin list`
pub fn render_project_table(projects: &[Project]) -> String {
    let mut out = String::new();
    for p in projects {
        out.push_str(&format!(
            "{}  {}  [{}]\n",
            p.created_at.format("%Y-%m-%d %H:%M"),
            p.project_name,
            p.website_type
        ));
        out.push_str(&format!("    id:      {}\n", p.id));
        out.push_str(&format!("    client:  {} <{}>\n", p.name, p.email));
        if let Some(phone) = &p.phone {
            out.push_str(&format!("    phone:   {}\n", phone));
        }
        if let Some(company) = &p.company {
            out.push_str(&format!("    company: {}\n", company));
        }
        out.push_str(&format!("    budget:  ₹{}  domain: {}\n", p.budget, p.domain));
        out.push_str(&format!("    contact: {}\n", p.communication_methods));
        if let Some(design) = p.design() {
            out.push_str(&format!(
                "    design:  {} ({})\n",
                design.title.as_deref().unwrap_or(&design.id),
                design.category.as_deref().unwrap_or("uncategorized")
            ));
        }
        out.push_str(&format!("    {}\n", p.project_description));
    }
    out
}

/// Print `label` and read one trimmed line from stdin
pub fn prompt(label: &str) -> anyhow::Result<String> {
    let stdin = io::stdin();
    prompt_from(&mut stdin.lock(), &mut io::stdout(), label)
}

pub fn prompt_from<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> anyhow::Result<String> {
    write!(output, "{}", label)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        anyhow::bail!("Input ended before the form was complete");
    }
    Ok(line.trim().to_string())
}

/// Ask a yes/no question; anything but y/yes is a no
pub fn confirm(label: &str) -> anyhow::Result<bool> {
    let answer = prompt(&format!("{} [y/N] ", label))?;
    Ok(matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"))
}
