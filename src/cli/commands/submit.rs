use serde_json::{json, Value};
use std::io::{self, BufRead, Write};

use super::report;
use crate::cli::utils::{output_success, prompt_from};
use crate::cli::OutputFormat;
use crate::client::wizard::WEBSITE_TYPES;
use crate::client::{ApiClient, IntakeWizard, Step};
use crate::types::{CommunicationMethod, DesignSelection, Domain};

pub async fn handle(
    client: &ApiClient,
    file: Option<String>,
    design: Option<DesignSelection>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let payload = match file {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .map_err(|e| anyhow::anyhow!("Cannot read {}: {}", path, e))?;
            serde_json::from_str::<Value>(&raw)
                .map_err(|e| anyhow::anyhow!("{} is not valid JSON: {}", path, e))?
        }
        None => {
            let wizard = match design {
                Some(design) => IntakeWizard::with_design(design),
                None => IntakeWizard::new(),
            };
            let stdin = io::stdin();
            match fill_in(wizard, &mut stdin.lock(), &mut io::stdout())? {
                Some(payload) => payload,
                None => return output_success(&output_format, "Submission cancelled", None),
            }
        }
    };

    match client.submit_project(&payload).await {
        Ok(project) => output_success(
            &output_format,
            &format!("Project '{}' submitted (id {})", project.project_name, project.id),
            Some(json!({ "project": project })),
        ),
        Err(err) => report(&output_format, err),
    }
}

/// Walk the wizard over line-based input. `None` when the user declines at review.
pub fn fill_in<R: BufRead, W: Write>(
    mut wizard: IntakeWizard,
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<Option<Value>> {
    loop {
        let step = wizard.step();
        writeln!(output, "\nStep {} of {}: {}", step.number(), Step::TOTAL, step.title())?;

        match step {
            Step::WebsiteType => {
                for (i, (id, label)) in WEBSITE_TYPES.iter().enumerate() {
                    writeln!(output, "  {}) {:<12} {}", i + 1, id, label)?;
                }
                let answer = prompt_from(input, output, "Website type: ")?;
                let id = answer
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| WEBSITE_TYPES.get(i))
                    .map(|(id, _)| id.to_string())
                    .unwrap_or(answer);
                if let Err(e) = wizard.set_website_type(&id) {
                    writeln!(output, "  {}", e)?;
                    continue;
                }
            }
            Step::ProjectDetails => {
                let name = prompt_from(input, output, "Project name: ")?;
                let description = prompt_from(input, output, "Project description: ")?;
                wizard.set_project_details(&name, &description);

                let tags = CommunicationMethod::ALL.map(|m| m.as_str()).join(", ");
                let answer = prompt_from(input, output, &format!("Contact via ({}): ", tags))?;
                match CommunicationMethod::parse_list(&answer) {
                    Ok(methods) => wizard.set_communication_methods(&methods),
                    Err(e) => {
                        writeln!(output, "  {}", e)?;
                        continue;
                    }
                }
            }
            Step::Budget => {
                let answer = prompt_from(input, output, "Budget in ₹ (minimum 499): ")?;
                wizard.set_budget(answer.trim_start_matches('₹'));
            }
            Step::Domain => {
                let answer = prompt_from(input, output, "Domain (own / stackweb): ")?;
                match answer.parse::<Domain>() {
                    Ok(domain) => wizard.set_domain(domain),
                    Err(e) => {
                        writeln!(output, "  {}", e)?;
                        continue;
                    }
                }
            }
            Step::Contact => {
                let name = prompt_from(input, output, "Your name: ")?;
                let email = prompt_from(input, output, "Email: ")?;
                let phone = prompt_from(input, output, "Phone (optional): ")?;
                let company = prompt_from(input, output, "Company (optional): ")?;
                wizard.set_contact(&name, &email, &phone, &company);
            }
            Step::Review => {
                let payload = wizard.submission()?;
                writeln!(output, "{}", serde_json::to_string_pretty(&payload)?)?;
                let answer = prompt_from(input, output, "Submit? [y]es / [b]ack / [n]o: ")?;
                match answer.to_ascii_lowercase().as_str() {
                    "y" | "yes" => return Ok(Some(payload)),
                    "b" | "back" => {
                        wizard.back();
                    }
                    _ => return Ok(None),
                }
                continue;
            }
        }

        if let Err(e) = wizard.next() {
            writeln!(output, "  {}", e)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const ANSWERS: &str = "3\nDemo\nx\ngmail\n999\nown\nA\na@b.com\n\n\n";

    #[test]
    fn scripted_answers_produce_payload() {
        let mut input = Cursor::new(format!("{}y\n", ANSWERS));
        let mut output = Vec::new();
        let payload = fill_in(IntakeWizard::new(), &mut input, &mut output)
            .unwrap()
            .unwrap();

        assert_eq!(payload["websiteType"], "startups");
        assert_eq!(payload["communicationMethods"], "gmail");
        assert_eq!(payload["budget"], "999");
        assert_eq!(payload["phone"], Value::Null);
    }

    #[test]
    fn invalid_answer_repeats_the_step() {
        // Budget too low first, then accepted
        let script = "startups\nDemo\nx\ngmail, whatsapp\n100\n₹1500\nstackweb\nA\na@b.com\n555\nAcme\ny\n";
        let mut output = Vec::new();
        let payload = fill_in(IntakeWizard::new(), &mut Cursor::new(script), &mut output)
            .unwrap()
            .unwrap();

        let printed = String::from_utf8(output).unwrap();
        assert!(printed.contains("Minimum budget is ₹499"));
        assert_eq!(payload["budget"], "1500");
        assert_eq!(payload["communicationMethods"], "gmail, whatsapp");
        assert_eq!(payload["company"], "Acme");
    }

    #[test]
    fn declining_at_review_cancels() {
        let mut input = Cursor::new(format!("{}n\n", ANSWERS));
        let result = fill_in(IntakeWizard::new(), &mut input, &mut Vec::new()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn closed_input_is_an_error() {
        let mut input = Cursor::new("1\nDemo\n");
        assert!(fill_in(IntakeWizard::new(), &mut input, &mut Vec::new()).is_err());
    }
}
