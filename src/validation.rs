use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

use crate::types::{CommunicationMethod, DesignSelection, Domain, ProjectSubmission};

/// Fields the store assigns; ignored when a client sends them
const SYSTEM_FIELDS: &[&str] = &["id", "createdAt"];

const REQUIRED_FIELDS: &[&str] = &[
    "websiteType",
    "projectName",
    "projectDescription",
    "communicationMethods",
    "budget",
    "domain",
    "name",
    "email",
];

const DESIGN_DETAIL_FIELDS: &[&str] = &[
    "selectedDesignTitle",
    "selectedDesignCategory",
    "selectedDesignImageUrl",
];

/// Rejected submission, keyed by the external (camelCase) field name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub fields: BTreeMap<String, String>,
}

impl ValidationError {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(field.into(), message.into());
        Self { fields }
    }

    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.fields.keys().map(String::as_str).collect();
        write!(f, "Invalid project submission: {}", names.join(", "))
    }
}

impl std::error::Error for ValidationError {}

/// Accumulates every problem so the caller sees the full list at once
#[derive(Default)]
struct Collector {
    fields: BTreeMap<String, String>,
}

impl Collector {
    fn reject(&mut self, field: &str, message: impl Into<String>) {
        self.fields.entry(field.to_string()).or_insert_with(|| message.into());
    }

    fn required(&mut self, body: &Map<String, Value>, field: &str) -> String {
        match body.get(field) {
            Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
            Some(Value::String(_)) | Some(Value::Null) | None => {
                self.reject(field, "This field is required");
                String::new()
            }
            Some(_) => {
                self.reject(field, "Expected a string");
                String::new()
            }
        }
    }

    fn optional(&mut self, body: &Map<String, Value>, field: &str) -> Option<String> {
        match body.get(field) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Some(Value::String(_)) | Some(Value::Null) | None => None,
            Some(_) => {
                self.reject(field, "Expected a string or null");
                None
            }
        }
    }

    fn finish<T>(self, value: T) -> Result<T, ValidationError> {
        if self.fields.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError { fields: self.fields })
        }
    }
}

/// Turn a raw JSON body into a typed submission, or name every offending field.
pub fn validate_submission(payload: &Value) -> Result<ProjectSubmission, ValidationError> {
    let body = payload
        .as_object()
        .ok_or_else(|| ValidationError::single("body", "Expected a JSON object"))?;

    let mut c = Collector::default();

    for field in SYSTEM_FIELDS {
        if body.contains_key(*field) {
            tracing::debug!(field, "ignoring client-supplied system field");
        }
    }

    let mut required = REQUIRED_FIELDS
        .iter()
        .map(|f| (*f, c.required(body, f)))
        .collect::<BTreeMap<_, _>>();
    let mut take = |field: &str| required.remove(field).unwrap_or_default();

    let website_type = take("websiteType");
    let project_name = take("projectName");
    let project_description = take("projectDescription");
    let communication_raw = take("communicationMethods");
    let budget = take("budget");
    let domain_raw = take("domain");
    let name = take("name");
    let email = take("email");

    // Stored in canonical form: known tags, deduplicated, ", "-joined
    let communication_methods = if communication_raw.is_empty() {
        String::new()
    } else {
        match CommunicationMethod::parse_list(&communication_raw) {
            Ok(methods) if methods.is_empty() => {
                c.reject("communicationMethods", "At least one method is required");
                String::new()
            }
            Ok(methods) => CommunicationMethod::join(&methods),
            Err(msg) => {
                c.reject("communicationMethods", msg);
                String::new()
            }
        }
    };

    let domain = if domain_raw.is_empty() {
        None
    } else {
        match domain_raw.parse::<Domain>() {
            Ok(d) => Some(d),
            Err(_) => {
                c.reject("domain", "Expected one of: own, stackweb");
                None
            }
        }
    };

    if !email.is_empty() && !looks_like_email(&email) {
        c.reject("email", "Invalid email address");
    }

    let phone = c.optional(body, "phone");
    let company = c.optional(body, "company");
    let design = design_selection(&mut c, body);

    let submission = ProjectSubmission {
        website_type,
        project_name,
        project_description,
        communication_methods,
        budget,
        domain: domain.unwrap_or(Domain::Own),
        name,
        email,
        phone,
        company,
        design,
    };

    c.finish(submission)
}

fn design_selection(c: &mut Collector, body: &Map<String, Value>) -> Option<DesignSelection> {
    let id = c.optional(body, "selectedDesignId");
    let title = c.optional(body, "selectedDesignTitle");
    let category = c.optional(body, "selectedDesignCategory");
    let image_url = c.optional(body, "selectedDesignImageUrl");

    match id {
        Some(id) => Some(DesignSelection {
            id,
            title,
            category,
            image_url,
        }),
        None => {
            if title.is_some() || category.is_some() || image_url.is_some() {
                c.reject(
                    "selectedDesignId",
                    format!(
                        "Required when any of {} is set",
                        DESIGN_DETAIL_FIELDS.join(", ")
                    ),
                );
            }
            None
        }
    }
}

/// Basic `local@host.tld` shape check
pub fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, host)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || host.contains('@') {
        return false;
    }
    let labels: Vec<&str> = host.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|l| !l.is_empty())
}
