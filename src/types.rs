/// Shared types used across the codebase

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where the finished site will be hosted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// Customer brings their own domain
    Own,
    /// Hosted under a studio-provided domain
    Stackweb,
}

impl Domain {
    pub const ALL: [Domain; 2] = [Domain::Own, Domain::Stackweb];

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Own => "own",
            Domain::Stackweb => "stackweb",
        }
    }
}

impl FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "own" => Ok(Domain::Own),
            "stackweb" => Ok(Domain::Stackweb),
            other => Err(format!("unknown domain option '{}'", other)),
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Channels a customer can pick for follow-up contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommunicationMethod {
    Admin,
    Gmail,
    Whatsapp,
    Message,
}

impl CommunicationMethod {
    pub const ALL: [CommunicationMethod; 4] = [
        CommunicationMethod::Admin,
        CommunicationMethod::Gmail,
        CommunicationMethod::Whatsapp,
        CommunicationMethod::Message,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommunicationMethod::Admin => "admin",
            CommunicationMethod::Gmail => "gmail",
            CommunicationMethod::Whatsapp => "whatsapp",
            CommunicationMethod::Message => "message",
        }
    }

    /// Split a comma-joined tag list ("gmail, whatsapp") into methods.
    /// Returns the first unknown tag on failure.
    pub fn parse_list(joined: &str) -> Result<Vec<Self>, String> {
        let mut methods = Vec::new();
        for tag in joined.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let method = tag.parse::<CommunicationMethod>()?;
            if !methods.contains(&method) {
                methods.push(method);
            }
        }
        Ok(methods)
    }

    pub fn join(methods: &[Self]) -> String {
        methods
            .iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for CommunicationMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(CommunicationMethod::Admin),
            "gmail" => Ok(CommunicationMethod::Gmail),
            "whatsapp" => Ok(CommunicationMethod::Whatsapp),
            "message" => Ok(CommunicationMethod::Message),
            other => Err(format!("unknown communication method '{}'", other)),
        }
    }
}

/// Portfolio design the customer picked as a starting point.
/// The four fields travel together: either all are known or the selection is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignSelection {
    pub id: String,
    pub title: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
}

/// A validated project request, before the store assigns `id` and `createdAt`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSubmission {
    pub website_type: String,
    pub project_name: String,
    pub project_description: String,
    pub communication_methods: String,
    pub budget: String,
    pub domain: Domain,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub design: Option<DesignSelection>,
}

/// A persisted project request in the external (camelCase) shape.
///
/// Optional fields serialize as `null` rather than being omitted so the admin
/// view always sees the full column set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub website_type: String,
    pub project_name: String,
    pub project_description: String,
    pub communication_methods: String,
    pub budget: String,
    pub domain: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub selected_design_id: Option<String>,
    pub selected_design_title: Option<String>,
    pub selected_design_category: Option<String>,
    pub selected_design_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Regroup the flattened design columns
    pub fn design(&self) -> Option<DesignSelection> {
        self.selected_design_id.as_ref().map(|id| DesignSelection {
            id: id.clone(),
            title: self.selected_design_title.clone(),
            category: self.selected_design_category.clone(),
            image_url: self.selected_design_image_url.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertUser {
    pub username: String,
    pub password: String,
}
