use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{DesignSelection, Project, ProjectSubmission};

/// Column names of the projects table, paired with the external field they carry
pub const FIELD_COLUMNS: &[(&str, &str)] = &[
    ("id", "id"),
    ("websiteType", "website_type"),
    ("projectName", "project_name"),
    ("projectDescription", "project_description"),
    ("communicationMethods", "communication_methods"),
    ("budget", "budget"),
    ("domain", "domain"),
    ("name", "name"),
    ("email", "email"),
    ("phone", "phone"),
    ("company", "company"),
    ("selectedDesignId", "selected_design_id"),
    ("selectedDesignTitle", "selected_design_title"),
    ("selectedDesignCategory", "selected_design_category"),
    ("selectedDesignImageUrl", "selected_design_image_url"),
    ("createdAt", "created_at"),
];

/// Column for an external field name
pub fn column_for(field: &str) -> Option<&'static str> {
    FIELD_COLUMNS
        .iter()
        .find(|(f, _)| *f == field)
        .map(|(_, c)| *c)
}

/// Row body sent on insert. `id` and `created_at` are left to the store.
///
/// Design columns are written only when a selection exists so that backends
/// without those columns still accept plain submissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProjectRow {
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
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_design_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_design_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_design_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_design_image_url: Option<String>,
}

/// A stored row as the backend returns it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRow {
    pub id: String,
    pub website_type: String,
    pub project_name: String,
    pub project_description: String,
    #[serde(default)]
    pub communication_methods: String,
    pub budget: String,
    pub domain: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub selected_design_id: Option<String>,
    #[serde(default)]
    pub selected_design_title: Option<String>,
    #[serde(default)]
    pub selected_design_category: Option<String>,
    #[serde(default)]
    pub selected_design_image_url: Option<String>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Accepts RFC 3339 as well as zone-less `timestamp` columns, read as UTC
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .map_err(serde::de::Error::custom)
}

impl NewProjectRow {
    /// Attach the store-assigned identity
    pub fn into_row(self, id: String, created_at: DateTime<Utc>) -> ProjectRow {
        ProjectRow {
            id,
            website_type: self.website_type,
            project_name: self.project_name,
            project_description: self.project_description,
            communication_methods: self.communication_methods,
            budget: self.budget,
            domain: self.domain,
            name: self.name,
            email: self.email,
            phone: self.phone,
            company: self.company,
            selected_design_id: self.selected_design_id,
            selected_design_title: self.selected_design_title,
            selected_design_category: self.selected_design_category,
            selected_design_image_url: self.selected_design_image_url,
            created_at,
        }
    }
}

/// External submission → table columns
pub fn to_row(submission: &ProjectSubmission) -> NewProjectRow {
    let design = submission.design.as_ref();

    NewProjectRow {
        website_type: submission.website_type.clone(),
        project_name: submission.project_name.clone(),
        project_description: submission.project_description.clone(),
        communication_methods: submission.communication_methods.clone(),
        budget: submission.budget.clone(),
        domain: submission.domain.as_str().to_string(),
        name: submission.name.clone(),
        email: submission.email.clone(),
        phone: submission.phone.clone(),
        company: submission.company.clone(),
        selected_design_id: design.map(|d| d.id.clone()),
        selected_design_title: design.and_then(|d| d.title.clone()),
        selected_design_category: design.and_then(|d| d.category.clone()),
        selected_design_image_url: design.and_then(|d| d.image_url.clone()),
    }
}

/// Table row → external record.
///
/// Empty strings coming back from the backend are treated as absent, and the
/// design columns are only surfaced when the selection id is present.
pub fn from_row(row: ProjectRow) -> Project {
    let design = non_empty(row.selected_design_id).map(|id| DesignSelection {
        id,
        title: non_empty(row.selected_design_title),
        category: non_empty(row.selected_design_category),
        image_url: non_empty(row.selected_design_image_url),
    });

    Project {
        id: row.id,
        website_type: row.website_type,
        project_name: row.project_name,
        project_description: row.project_description,
        communication_methods: row.communication_methods,
        budget: row.budget,
        domain: row.domain,
        name: row.name,
        email: row.email,
        phone: non_empty(row.phone),
        company: non_empty(row.company),
        selected_design_id: design.as_ref().map(|d| d.id.clone()),
        selected_design_title: design.as_ref().and_then(|d| d.title.clone()),
        selected_design_category: design.as_ref().and_then(|d| d.category.clone()),
        selected_design_image_url: design.and_then(|d| d.image_url),
        created_at: row.created_at,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Domain;
    use chrono::TimeZone;
    use serde_json::json;

    fn submission() -> ProjectSubmission {
        ProjectSubmission {
            website_type: "gaming".into(),
            project_name: "Arena".into(),
            project_description: "Tournament site".into(),
            communication_methods: "gmail, whatsapp".into(),
            budget: "1599".into(),
            domain: Domain::Stackweb,
            name: "Ravi".into(),
            email: "ravi@example.com".into(),
            phone: Some("+91 98765".into()),
            company: None,
            design: None,
        }
    }

    #[test]
    fn field_column_table_is_one_to_one() {
        for (field, column) in FIELD_COLUMNS {
            assert_eq!(column_for(field), Some(*column));
            assert_eq!(FIELD_COLUMNS.iter().filter(|(_, c)| c == column).count(), 1);
        }
        assert_eq!(column_for("website_type"), None);
    }

    #[test]
    fn row_body_omits_design_columns_without_selection() {
        let body = serde_json::to_value(to_row(&submission())).unwrap();
        assert_eq!(body["website_type"], "gaming");
        assert_eq!(body["domain"], "stackweb");
        assert_eq!(body["company"], serde_json::Value::Null);
        assert!(body.get("selected_design_id").is_none());
    }

    #[test]
    fn round_trip_preserves_fields() {
        let mut s = submission();
        s.design = Some(DesignSelection {
            id: "d-1".into(),
            title: Some("Dark".into()),
            category: Some("gaming".into()),
            image_url: None,
        });
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let project = from_row(to_row(&s).into_row("p-1".into(), at));

        assert_eq!(project.id, "p-1");
        assert_eq!(project.website_type, s.website_type);
        assert_eq!(project.communication_methods, s.communication_methods);
        assert_eq!(project.domain, "stackweb");
        assert_eq!(project.phone, s.phone);
        assert_eq!(project.design(), s.design);
        assert_eq!(project.created_at, at);
    }

    #[test]
    fn stray_design_columns_without_id_are_dropped() {
        let row: ProjectRow = serde_json::from_value(json!({
            "id": "p-2",
            "website_type": "professional",
            "project_name": "Firm",
            "project_description": "Site",
            "communication_methods": "admin",
            "budget": "499",
            "domain": "own",
            "name": "N",
            "email": "n@example.com",
            "phone": "",
            "selected_design_title": "Orphan",
            "created_at": "2025-03-01T12:00:00+00:00"
        }))
        .unwrap();

        let project = from_row(row);
        assert_eq!(project.phone, None);
        assert_eq!(project.selected_design_title, None);

        let wire = serde_json::to_value(&project).unwrap();
        assert_eq!(wire["websiteType"], "professional");
        assert_eq!(wire["selectedDesignId"], serde_json::Value::Null);
        assert!(wire.get("createdAt").is_some());
    }

    #[test]
    fn zoneless_timestamps_read_as_utc() {
        let row: ProjectRow = serde_json::from_value(json!({
            "id": "p-3",
            "website_type": "startups",
            "project_name": "MVP",
            "project_description": "Landing",
            "communication_methods": "gmail",
            "budget": "999",
            "domain": "own",
            "name": "N",
            "email": "n@example.com",
            "created_at": "2025-03-01T12:00:00.250"
        }))
        .unwrap();
        assert_eq!(row.created_at.timestamp_millis() % 1000, 250);
        assert_eq!(row.created_at.timestamp(), Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap().timestamp());
    }
}
