use serde_json::{json, Value};
use thiserror::Error;

use crate::types::{CommunicationMethod, DesignSelection, Domain};
use crate::validation::looks_like_email;

/// Lowest budget accepted by the form, in rupees
pub const MIN_BUDGET: f64 = 499.0;

/// Website categories offered on the first step: (id, label)
pub const WEBSITE_TYPES: &[(&str, &str)] = &[
    ("professional", "Professional - Corporate & Business"),
    ("gaming", "Gaming - Gaming & Esports"),
    ("startups", "Startups - MVP & SaaS"),
    ("api-backend", "API & Backend - Backend Services"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    WebsiteType,
    ProjectDetails,
    Budget,
    Domain,
    Contact,
    Review,
}

impl Step {
    pub const TOTAL: u8 = 6;

    /// 1-based position, as shown to the user
    pub fn number(self) -> u8 {
        match self {
            Step::WebsiteType => 1,
            Step::ProjectDetails => 2,
            Step::Budget => 3,
            Step::Domain => 4,
            Step::Contact => 5,
            Step::Review => 6,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::WebsiteType => "Select Website Type",
            Step::ProjectDetails => "Project Details",
            Step::Budget => "Budget",
            Step::Domain => "Domain",
            Step::Contact => "Contact Information",
            Step::Review => "Review",
        }
    }

    fn next(self) -> Option<Step> {
        match self {
            Step::WebsiteType => Some(Step::ProjectDetails),
            Step::ProjectDetails => Some(Step::Budget),
            Step::Budget => Some(Step::Domain),
            Step::Domain => Some(Step::Contact),
            Step::Contact => Some(Step::Review),
            Step::Review => None,
        }
    }

    fn prev(self) -> Option<Step> {
        match self {
            Step::WebsiteType => None,
            Step::ProjectDetails => Some(Step::WebsiteType),
            Step::Budget => Some(Step::ProjectDetails),
            Step::Domain => Some(Step::Budget),
            Step::Contact => Some(Step::Domain),
            Step::Review => Some(Step::Contact),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    #[error("Select a website type")]
    WebsiteTypeMissing,
    #[error("Unknown website type '{0}'")]
    UnknownWebsiteType(String),
    #[error("Project name is required")]
    ProjectNameMissing,
    #[error("Project description is required")]
    ProjectDescriptionMissing,
    #[error("Pick at least one communication method")]
    NoCommunicationMethod,
    #[error("Budget must be a number")]
    BudgetNotNumeric,
    #[error("Minimum budget is ₹499")]
    BudgetTooLow,
    #[error("Select a domain option")]
    DomainMissing,
    #[error("Name is required")]
    NameMissing,
    #[error("Email is required")]
    EmailMissing,
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("The form can only be submitted from the review step")]
    NotAtReview,
}

/// Values collected so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntakeForm {
    pub website_type: String,
    pub project_name: String,
    pub project_description: String,
    pub communication_methods: Vec<CommunicationMethod>,
    pub budget: String,
    pub domain: Option<Domain>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub design: Option<DesignSelection>,
}

/// Multi-step intake form. State stays local until the single submit at Review.
#[derive(Debug, Clone)]
pub struct IntakeWizard {
    step: Step,
    form: IntakeForm,
}

impl Default for IntakeWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl IntakeWizard {
    pub fn new() -> Self {
        Self {
            step: Step::WebsiteType,
            form: IntakeForm::default(),
        }
    }

    /// Start with a portfolio design already chosen
    pub fn with_design(design: DesignSelection) -> Self {
        let mut wizard = Self::new();
        wizard.form.design = Some(design);
        wizard
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn form(&self) -> &IntakeForm {
        &self.form
    }

    pub fn set_website_type(&mut self, id: &str) -> Result<(), StepError> {
        let id = id.trim();
        if !WEBSITE_TYPES.iter().any(|(known, _)| *known == id) {
            return Err(StepError::UnknownWebsiteType(id.to_string()));
        }
        self.form.website_type = id.to_string();
        Ok(())
    }

    pub fn set_project_details(&mut self, name: &str, description: &str) {
        self.form.project_name = name.trim().to_string();
        self.form.project_description = description.trim().to_string();
    }

    /// Add the method if absent, remove it if present
    pub fn toggle_communication_method(&mut self, method: CommunicationMethod) {
        let methods = &mut self.form.communication_methods;
        if let Some(pos) = methods.iter().position(|m| *m == method) {
            methods.remove(pos);
        } else {
            methods.push(method);
        }
    }

    /// Replace the selection, keeping first-seen order
    pub fn set_communication_methods(&mut self, methods: &[CommunicationMethod]) {
        self.form.communication_methods.clear();
        for method in methods {
            if !self.form.communication_methods.contains(method) {
                self.form.communication_methods.push(*method);
            }
        }
    }

    pub fn set_budget(&mut self, budget: &str) {
        self.form.budget = budget.trim().to_string();
    }

    pub fn set_domain(&mut self, domain: Domain) {
        self.form.domain = Some(domain);
    }

    pub fn set_contact(&mut self, name: &str, email: &str, phone: &str, company: &str) {
        self.form.name = name.trim().to_string();
        self.form.email = email.trim().to_string();
        self.form.phone = phone.trim().to_string();
        self.form.company = company.trim().to_string();
    }

    pub fn select_design(&mut self, design: DesignSelection) {
        self.form.design = Some(design);
    }

    pub fn clear_design(&mut self) {
        self.form.design = None;
    }

    /// Check only what the current step collects
    pub fn validate_step(&self) -> Result<(), StepError> {
        self.check(self.step)
    }

    fn check(&self, step: Step) -> Result<(), StepError> {
        let f = &self.form;
        match step {
            Step::WebsiteType => {
                if f.website_type.is_empty() {
                    return Err(StepError::WebsiteTypeMissing);
                }
            }
            Step::ProjectDetails => {
                if f.project_name.is_empty() {
                    return Err(StepError::ProjectNameMissing);
                }
                if f.project_description.is_empty() {
                    return Err(StepError::ProjectDescriptionMissing);
                }
                if f.communication_methods.is_empty() {
                    return Err(StepError::NoCommunicationMethod);
                }
            }
            Step::Budget => {
                let amount: f64 = f.budget.parse().map_err(|_| StepError::BudgetNotNumeric)?;
                if !amount.is_finite() {
                    return Err(StepError::BudgetNotNumeric);
                }
                if amount < MIN_BUDGET {
                    return Err(StepError::BudgetTooLow);
                }
            }
            Step::Domain => {
                if f.domain.is_none() {
                    return Err(StepError::DomainMissing);
                }
            }
            Step::Contact => {
                if f.name.is_empty() {
                    return Err(StepError::NameMissing);
                }
                if f.email.is_empty() {
                    return Err(StepError::EmailMissing);
                }
                if !looks_like_email(&f.email) {
                    return Err(StepError::InvalidEmail);
                }
            }
            Step::Review => {}
        }
        Ok(())
    }

    /// Advance when the current step is complete. Stays on Review at the end.
    pub fn next(&mut self) -> Result<Step, StepError> {
        self.validate_step()?;
        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(self.step)
    }

    /// Go back one step; never before the first
    pub fn back(&mut self) -> Step {
        if let Some(prev) = self.step.prev() {
            self.step = prev;
        }
        self.step
    }

    /// Request body for POST /api/projects. Only available on the Review step,
    /// and every step is checked again since setters work from any step.
    pub fn submission(&self) -> Result<Value, StepError> {
        if self.step != Step::Review {
            return Err(StepError::NotAtReview);
        }
        let mut step = Some(Step::WebsiteType);
        while let Some(current) = step {
            self.check(current)?;
            step = current.next();
        }
        let f = &self.form;
        let design = f.design.as_ref();

        Ok(json!({
            "websiteType": f.website_type,
            "projectName": f.project_name,
            "projectDescription": f.project_description,
            "communicationMethods": CommunicationMethod::join(&f.communication_methods),
            "budget": f.budget,
            "domain": f.domain.map(|d| d.as_str()),
            "name": f.name,
            "email": f.email,
            "phone": optional(&f.phone),
            "company": optional(&f.company),
            "selectedDesignId": design.map(|d| d.id.clone()),
            "selectedDesignTitle": design.and_then(|d| d.title.clone()),
            "selectedDesignCategory": design.and_then(|d| d.category.clone()),
            "selectedDesignImageUrl": design.and_then(|d| d.image_url.clone()),
        }))
    }
}

fn optional(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
