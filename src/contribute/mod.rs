//! Peacebuilding idea submissions.
//!
//! A form fills an [`IdeaDraft`]; validation either turns it into an
//! [`IdeaSubmission`] or yields one message per offending field. Sending is
//! simulated (see [`submit`]) and nothing is persisted.

pub mod form;
pub mod submit;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use validator::{Validate, ValidationErrors};

pub use form::{ContributionForm, FormField};
pub use submit::{IdeaSink, PendingSubmission, SimulatedSink, SubmissionState, SubmitError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Policy,
    Community,
    Technology,
    Education,
    Economic,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Policy,
        Category::Community,
        Category::Technology,
        Category::Education,
        Category::Economic,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Policy => "Policy & Governance",
            Category::Community => "Community Engagement",
            Category::Technology => "Technology Solutions",
            Category::Education => "Education & Awareness",
            Category::Economic => "Economic Development",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImplementationLevel {
    Local,
    National,
    Regional,
    Global,
}

impl ImplementationLevel {
    pub const ALL: [ImplementationLevel; 4] = [
        ImplementationLevel::Local,
        ImplementationLevel::National,
        ImplementationLevel::Regional,
        ImplementationLevel::Global,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ImplementationLevel::Local => "Local Community",
            ImplementationLevel::National => "National",
            ImplementationLevel::Regional => "Regional",
            ImplementationLevel::Global => "Global",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ImplementationLevel::Local => "Neighborhood or city level",
            ImplementationLevel::National => "Country-wide implementation",
            ImplementationLevel::Regional => "Multi-country or continental",
            ImplementationLevel::Global => "Worldwide application",
        }
    }
}

/// Review lifecycle of a received idea
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Pending,
    Reviewed,
    Approved,
    Implemented,
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Reviewed => "reviewed",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Implemented => "implemented",
        };
        f.write_str(s)
    }
}

/// Raw form contents, checked field by field
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct IdeaDraft {
    #[validate(length(min = 5, message = "Title must be at least 5 characters"))]
    pub title: String,

    #[validate(length(min = 50, message = "Description must be at least 50 characters"))]
    pub description: String,

    #[validate(required(message = "Please choose a category"))]
    pub category: Option<Category>,

    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub author: String,

    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,

    pub region: Option<String>,

    #[validate(required(message = "Please choose an implementation level"))]
    pub implementation_level: Option<ImplementationLevel>,

    #[validate(length(min = 10, message = "Please describe the resources needed"))]
    pub resources: String,

    #[validate(length(min = 20, message = "Please describe the expected impact"))]
    pub expected_impact: String,
}

/// A draft that passed validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaSubmission {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub author: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub implementation_level: ImplementationLevel,
    pub resources: String,
    pub expected_impact: String,
}

/// What the receiving side hands back for an accepted submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionIdea {
    pub id: String,
    #[serde(flatten)]
    pub idea: IdeaSubmission,
    pub submitted_at: DateTime<Utc>,
    pub status: ReviewStatus,
}

/// One message per failing field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<FormField, String>);

impl FieldErrors {
    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.0.keys().copied()
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut map = BTreeMap::new();
        for (name, field_errors) in errors.field_errors() {
            let name: &str = &name;
            let Some(field) = FormField::from_name(name) else {
                continue;
            };
            let message = field_errors
                .first()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .unwrap_or_else(|| "Invalid value".to_string());
            map.insert(field, message);
        }
        FieldErrors(map)
    }
}

impl IdeaDraft {
    /// Validate and convert, trimming the optional region to `None` when blank
    pub fn finalize(&self) -> Result<IdeaSubmission, FieldErrors> {
        self.validate().map_err(FieldErrors::from)?;
        let (Some(category), Some(implementation_level)) =
            (self.category, self.implementation_level)
        else {
            // `required` above already rejects these
            return Err(FieldErrors::default());
        };
        let region = self
            .region
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string);
        Ok(IdeaSubmission {
            title: self.title.clone(),
            description: self.description.clone(),
            category,
            author: self.author.clone(),
            email: self.email.clone(),
            region,
            implementation_level,
            resources: self.resources.clone(),
            expected_impact: self.expected_impact.clone(),
        })
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn valid_draft() -> IdeaDraft {
        IdeaDraft {
            title: "Village mediation circles".into(),
            description: "Train trusted elders from both communities to mediate land \
                          disputes before they escalate."
                .into(),
            category: Some(Category::Community),
            author: "Amina".into(),
            email: "amina@example.org".into(),
            region: Some("  ".into()),
            implementation_level: Some(ImplementationLevel::Local),
            resources: "Trainers, meeting space, small stipends".into(),
            expected_impact: "Fewer violent land disputes within two years".into(),
        }
    }
}
