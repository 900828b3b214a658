//! Contact-facing request models for the typed toolkit methods.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pipeline stage of a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    #[default]
    Lead,
    Customer,
    Partner,
    Investor,
}

impl ContactStatus {
    /// Wire names accepted by the backend, in pipeline order.
    pub const NAMES: &'static [&'static str] = &["lead", "customer", "partner", "investor"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lead => "lead",
            Self::Customer => "customer",
            Self::Partner => "partner",
            Self::Investor => "investor",
        }
    }
}

impl fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lead" => Ok(Self::Lead),
            "customer" => Ok(Self::Customer),
            "partner" => Ok(Self::Partner),
            "investor" => Ok(Self::Investor),
            other => Err(format!("Unknown contact status: {}", other)),
        }
    }
}

/// Filters for `search_contacts`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchContactsParams {
    /// Free-text search across name, email, company
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ContactStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// Minimum engagement score (0-100)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_engagement: Option<f64>,

    /// Maximum results (backend default applies when absent: 20)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// A contact to create.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewContact {
    pub first_name: String,
    pub last_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    /// Initial pipeline status (default: lead)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ContactStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewContact {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Self::default()
        }
    }
}

/// Partial update of a contact. Only `Some` fields are sent.
///
/// `tags` replaces the full tag list; the backend has no additive tag update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContactUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ContactStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}
