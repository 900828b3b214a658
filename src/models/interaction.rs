//! Interaction (timeline entry) and analytics request models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Kind of interaction recorded on a contact's timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionType {
    EmailSent,
    Call,
    Meeting,
    Note,
    SocialTouch,
}

impl InteractionType {
    pub const NAMES: &'static [&'static str] =
        &["email_sent", "call", "meeting", "note", "social_touch"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmailSent => "email_sent",
            Self::Call => "call",
            Self::Meeting => "meeting",
            Self::Note => "note",
            Self::SocialTouch => "social_touch",
        }
    }
}

impl fmt::Display for InteractionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InteractionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email_sent" => Ok(Self::EmailSent),
            "call" => Ok(Self::Call),
            "meeting" => Ok(Self::Meeting),
            "note" => Ok(Self::Note),
            "social_touch" => Ok(Self::SocialTouch),
            other => Err(format!("Unknown interaction type: {}", other)),
        }
    }
}

/// An interaction to log against a contact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interaction {
    pub contact_id: String,

    #[serde(rename = "type")]
    pub interaction_type: InteractionType,

    /// Summary of the interaction
    pub content: String,

    /// Additional data (duration, topics, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl Interaction {
    pub fn new(
        contact_id: impl Into<String>,
        interaction_type: InteractionType,
        content: impl Into<String>,
    ) -> Self {
        Self {
            contact_id: contact_id.into(),
            interaction_type,
            content: content.into(),
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Window for pipeline analytics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "7d")]
    Week,
    #[default]
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "90d")]
    Quarter,
    #[serde(rename = "all")]
    All,
}

impl TimeRange {
    pub const NAMES: &'static [&'static str] = &["7d", "30d", "90d", "all"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Week => "7d",
            Self::Month => "30d",
            Self::Quarter => "90d",
            Self::All => "all",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "7d" => Ok(Self::Week),
            "30d" => Ok(Self::Month),
            "90d" => Ok(Self::Quarter),
            "all" => Ok(Self::All),
            other => Err(format!("Unknown time range: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_interaction_serializes_type_key() {
        let interaction = Interaction::new("c1", InteractionType::Meeting, "Coffee chat");
        let value = serde_json::to_value(&interaction).unwrap();
        assert_eq!(
            value,
            json!({"contact_id": "c1", "type": "meeting", "content": "Coffee chat"})
        );
    }

    #[test]
    fn test_names_match_as_str() {
        for name in InteractionType::NAMES {
            assert_eq!(name.parse::<InteractionType>().unwrap().as_str(), *name);
        }
        for name in TimeRange::NAMES {
            assert_eq!(name.parse::<TimeRange>().unwrap().as_str(), *name);
        }
    }

    #[test]
    fn test_time_range_default_is_thirty_days() {
        assert_eq!(TimeRange::default().as_str(), "30d");
        assert_eq!(serde_json::to_value(TimeRange::Week).unwrap(), json!("7d"));
    }
}
