//! Value objects for the todo domain.
//!
//! Every type here is only reachable through its validating constructor, so
//! holding one is proof the raw input passed validation.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Prefix shared by every todo identifier.
pub const ID_PREFIX: &str = "todo-";

/// Maximum title length, in characters, after trimming.
pub const TITLE_MAX_LEN: usize = 100;

/// Maximum description length, in characters, after trimming.
pub const DESCRIPTION_MAX_LEN: usize = 500;

/// Reasons a value object constructor rejects its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ValidationMessage {
    #[error("Invalid todo id")]
    InvalidIdentifier,

    #[error("Title required")]
    TitleRequired,

    #[error("Title must be at most 100 characters")]
    TitleTooLong,

    #[error("Description must be at most 500 characters")]
    DescriptionTooLong,

    #[error("Description must be text")]
    InvalidDescription,

    #[error("Priority must be one of Low, Medium, High")]
    InvalidPriority,
}

/// Unique identifier for a todo.
///
/// Generated ids look like `todo-<unix millis>-<32 hex digits>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    /// Creates a fresh identifier.
    pub fn generate() -> Self {
        Self(format!(
            "{ID_PREFIX}{}-{}",
            Utc::now().timestamp_millis(),
            Uuid::new_v4().simple()
        ))
    }

    /// Accepts any string carrying the identifier prefix.
    pub fn parse(raw: &str) -> Result<Self, ValidationMessage> {
        if raw.starts_with(ID_PREFIX) {
            Ok(Self(raw.to_string()))
        } else {
            Err(ValidationMessage::InvalidIdentifier)
        }
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TodoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Trimmed, non-empty todo title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Title(String);

impl Title {
    pub fn create(raw: &str) -> Result<Self, ValidationMessage> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationMessage::TitleRequired);
        }
        if trimmed.chars().count() > TITLE_MAX_LEN {
            return Err(ValidationMessage::TitleTooLong);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Optional free text attached to a todo.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Description(String);

impl Description {
    /// Absent or blank input yields `Ok(None)`.
    pub fn create(raw: Option<&str>) -> Result<Option<Self>, ValidationMessage> {
        let Some(trimmed) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(None);
        };
        if trimmed.chars().count() > DESCRIPTION_MAX_LEN {
            return Err(ValidationMessage::DescriptionTooLong);
        }
        Ok(Some(Self(trimmed.to_string())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Todo priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Absent input defaults to [`Priority::Medium`].
    pub fn create(raw: Option<&str>) -> Result<Self, ValidationMessage> {
        raw.map_or(Ok(Self::default()), str::parse)
    }

    /// Returns the priority name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl FromStr for Priority {
    type Err = ValidationMessage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(Priority::Low),
            "Medium" => Ok(Priority::Medium),
            "High" => Ok(Priority::High),
            _ => Err(ValidationMessage::InvalidPriority),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A point in time, UTC. Serialized as RFC 3339.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn generated_ids_are_unique_and_parseable() {
        let a = TodoId::generate();
        let b = TodoId::generate();

        assert_ne!(a, b);
        assert!(a.as_str().starts_with(ID_PREFIX));
        assert_eq!(TodoId::parse(a.as_str()), Ok(a));
    }

    #[test]
    fn parse_rejects_missing_prefix() {
        assert_eq!(
            TodoId::parse("bad-id"),
            Err(ValidationMessage::InvalidIdentifier)
        );
        assert_eq!(TodoId::parse(""), Err(ValidationMessage::InvalidIdentifier));
        assert!(TodoId::parse("todo-x").is_ok());
    }

    #[test]
    fn title_is_trimmed() {
        let title = Title::create("  Buy milk \n").unwrap();
        assert_eq!(title.as_str(), "Buy milk");
    }

    #[test]
    fn blank_title_is_required() {
        assert_eq!(Title::create(""), Err(ValidationMessage::TitleRequired));
        assert_eq!(Title::create("   "), Err(ValidationMessage::TitleRequired));
        assert_eq!(
            ValidationMessage::TitleRequired.to_string(),
            "Title required"
        );
    }

    #[test]
    fn title_length_counts_characters() {
        let exact = "é".repeat(TITLE_MAX_LEN);
        assert!(Title::create(&exact).is_ok());

        let over = "é".repeat(TITLE_MAX_LEN + 1);
        assert_eq!(Title::create(&over), Err(ValidationMessage::TitleTooLong));
    }

    #[test]
    fn blank_description_is_absent() {
        assert_eq!(Description::create(None), Ok(None));
        assert_eq!(Description::create(Some("")), Ok(None));
        assert_eq!(Description::create(Some("  \t")), Ok(None));
    }

    #[test]
    fn description_is_trimmed_and_bounded() {
        let description = Description::create(Some(" 2 litres ")).unwrap().unwrap();
        assert_eq!(description.as_str(), "2 litres");

        let over = "x".repeat(DESCRIPTION_MAX_LEN + 1);
        assert_eq!(
            Description::create(Some(&over)),
            Err(ValidationMessage::DescriptionTooLong)
        );
    }

    #[test]
    fn priority_defaults_to_medium() {
        assert_eq!(Priority::create(None), Ok(Priority::Medium));
        assert_eq!(Priority::create(Some("High")), Ok(Priority::High));
        assert_eq!(Priority::create(Some("Low")), Ok(Priority::Low));
    }

    #[test]
    fn unknown_priority_is_rejected() {
        assert_eq!(
            Priority::create(Some("Urgent")),
            Err(ValidationMessage::InvalidPriority)
        );
        assert_eq!(
            Priority::create(Some("high")),
            Err(ValidationMessage::InvalidPriority)
        );
    }

    #[test]
    fn timestamps_are_ordered() {
        let earlier = Timestamp::now();
        let later = Timestamp::now();
        assert!(earlier <= later);
    }

    proptest! {
        #[test]
        fn titles_over_limit_are_rejected(
            pad in " {0,4}",
            core in "[^\\s]{101,160}",
        ) {
            let raw = format!("{pad}{core}{pad}");
            prop_assert_eq!(Title::create(&raw), Err(ValidationMessage::TitleTooLong));
        }

        #[test]
        fn titles_within_limit_round_trip(core in "[a-zA-Z0-9]{1,100}") {
            let title = Title::create(&format!(" {core} ")).unwrap();
            prop_assert_eq!(title.as_str(), core.as_str());
        }

        #[test]
        fn descriptions_over_limit_are_rejected(core in "[a-z]{501,600}") {
            prop_assert_eq!(
                Description::create(Some(&core)),
                Err(ValidationMessage::DescriptionTooLong)
            );
        }
    }
}
