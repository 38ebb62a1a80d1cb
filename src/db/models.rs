//! Database models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Maximum stored explanation length, in characters
pub const EXPLANATION_MAX_CHARS: usize = 150;

/// Business-category label assigned to a license
///
/// Closed set. Anything outside it coming back from a model is replaced by
/// the `Productivity` fallback before storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Typology {
    Productivity,
    Design,
    Communication,
    Development,
    Finance,
    Marketing,
}

impl Typology {
    /// All labels in alphabetical order (the order used in prompts)
    pub const ALL: [Typology; 6] = [
        Typology::Communication,
        Typology::Design,
        Typology::Development,
        Typology::Finance,
        Typology::Marketing,
        Typology::Productivity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Productivity => "Productivity",
            Self::Design => "Design",
            Self::Communication => "Communication",
            Self::Development => "Development",
            Self::Finance => "Finance",
            Self::Marketing => "Marketing",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Productivity" => Some(Self::Productivity),
            "Design" => Some(Self::Design),
            "Communication" => Some(Self::Communication),
            "Development" => Some(Self::Development),
            "Finance" => Some(Self::Finance),
            "Marketing" => Some(Self::Marketing),
            _ => None,
        }
    }
}

/// Which actor last set a record's classification fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecidedBy {
    Automated,
    Manual,
}

impl DecidedBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Automated => "automated",
            Self::Manual => "manual",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "automated" => Some(Self::Automated),
            "manual" => Some(Self::Manual),
            _ => None,
        }
    }
}

/// A license row, classified or not
///
/// `license_id` comes from the input source and is never generated here.
/// Classification fields stay NULL until a cycle or a manual override sets them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LicenseRecord {
    pub license_id: i64,
    pub license_description: String,
    pub typology: Option<String>,
    pub explanation: Option<String>,
    pub decided_by: Option<String>,
}

impl LicenseRecord {
    /// True when a human reviewer owns this record's classification
    pub fn is_manual(&self) -> bool {
        self.decided_by.as_deref() == Some(DecidedBy::Manual.as_str())
    }
}

/// Truncate an explanation to the storage cap, counting characters not bytes
pub fn truncate_explanation(text: &str) -> String {
    text.chars().take(EXPLANATION_MAX_CHARS).collect()
}
