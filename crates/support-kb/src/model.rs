use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A single knowledge-base entry (e.g., "ts5: Device Not Charging").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Identifier, unique within its category, e.g. "faq1", "ts5", "pol1"
    pub id: String,
    /// Short title, e.g. "Refund Process"
    pub title: String,
    /// Body text
    pub content: String,
}

/// A fixed partition of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Faq,
    Troubleshooting,
    Policy,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Faq, Category::Troubleshooting, Category::Policy];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Faq => "faq",
            Category::Troubleshooting => "troubleshooting",
            Category::Policy => "policy",
        }
    }

    /// Message returned to agents when a search in this category finds nothing.
    pub fn no_match_message(self) -> &'static str {
        match self {
            Category::Faq => "No relevant FAQ entries found for your query.",
            Category::Troubleshooting => "No relevant troubleshooting guides found for this issue.",
            Category::Policy => "No relevant policy documents found for your query.",
        }
    }

    pub fn available() -> String {
        Self::ALL
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "faq" | "faqs" => Ok(Category::Faq),
            "troubleshooting" => Ok(Category::Troubleshooting),
            "policy" | "policies" => Ok(Category::Policy),
            other => Err(format!(
                "unknown category: '{other}'. Available categories: {}",
                Self::available()
            )),
        }
    }
}
