//! Courts and events lists kept alongside the site configuration.
//!
//! These records are persisted and exported with the workspace, but the
//! booking table that consumes them lives outside this crate.

use serde::{Deserialize, Serialize};

/// A bookable court.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Court {
    /// Stable identifier
    pub id: String,
    /// Display name (e.g. "Pista 1")
    pub name: String,
    /// Sport played on the court
    #[serde(default)]
    pub sport: String,
    /// Covered or open-air
    #[serde(default)]
    pub indoor: bool,
}

impl Court {
    /// Creates a court record.
    pub fn new(id: impl Into<String>, name: impl Into<String>, sport: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sport: sport.into(),
            indoor: false,
        }
    }
}

/// A club event shown on the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Stable identifier
    pub id: String,
    /// Event title
    pub title: String,
    /// Free-form date text
    #[serde(default)]
    pub date: String,
    /// Longer description
    #[serde(default)]
    pub description: String,
}

/// Courts of a freshly installed site.
#[must_use]
pub fn default_courts() -> Vec<Court> {
    vec![
        Court {
            indoor: true,
            ..Court::new("court-1", "Pista 1", "pádel")
        },
        Court {
            indoor: true,
            ..Court::new("court-2", "Pista 2", "pádel")
        },
        Court::new("court-3", "Pista 3", "tenis"),
    ]
}
