//! Maintenance status catalog.
//!
//! Every status has a fixed set of display attributes used by the email
//! template. Unknown status keys are normalized to [`StatusKey::Scheduled`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a maintenance window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StatusKey {
    #[default]
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

/// Display attributes for a status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusMetadata {
    pub icon: &'static str,
    pub label: &'static str,
    pub css_class: &'static str,
    pub end_label: &'static str,
}

const SCHEDULED: StatusMetadata = StatusMetadata {
    icon: "🟡",
    label: "Scheduled",
    css_class: "scheduled",
    end_label: "Scheduled for",
};

const IN_PROGRESS: StatusMetadata = StatusMetadata {
    icon: "🔵",
    label: "In Progress",
    css_class: "in-progress",
    end_label: "Expected completion",
};

const COMPLETED: StatusMetadata = StatusMetadata {
    icon: "✅",
    label: "Complete",
    css_class: "completed",
    end_label: "Completed",
};

const CANCELLED: StatusMetadata = StatusMetadata {
    icon: "❌",
    label: "Cancelled",
    css_class: "cancelled",
    end_label: "Cancelled at",
};

impl StatusKey {
    /// All statuses, in the order they are offered in the form
    pub const ALL: [StatusKey; 4] = [
        StatusKey::Scheduled,
        StatusKey::InProgress,
        StatusKey::Completed,
        StatusKey::Cancelled,
    ];

    /// Map a raw key to a status, falling back to `Scheduled` for anything unknown
    pub fn from_key(key: &str) -> Self {
        match key {
            "scheduled" => StatusKey::Scheduled,
            "in-progress" => StatusKey::InProgress,
            "completed" => StatusKey::Completed,
            "cancelled" => StatusKey::Cancelled,
            _ => StatusKey::Scheduled,
        }
    }

    /// Wire key of this status
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusKey::Scheduled => "scheduled",
            StatusKey::InProgress => "in-progress",
            StatusKey::Completed => "completed",
            StatusKey::Cancelled => "cancelled",
        }
    }

    pub fn metadata(&self) -> &'static StatusMetadata {
        match self {
            StatusKey::Scheduled => &SCHEDULED,
            StatusKey::InProgress => &IN_PROGRESS,
            StatusKey::Completed => &COMPLETED,
            StatusKey::Cancelled => &CANCELLED,
        }
    }

    /// Label shown in the status selector, e.g. `🔵 In-progress`
    pub fn option_label(&self) -> String {
        format!("{} {}", self.metadata().icon, capitalize(self.as_str()))
    }
}

/// Look up the display attributes for a raw status key
pub fn lookup(key: &str) -> &'static StatusMetadata {
    StatusKey::from_key(key).metadata()
}

impl From<String> for StatusKey {
    fn from(key: String) -> Self {
        StatusKey::from_key(&key)
    }
}

impl From<StatusKey> for String {
    fn from(status: StatusKey) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for StatusKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upper-case the first character, leave the rest untouched
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_keys() {
        let row = lookup("scheduled");
        assert_eq!(
            (row.icon, row.label, row.css_class, row.end_label),
            ("🟡", "Scheduled", "scheduled", "Scheduled for")
        );

        let row = lookup("in-progress");
        assert_eq!(
            (row.icon, row.label, row.css_class, row.end_label),
            ("🔵", "In Progress", "in-progress", "Expected completion")
        );

        let row = lookup("completed");
        assert_eq!(
            (row.icon, row.label, row.css_class, row.end_label),
            ("✅", "Complete", "completed", "Completed")
        );

        let row = lookup("cancelled");
        assert_eq!(
            (row.icon, row.label, row.css_class, row.end_label),
            ("❌", "Cancelled", "cancelled", "Cancelled at")
        );
    }

    #[test]
    fn test_lookup_unknown_falls_back_to_scheduled() {
        assert_eq!(lookup("unknown"), &SCHEDULED);
        assert_eq!(lookup(""), &SCHEDULED);
        assert_eq!(lookup("Scheduled"), &SCHEDULED);
        assert_eq!(lookup("IN-PROGRESS"), &SCHEDULED);
    }

    #[test]
    fn test_key_round_trips_through_as_str() {
        for status in StatusKey::ALL {
            assert_eq!(StatusKey::from_key(status.as_str()), status);
        }
    }

    #[test]
    fn test_option_label() {
        assert_eq!(StatusKey::Scheduled.option_label(), "🟡 Scheduled");
        assert_eq!(StatusKey::InProgress.option_label(), "🔵 In-progress");
        assert_eq!(StatusKey::Cancelled.option_label(), "❌ Cancelled");
    }

    #[test]
    fn test_deserialize_normalizes_unknown() {
        let status: StatusKey = serde_json::from_str("\"in-progress\"").unwrap();
        assert_eq!(status, StatusKey::InProgress);

        let status: StatusKey = serde_json::from_str("\"paused\"").unwrap();
        assert_eq!(status, StatusKey::Scheduled);

        assert_eq!(
            serde_json::to_string(&StatusKey::Completed).unwrap(),
            "\"completed\""
        );
    }
}
