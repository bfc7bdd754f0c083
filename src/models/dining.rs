// src/models/dining.rs

//! Dining location data structures.

use serde::{Deserialize, Serialize};

/// Open/closed state of a dining location at query time.
///
/// Every location is exactly one of the two; there is no third state, so
/// filtering by status partitions the location list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LocationStatus {
    Open,
    Closed,
}

impl LocationStatus {
    /// Parse a status label; anything other than an "open" marker is closed.
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("open") {
            Self::Open
        } else {
            Self::Closed
        }
    }
}

/// One line of a location's posted schedule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleEntry {
    /// Day or day range (e.g. "Mon-Fri")
    pub days: String,

    /// Posted hours for those days (e.g. "7:00 AM - 8:00 PM")
    pub hours: String,
}

/// A dining location with its current status and posted schedule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiningLocation {
    /// Display name
    pub name: String,

    /// Open/closed at query time
    pub status: LocationStatus,

    /// Posted schedule lines, in page order
    pub schedule: Vec<ScheduleEntry>,
}

impl DiningLocation {
    pub fn is_open(&self) -> bool {
        self.status == LocationStatus::Open
    }
}
