// src/models/machine.rs

//! Laundry machine and computer lab utilization records.

use serde::{Deserialize, Serialize};

/// Washer/dryer availability for one residence building.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LaundryStatus {
    /// Building display name
    pub building: String,

    /// Washers currently free
    pub free_washers: u32,

    /// Washers installed
    pub total_washers: u32,

    /// Dryers currently free
    pub free_dryers: u32,

    /// Dryers installed
    pub total_dryers: u32,
}

/// Workstation availability for one computing lab.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LabStatus {
    /// Lab display name
    pub lab: String,

    /// "open" or "closed"
    pub status: String,

    /// Windows machines available
    pub windows: u32,

    /// Macs available
    pub macs: u32,

    /// Linux machines available
    pub linux: u32,
}
