// src/models/shuttle.rs

//! Shuttle route definitions.

use serde::{Deserialize, Serialize};

/// One shuttle route as defined by the tracking service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShuttleRoute {
    /// Route id assigned by the tracking service
    pub id: u64,

    /// Route display name
    pub description: String,

    /// Map color for the route, when provided
    pub color: Option<String>,

    /// Stop display names in route order
    pub stops: Vec<String>,
}
