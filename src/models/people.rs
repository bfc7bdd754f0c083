// src/models/people.rs

//! Directory search results.

use serde::{Deserialize, Serialize};

/// One person record from the campus directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Person {
    /// Display name
    pub name: String,

    /// University email, when listed
    pub email: Option<String>,

    /// Office phone, when listed
    pub office_phone: Option<String>,

    /// Department or affiliation, when listed
    pub department: Option<String>,
}
