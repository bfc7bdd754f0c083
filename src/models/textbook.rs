// src/models/textbook.rs

//! Textbook lookup records.

use serde::{Deserialize, Serialize};

/// One textbook assigned to a course section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Textbook {
    /// ISBN as reported by the bookstore service
    pub isbn: String,

    /// Book title
    pub title: String,

    /// Author display string, when listed
    pub author: Option<String>,

    /// Edition label, when listed
    pub edition: Option<String>,

    /// Full bibliographic citation, when provided
    pub citation: Option<String>,
}
