// src/models/library.rs

//! Library catalog search results.

use serde::{Deserialize, Serialize};

/// One matched catalog document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    /// Document title
    pub title: String,

    /// Primary author, when listed
    pub author: Option<String>,

    /// Publication year, when listed
    pub year: Option<String>,

    /// Resource type (e.g. "book", "article")
    pub doc_type: Option<String>,

    /// Permalink into the catalog
    pub link: Option<String>,
}

/// Result of one catalog query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentSearchResult {
    /// Total hits reported upstream (may exceed the returned page)
    pub total: u64,

    /// Matched documents on the first result page
    pub docs: Vec<Document>,
}
