// src/models/news.rs

//! Campus news feed items.

use serde::{Deserialize, Serialize};

/// One item from the campus news feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewsItem {
    /// Headline
    pub title: String,

    /// Full URL to the article
    pub link: String,

    /// Publication date string as given by the feed
    pub date: Option<String>,
}
