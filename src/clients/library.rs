// src/clients/library.rs

//! Library search client.
//!
//! Queries the library discovery JSON endpoint and returns matched
//! [`Document`] records. Fields absent from a hit default to `None`; a query
//! with zero hits returns an empty result, not an error.

use reqwest::blocking::Client;
use serde_json::Value;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::models::{Document, DocumentSearchResult};
use crate::utils::http::{create_client, fetch_json};

const LIBRARY_SEARCH_URL: &str =
    "https://pitt.primo.exlibrisgroup.com/primaws/rest/pub/pnxs?vid=01PITT_INST:01PITT_INST&tab=Everything&scope=MyInst_and_CI&limit=10&offset=0";

/// Client for the library discovery endpoint.
pub struct LibraryClient {
    client: Client,
}

impl LibraryClient {
    /// Create a client with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config(&ClientConfig::default())
    }

    /// Create a client with explicit settings.
    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            client: create_client(config)?,
        })
    }

    /// Search the catalog and return the first page of matches.
    pub fn get_documents(&self, query: &str) -> Result<DocumentSearchResult> {
        let url = search_url(query)?;
        let body = fetch_json(&self.client, url.as_str(), "library search")?;
        parse_search_response(&body)
    }
}

/// Search the catalog with default settings.
pub fn get_documents(query: &str) -> Result<DocumentSearchResult> {
    LibraryClient::new()?.get_documents(query)
}

/// Build the search URL, encoding the query as a proper query pair.
fn search_url(query: &str) -> Result<Url> {
    let mut url = Url::parse(LIBRARY_SEARCH_URL)?;
    url.query_pairs_mut()
        .append_pair("q", &format!("any,contains,{query}"));
    Ok(url)
}

/// Parse the discovery response body into a search result.
fn parse_search_response(body: &Value) -> Result<DocumentSearchResult> {
    let docs = body
        .get("docs")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::parse("library search", "response has no docs array"))?;

    let total = body
        .pointer("/info/total")
        .and_then(Value::as_u64)
        .unwrap_or(docs.len() as u64);

    let docs = docs.iter().filter_map(parse_doc).collect();
    Ok(DocumentSearchResult { total, docs })
}

/// Read one hit's display fields; a hit without a title is dropped.
fn parse_doc(doc: &Value) -> Option<Document> {
    let display = doc.pointer("/pnx/display")?;
    let title = first_display_value(display, "title")?;
    Some(Document {
        title,
        author: first_display_value(display, "creator"),
        year: first_display_value(display, "creationdate"),
        doc_type: first_display_value(display, "type"),
        link: doc
            .pointer("/delivery/availabilityLinksUrl/0")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

/// Display fields are arrays of strings; take the first entry.
fn first_display_value(display: &Value, field: &str) -> Option<String> {
    display
        .get(field)?
        .as_array()?
        .first()?
        .as_str()
        .map(str::to_string)
}
