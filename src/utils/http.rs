// src/utils/http.rs

//! HTTP client utilities.
//!
//! All clients in this crate are blocking: one outbound request, one bounded
//! timeout, no retries.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use scraper::{Html, Selector};

use crate::config::ClientConfig;
use crate::error::{Error, Result};

/// Create a configured blocking HTTP client.
pub fn create_client(config: &ClientConfig) -> Result<Client> {
    config.validate()?;
    let client = Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Fail on non-success status codes before any body parsing.
pub fn ensure_success(response: Response, context: &str) -> Result<Response> {
    let status = response.status();
    if !status.is_success() {
        return Err(Error::unexpected(context, format!("status {status}")));
    }
    Ok(response)
}

/// Fetch a page and parse it as HTML.
pub fn fetch_document(client: &Client, url: &str, context: &str) -> Result<Html> {
    let response = ensure_success(client.get(url).send()?, context)?;
    let text = response.text()?;
    Ok(Html::parse_document(&text))
}

/// Fetch a JSON endpoint into an untyped value.
pub fn fetch_json(client: &Client, url: &str, context: &str) -> Result<serde_json::Value> {
    let response = ensure_success(client.get(url).send()?, context)?;
    let text = response.text()?;
    serde_json::from_str(&text)
        .map_err(|e| Error::unexpected(context, format!("body is not JSON: {e}")))
}

/// Parse a CSS selector, mapping failure to a typed error.
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| Error::selector(s, format!("{e:?}")))
}
