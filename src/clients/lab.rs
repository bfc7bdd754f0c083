// src/clients/lab.rs

//! Computer lab status client.
//!
//! Scrapes the lab status page for workstation availability. Lab names are
//! resolved against a static roster; an unknown lab is a not-found error,
//! while a known lab absent from the page reports as closed.

use regex::Regex;
use reqwest::blocking::Client;
use scraper::Html;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::models::LabStatus;
use crate::utils::clean_text;
use crate::utils::http::{create_client, fetch_document, parse_selector};
use crate::utils::normalize_key;

const LAB_STATUS_URL: &str = "https://www.technology.pitt.edu/computing-labs-status";

/// Computing labs with published status.
const LABS: &[&str] = &[
    "Alumni",
    "Benedum",
    "Cathedral G27",
    "Cathedral G62",
    "Lawrence",
    "Hillman",
    "Sutherland",
];

/// Client for the lab status endpoint.
pub struct LabClient {
    client: Client,
}

impl LabClient {
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

    /// Fetch workstation availability for one lab.
    pub fn get_status(&self, lab: &str) -> Result<LabStatus> {
        let lab = lookup_lab(lab)?;
        let document = fetch_document(&self.client, LAB_STATUS_URL, "lab status")?;
        parse_lab_status(&document, lab)
    }

    /// Labs this client can report on.
    pub fn labs() -> Vec<&'static str> {
        LABS.to_vec()
    }
}

/// Fetch workstation availability for one lab with default settings.
pub fn get_status(lab: &str) -> Result<LabStatus> {
    LabClient::new()?.get_status(lab)
}

/// Resolve a lab name against the roster, case-insensitive.
fn lookup_lab(lab: &str) -> Result<&'static str> {
    let key = normalize_key(lab);
    LABS.iter()
        .find(|name| normalize_key(name) == key)
        .copied()
        .ok_or_else(|| Error::not_found("lab", lab.to_string()))
}

/// Find the status line for `lab` and extract machine counts.
///
/// Status lines read like `"Alumni: open | 12 Windows, 5 Macs, 2 Linux"`.
/// A lab with no line on the page reports closed with zero counts.
fn parse_lab_status(document: &Html, lab: &str) -> Result<LabStatus> {
    let row_sel = parse_selector("div.lab-status")?;
    let lab_key = normalize_key(lab);

    for row in document.select(&row_sel) {
        let text = clean_text(&row.text().collect::<String>());
        let Some((name, rest)) = text.split_once(':') else {
            continue;
        };
        if normalize_key(name) != lab_key {
            continue;
        }

        let open = rest.to_lowercase().contains("open");
        let (windows, macs, linux) = if open {
            extract_counts(rest)
        } else {
            (0, 0, 0)
        };
        return Ok(LabStatus {
            lab: lab.to_string(),
            status: if open { "open" } else { "closed" }.to_string(),
            windows,
            macs,
            linux,
        });
    }

    log::warn!("lab {lab} absent from status page, reporting closed");
    Ok(LabStatus {
        lab: lab.to_string(),
        status: "closed".to_string(),
        windows: 0,
        macs: 0,
        linux: 0,
    })
}

/// Pull per-platform counts out of a status line; absent platforms are zero.
fn extract_counts(text: &str) -> (u32, u32, u32) {
    let count_for = |label: &str| -> u32 {
        Regex::new(&format!(r"(?i)(\d+)\s*{label}"))
            .ok()
            .and_then(|re| re.captures(text))
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0)
    };
    (count_for("Windows"), count_for("Macs?"), count_for("Linux"))
}
