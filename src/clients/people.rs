// src/clients/people.rs

//! Directory search client.
//!
//! Posts a query to the campus directory search form and parses the result
//! cards into [`Person`] records. No match returns an empty list.

use reqwest::blocking::Client;
use scraper::{ElementRef, Html, Selector};

use crate::config::ClientConfig;
use crate::error::Result;
use crate::models::Person;
use crate::utils::clean_text;
use crate::utils::http::{create_client, ensure_success, parse_selector};

const PEOPLE_SEARCH_URL: &str = "https://find.pitt.edu/Search";

/// Client for the directory search endpoint.
pub struct PeopleClient {
    client: Client,
}

impl PeopleClient {
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

    /// Search the directory for people matching `query`.
    pub fn get_person(&self, query: &str) -> Result<Vec<Person>> {
        let response = self
            .client
            .post(PEOPLE_SEARCH_URL)
            .form(&[("search", query)])
            .send()?;
        let response = ensure_success(response, "directory search")?;
        let document = Html::parse_document(&response.text()?);
        parse_results(&document)
    }
}

/// Search the directory with default settings.
pub fn get_person(query: &str) -> Result<Vec<Person>> {
    PeopleClient::new()?.get_person(query)
}

/// Parse the result cards. A page with no cards is a no-match, not an error.
fn parse_results(document: &Html) -> Result<Vec<Person>> {
    let card_sel = parse_selector("div.person-result")?;
    let name_sel = parse_selector(".person-name")?;
    let email_sel = parse_selector(".person-email")?;
    let phone_sel = parse_selector(".person-phone")?;
    let dept_sel = parse_selector(".person-department")?;

    let people = document
        .select(&card_sel)
        .filter_map(|card| {
            let name = field_text(&card, &name_sel)?;
            Some(Person {
                name,
                email: field_text(&card, &email_sel),
                office_phone: field_text(&card, &phone_sel),
                department: field_text(&card, &dept_sel),
            })
        })
        .collect();
    Ok(people)
}

fn field_text(card: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    let text = clean_text(&card.select(selector).next()?.text().collect::<String>());
    if text.is_empty() { None } else { Some(text) }
}
