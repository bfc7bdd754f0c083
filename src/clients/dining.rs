// src/clients/dining.rs

//! Dining status client.
//!
//! Scrapes the dining hours page into [`DiningLocation`] records. Every
//! location card carries a status badge, so each location is exactly one of
//! open or closed at query time.

use reqwest::blocking::Client;
use scraper::{ElementRef, Html};

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::models::{DiningLocation, LocationStatus, ScheduleEntry};
use crate::utils::http::{create_client, fetch_document, parse_selector};
use crate::utils::{clean_text, normalize_key};

const DINING_URL: &str = "https://www.pc.pitt.edu/dining/locations-hours";

/// Client for the dining status endpoint.
pub struct DiningClient {
    client: Client,
}

impl DiningClient {
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

    /// Fetch every dining location with its status and posted schedule.
    pub fn get_locations(&self) -> Result<Vec<DiningLocation>> {
        let document = fetch_document(&self.client, DINING_URL, "dining hours")?;
        parse_locations(&document)
    }

    /// Fetch the locations currently in the given status.
    pub fn get_locations_by_status(&self, status: LocationStatus) -> Result<Vec<DiningLocation>> {
        let mut locations = self.get_locations()?;
        locations.retain(|l| l.status == status);
        Ok(locations)
    }

    /// Look up one location by name.
    ///
    /// Matching is fuzzy (case and punctuation insensitive). A name with no
    /// match returns `None`, never an error.
    pub fn get_location_by_name(&self, name: &str) -> Result<Option<DiningLocation>> {
        let key = normalize_key(name);
        let locations = self.get_locations()?;
        Ok(locations
            .into_iter()
            .find(|l| normalize_key(&l.name) == key))
    }
}

/// Fetch every dining location with default settings.
pub fn get_locations() -> Result<Vec<DiningLocation>> {
    DiningClient::new()?.get_locations()
}

/// Fetch the locations currently in the given status with default settings.
pub fn get_locations_by_status(status: LocationStatus) -> Result<Vec<DiningLocation>> {
    DiningClient::new()?.get_locations_by_status(status)
}

/// Look up one location by name with default settings.
pub fn get_location_by_name(name: &str) -> Result<Option<DiningLocation>> {
    DiningClient::new()?.get_location_by_name(name)
}

/// Parse the hours page into location records.
fn parse_locations(document: &Html) -> Result<Vec<DiningLocation>> {
    let card_sel = parse_selector("div.location")?;
    let name_sel = parse_selector(".location-name")?;
    let status_sel = parse_selector(".location-status")?;
    let schedule_sel = parse_selector(".location-hours li")?;
    let days_sel = parse_selector(".days")?;
    let hours_sel = parse_selector(".hours")?;

    let mut locations = Vec::new();
    for card in document.select(&card_sel) {
        let Some(name_elem) = card.select(&name_sel).next() else {
            log::warn!("location card without a name, skipping");
            continue;
        };
        let name = clean_text(&name_elem.text().collect::<String>());
        if name.is_empty() {
            continue;
        }

        // A card without a status badge is treated as closed.
        let status = card
            .select(&status_sel)
            .next()
            .map(|e| LocationStatus::from_label(&e.text().collect::<String>()))
            .unwrap_or(LocationStatus::Closed);

        let schedule = card
            .select(&schedule_sel)
            .filter_map(|row| parse_schedule_entry(&row, &days_sel, &hours_sel))
            .collect();

        locations.push(DiningLocation {
            name,
            status,
            schedule,
        });
    }

    if locations.is_empty() {
        return Err(Error::parse("dining hours", "no location cards in page"));
    }
    Ok(locations)
}

fn parse_schedule_entry(
    row: &ElementRef<'_>,
    days_sel: &scraper::Selector,
    hours_sel: &scraper::Selector,
) -> Option<ScheduleEntry> {
    let days = clean_text(&row.select(days_sel).next()?.text().collect::<String>());
    let hours = clean_text(&row.select(hours_sel).next()?.text().collect::<String>());
    if days.is_empty() && hours.is_empty() {
        return None;
    }
    Some(ScheduleEntry { days, hours })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOURS_FIXTURE: &str = r#"
        <div class="dining">
            <div class="location">
                <h2 class="location-name">The Eatery</h2>
                <span class="location-status">Open</span>
                <ul class="location-hours">
                    <li><span class="days">Mon-Fri</span><span class="hours">7:00 AM - 8:00 PM</span></li>
                    <li><span class="days">Sat-Sun</span><span class="hours">9:00 AM - 7:00 PM</span></li>
                </ul>
            </div>
            <div class="location">
                <h2 class="location-name">Market Central</h2>
                <span class="location-status">Closed</span>
                <ul class="location-hours">
                    <li><span class="days">Mon-Fri</span><span class="hours">11:00 AM - 2:00 PM</span></li>
                </ul>
            </div>
            <div class="location">
                <h2 class="location-name">The Perch</h2>
                <span class="location-status">Open</span>
            </div>
        </div>
    "#;

    fn fixture_locations() -> Vec<DiningLocation> {
        parse_locations(&Html::parse_document(HOURS_FIXTURE)).unwrap()
    }

    #[test]
    fn test_parses_all_cards() {
        let locations = fixture_locations();
        assert_eq!(locations.len(), 3);
        assert_eq!(locations[0].name, "The Eatery");
        assert_eq!(locations[0].schedule.len(), 2);
        assert_eq!(locations[0].schedule[0].days, "Mon-Fri");
        assert!(locations[2].schedule.is_empty());
    }

    #[test]
    fn test_status_partitions_locations() {
        let all = fixture_locations();
        let open: Vec<_> = all.iter().filter(|l| l.is_open()).collect();
        let closed: Vec<_> = all.iter().filter(|l| !l.is_open()).collect();
        assert_eq!(open.len() + closed.len(), all.len());
        assert_eq!(open.len(), 2);
        assert_eq!(closed.len(), 1);
    }

    #[test]
    fn test_name_lookup_is_fuzzy() {
        let locations = fixture_locations();
        let key = normalize_key("the perch!");
        let found = locations.iter().find(|l| normalize_key(&l.name) == key);
        assert_eq!(found.map(|l| l.name.as_str()), Some("The Perch"));
    }

    #[test]
    fn test_unknown_name_is_none_not_error() {
        let locations = fixture_locations();
        let key = normalize_key("Nonexistent Hall");
        assert!(locations.iter().all(|l| normalize_key(&l.name) != key));
    }

    #[test]
    fn test_empty_page_is_a_parse_error() {
        let document = Html::parse_document("<html><body></body></html>");
        assert!(matches!(
            parse_locations(&document),
            Err(Error::Parse { .. })
        ));
    }
}
