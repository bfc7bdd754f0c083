// src/clients/laundry.rs

//! Laundry status client.
//!
//! Fetches washer/dryer availability for residence buildings from the
//! laundry monitoring service. Buildings are resolved through a static
//! roster of room ids; an unknown building is a not-found error.

use reqwest::blocking::Client;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::models::LaundryStatus;
use crate::utils::http::{create_client, fetch_json};
use crate::utils::normalize_key;

const ROOM_DATA_URL: &str = "https://www.laundryview.com/api/currentRoomData?school_desc_key=197";

/// Residence buildings with monitored laundry rooms, keyed by room id.
const BUILDINGS: &[(&str, &str)] = &[
    ("Towers", "2430136"),
    ("Brackenridge", "2430119"),
    ("Holland", "2430137"),
    ("Lothrop", "2430151"),
    ("McCormick", "2430120"),
    ("Sutherland East", "2430135"),
    ("Sutherland West", "2430134"),
    ("Forbes Craig", "2430142"),
];

/// Client for the laundry monitoring endpoint.
pub struct LaundryClient {
    client: Client,
}

impl LaundryClient {
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

    /// Fetch machine availability counts for one residence building.
    pub fn get_status_simple(&self, building: &str) -> Result<LaundryStatus> {
        let (name, room_id) = lookup_building(building)?;
        let url = format!("{ROOM_DATA_URL}&location={room_id}");
        let body = fetch_json(&self.client, &url, "laundry status")?;
        parse_room_data(&body, name)
    }

    /// Buildings this client can report on.
    pub fn buildings() -> Vec<&'static str> {
        BUILDINGS.iter().map(|(name, _)| *name).collect()
    }
}

/// Fetch machine availability for one building with default settings.
pub fn get_status_simple(building: &str) -> Result<LaundryStatus> {
    LaundryClient::new()?.get_status_simple(building)
}

/// Resolve a building name against the roster, case and punctuation
/// insensitive. Unknown names are a not-found error (lookup by identifier).
fn lookup_building(building: &str) -> Result<(&'static str, &'static str)> {
    let key = normalize_key(building);
    BUILDINGS
        .iter()
        .find(|(name, _)| normalize_key(name) == key)
        .copied()
        .ok_or_else(|| Error::not_found("building", building.to_string()))
}

/// Count free and installed machines from the room data payload.
///
/// A machine entry without a readable status counts as in-use so
/// availability is never overstated.
fn parse_room_data(body: &Value, building: &str) -> Result<LaundryStatus> {
    let objects = body
        .get("objects")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::parse("laundry status", "response has no objects array"))?;

    let mut status = LaundryStatus {
        building: building.to_string(),
        free_washers: 0,
        total_washers: 0,
        free_dryers: 0,
        total_dryers: 0,
    };

    for object in objects {
        let kind = object
            .get("appliance_type")
            .and_then(Value::as_str)
            .unwrap_or("");
        let free = object
            .get("status")
            .and_then(Value::as_str)
            .map(|s| s.eq_ignore_ascii_case("available"))
            .unwrap_or(false);

        match kind {
            "W" => {
                status.total_washers += 1;
                if free {
                    status.free_washers += 1;
                }
            }
            "D" => {
                status.total_dryers += 1;
                if free {
                    status.free_dryers += 1;
                }
            }
            _ => {}
        }
    }

    Ok(status)
}
