// src/clients/shuttle.rs

//! Shuttle routes client.
//!
//! Fetches route definitions from the shuttle tracking service's JSON
//! endpoint and returns [`ShuttleRoute`] records.

use reqwest::blocking::Client;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::models::ShuttleRoute;
use crate::utils::http::{create_client, fetch_json};

const ROUTES_URL: &str =
    "https://pittshuttle.ridesystems.net/Services/JSONPRelay.svc/GetRoutesForMapWithScheduleWithEncodedLine";

/// Client for the shuttle tracking endpoint.
pub struct ShuttleClient {
    client: Client,
}

impl ShuttleClient {
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

    /// Fetch all shuttle route definitions.
    pub fn get_routes(&self) -> Result<Vec<ShuttleRoute>> {
        let body = fetch_json(&self.client, ROUTES_URL, "shuttle routes")?;
        parse_routes(&body)
    }
}

/// Fetch all shuttle route definitions with default settings.
pub fn get_routes() -> Result<Vec<ShuttleRoute>> {
    ShuttleClient::new()?.get_routes()
}

/// Parse the routes payload; entries without an id are dropped.
fn parse_routes(body: &Value) -> Result<Vec<ShuttleRoute>> {
    let routes = body
        .as_array()
        .ok_or_else(|| Error::parse("shuttle routes", "response is not a JSON array"))?;

    Ok(routes
        .iter()
        .filter_map(|route| {
            let id = route.get("RouteID").and_then(Value::as_u64)?;
            let description = route
                .get("Description")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string();
            let color = route
                .get("MapLineColor")
                .and_then(Value::as_str)
                .map(str::to_string);
            let stops = route
                .get("Stops")
                .and_then(Value::as_array)
                .map(|stops| {
                    stops
                        .iter()
                        .filter_map(|s| s.get("Description").and_then(Value::as_str))
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();
            Some(ShuttleRoute {
                id,
                description,
                color,
                stops,
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROUTES_FIXTURE: &str = r##"[
        {
            "RouteID": 21,
            "Description": "10A Upper Campus",
            "MapLineColor": "#0057B8",
            "Stops": [
                { "Description": "Fifth at Tennyson" },
                { "Description": "Cathedral of Learning" }
            ]
        },
        {
            "RouteID": 22,
            "Description": "20A South Loop",
            "Stops": []
        },
        { "Description": "missing id" }
    ]"##;

    #[test]
    fn test_parses_routes() {
        let body: Value = serde_json::from_str(ROUTES_FIXTURE).unwrap();
        let routes = parse_routes(&body).unwrap();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].id, 21);
        assert_eq!(routes[0].description, "10A Upper Campus");
        assert_eq!(routes[0].color.as_deref(), Some("#0057B8"));
        assert_eq!(routes[0].stops.len(), 2);
        assert_eq!(routes[1].color, None);
        assert!(routes[1].stops.is_empty());
    }

    #[test]
    fn test_non_array_body_is_a_parse_error() {
        let body: Value = serde_json::from_str(r#"{"error":"maintenance"}"#).unwrap();
        assert!(matches!(parse_routes(&body), Err(Error::Parse { .. })));
    }
}
