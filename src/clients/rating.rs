// src/clients/rating.rs

//! Professor ratings client.
//!
//! Queries the third-party rating service's search index, filtered to the
//! university's school id, and returns [`RatingRecord`]s.

use reqwest::blocking::Client;
use serde_json::Value;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::models::RatingRecord;
use crate::utils::http::{create_client, fetch_json};

const RATING_SEARCH_URL: &str =
    "https://solr-aws-elb-production.ratemyprofessors.com/solr/rmp/select/?wt=json&fq=schoolid_s:1247";

/// Client for the professor rating service.
pub struct RatingClient {
    client: Client,
}

impl RatingClient {
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

    /// Search ratings by professor name; returns every match.
    pub fn get_rmp_by_name(&self, name: &str) -> Result<Vec<RatingRecord>> {
        let url = search_url(name)?;
        let body = fetch_json(&self.client, url.as_str(), "rating search")?;
        parse_docs(&body)
    }

    /// Look up one professor by service id.
    ///
    /// Returns the single matching record, or `None` when the service has no
    /// record with that id — never a list. A non-numeric id is rejected.
    pub fn get_rmp_by_id(&self, prof_id: &str) -> Result<Option<RatingRecord>> {
        if prof_id.is_empty() || !prof_id.chars().all(|c| c.is_ascii_digit()) {
            return Err(Error::validation(format!(
                "invalid professor id: {prof_id}"
            )));
        }
        let url = search_url(&format!("pk_id:{prof_id}"))?;
        let body = fetch_json(&self.client, url.as_str(), "rating lookup")?;
        let docs = parse_docs(&body)?;
        Ok(docs.into_iter().find(|record| record.id == prof_id))
    }
}

/// Search ratings by professor name with default settings.
pub fn get_rmp_by_name(name: &str) -> Result<Vec<RatingRecord>> {
    RatingClient::new()?.get_rmp_by_name(name)
}

/// Look up one professor by service id with default settings.
pub fn get_rmp_by_id(prof_id: &str) -> Result<Option<RatingRecord>> {
    RatingClient::new()?.get_rmp_by_id(prof_id)
}

/// Build the search URL, encoding the query as a proper query pair.
fn search_url(query: &str) -> Result<Url> {
    let mut url = Url::parse(RATING_SEARCH_URL)?;
    url.query_pairs_mut().append_pair("q", query);
    Ok(url)
}

/// Parse the search response docs; entries without an id are dropped.
fn parse_docs(body: &Value) -> Result<Vec<RatingRecord>> {
    let docs = body
        .pointer("/response/docs")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::parse("rating search", "response has no docs array"))?;

    Ok(docs
        .iter()
        .filter_map(|doc| {
            let id = doc.get("pk_id").and_then(Value::as_u64)?.to_string();
            let first = doc
                .get("teacherfirstname_t")
                .and_then(Value::as_str)
                .unwrap_or("");
            let last = doc
                .get("teacherlastname_t")
                .and_then(Value::as_str)
                .unwrap_or("");
            let name = format!("{first} {last}").trim().to_string();
            Some(RatingRecord {
                id,
                name,
                department: doc
                    .get("teacherdepartment_s")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                rating: doc.get("averageratingscore_rf").and_then(Value::as_f64),
                num_ratings: doc
                    .get("total_number_of_ratings_i")
                    .and_then(Value::as_u64)
                    .unwrap_or(0),
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_FIXTURE: &str = r#"{
        "response": {
            "numFound": 2,
            "docs": [
                {
                    "pk_id": 9338,
                    "teacherfirstname_t": "John",
                    "teacherlastname_t": "Ramirez",
                    "teacherdepartment_s": "Computer Science",
                    "averageratingscore_rf": 4.8,
                    "total_number_of_ratings_i": 120
                },
                {
                    "pk_id": 12001,
                    "teacherfirstname_t": "Jane",
                    "teacherlastname_t": "Doe"
                }
            ]
        }
    }"#;

    #[test]
    fn test_parses_rating_docs() {
        let body: Value = serde_json::from_str(SEARCH_FIXTURE).unwrap();
        let docs = parse_docs(&body).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, "9338");
        assert_eq!(docs[0].name, "John Ramirez");
        assert_eq!(docs[0].rating, Some(4.8));
        assert_eq!(docs[0].num_ratings, 120);
        assert_eq!(docs[1].rating, None);
        assert_eq!(docs[1].num_ratings, 0);
    }

    #[test]
    fn test_lookup_by_id_returns_one_or_none() {
        let body: Value = serde_json::from_str(SEARCH_FIXTURE).unwrap();
        let docs = parse_docs(&body).unwrap();

        let hit = docs.iter().find(|r| r.id == "9338");
        assert_eq!(hit.map(|r| r.name.as_str()), Some("John Ramirez"));

        let miss = docs.iter().find(|r| r.id == "99999");
        assert!(miss.is_none());
    }

    #[test]
    fn test_search_url_survives_reserved_characters() {
        // An unescaped '&' in the name would truncate the q parameter at
        // the first ampersand; the query-pair round trip must preserve it.
        let url = search_url("Smith & Jones").unwrap();
        let q = url
            .query_pairs()
            .find(|(key, _)| key == "q")
            .map(|(_, value)| value.into_owned())
            .unwrap();
        assert_eq!(q, "Smith & Jones");
        assert_eq!(
            url.query_pairs().filter(|(key, _)| key == "q").count(),
            1
        );
    }

    #[test]
    fn test_missing_docs_is_a_parse_error() {
        let body: Value = serde_json::from_str(r#"{"response":{}}"#).unwrap();
        assert!(matches!(parse_docs(&body), Err(Error::Parse { .. })));
    }
}
