// src/clients/textbook.rs

//! Textbook lookup client.
//!
//! Queries the bookstore comparison service in two steps: the department's
//! course roster locates the section taught by the given instructor, then
//! the books payload for that section yields [`Textbook`] records.

use std::collections::HashSet;

use reqwest::blocking::Client;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::models::Textbook;
use crate::utils::http::{create_client, fetch_json};

const COURSES_URL: &str = "https://pitt.verbacompare.com/compare/courses/";
const BOOKS_URL: &str = "https://pitt.verbacompare.com/compare/books";

/// Client for the textbook lookup service.
pub struct TextbookClient {
    client: Client,
}

impl TextbookClient {
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

    /// Fetch the textbooks assigned to one course section.
    pub fn get_textbook(
        &self,
        term: &str,
        department: &str,
        course: &str,
        instructor: &str,
    ) -> Result<Vec<Textbook>> {
        let roster_url = format!(
            "{COURSES_URL}?id={}&term_id={term}",
            department.to_uppercase()
        );
        let roster = fetch_json(&self.client, &roster_url, "textbook roster")?;
        let section_id = find_section_id(&roster, department, course, instructor)?;

        let books_url = format!("{BOOKS_URL}?id={section_id}");
        let books = fetch_json(&self.client, &books_url, "textbook list")?;
        parse_books(&books)
    }
}

/// Fetch the textbooks for one course section with default settings.
pub fn get_textbook(
    term: &str,
    department: &str,
    course: &str,
    instructor: &str,
) -> Result<Vec<Textbook>> {
    TextbookClient::new()?.get_textbook(term, department, course, instructor)
}

/// Locate the section id for (course, instructor) in the department roster.
///
/// Matching is case-insensitive; the instructor match accepts a surname.
fn find_section_id(
    roster: &Value,
    department: &str,
    course: &str,
    instructor: &str,
) -> Result<String> {
    let groups = roster
        .as_array()
        .ok_or_else(|| Error::parse("textbook roster", "response is not a JSON array"))?;

    let wanted_course = format!("{} {:0>4}", department.to_uppercase(), course);
    let wanted_instructor = instructor.to_uppercase();

    for group in groups {
        let name = group.get("name").and_then(Value::as_str).unwrap_or("");
        if !name.eq_ignore_ascii_case(&wanted_course) {
            continue;
        }
        let sections = group
            .get("sections")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        for section in sections {
            let section_instructor = section
                .get("instructor")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_uppercase();
            if section_instructor.contains(&wanted_instructor) {
                if let Some(id) = section.get("id").and_then(Value::as_str) {
                    return Ok(id.to_string());
                }
            }
        }
    }

    Err(Error::not_found(
        "course section",
        format!("{wanted_course} with {instructor}"),
    ))
}

/// Parse the books payload, collapsing duplicate ISBNs.
fn parse_books(body: &Value) -> Result<Vec<Textbook>> {
    let entries = body
        .as_array()
        .ok_or_else(|| Error::parse("textbook list", "response is not a JSON array"))?;

    let mut seen = HashSet::new();
    let mut books = Vec::new();
    for entry in entries {
        let Some(isbn) = entry.get("isbn").and_then(Value::as_str) else {
            log::warn!("book entry without an ISBN, skipping");
            continue;
        };
        if !seen.insert(isbn.to_string()) {
            continue;
        }
        books.push(Textbook {
            isbn: isbn.to_string(),
            title: entry
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string(),
            author: entry
                .get("author")
                .and_then(Value::as_str)
                .map(str::to_string),
            edition: entry
                .get("edition")
                .and_then(Value::as_str)
                .map(str::to_string),
            citation: entry
                .get("citation")
                .and_then(Value::as_str)
                .map(str::to_string),
        });
    }
    Ok(books)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROSTER_FIXTURE: &str = r#"[
        {
            "id": "CS",
            "name": "CS 0007",
            "sections": [
                { "id": "101", "name": "1000", "instructor": "RAMIREZ, JOHN" },
                { "id": "102", "name": "1010", "instructor": "STAFF" }
            ]
        },
        {
            "id": "CS",
            "name": "CS 0401",
            "sections": [
                { "id": "201", "name": "1200", "instructor": "FARNAN, NICK" }
            ]
        }
    ]"#;

    const BOOKS_FIXTURE: &str = r#"[
        {
            "isbn": "9780134092669",
            "title": "Starting Out with Java",
            "author": "Gaddis",
            "edition": "7",
            "citation": "Gaddis, Tony. Starting Out with Java. 7th ed."
        },
        {
            "isbn": "9780134092669",
            "title": "Starting Out with Java",
            "author": "Gaddis"
        },
        {
            "isbn": "9781593279288",
            "title": "The Rust Programming Language"
        },
        { "title": "no isbn" }
    ]"#;

    #[test]
    fn test_finds_section_by_course_and_instructor() {
        let roster: Value = serde_json::from_str(ROSTER_FIXTURE).unwrap();
        assert_eq!(
            find_section_id(&roster, "cs", "7", "Ramirez").unwrap(),
            "101"
        );
        assert_eq!(
            find_section_id(&roster, "CS", "0401", "FARNAN").unwrap(),
            "201"
        );
    }

    #[test]
    fn test_unknown_instructor_is_not_found() {
        let roster: Value = serde_json::from_str(ROSTER_FIXTURE).unwrap();
        assert!(matches!(
            find_section_id(&roster, "CS", "0007", "Turing"),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn test_books_length_matches_distinct_entries() {
        let body: Value = serde_json::from_str(BOOKS_FIXTURE).unwrap();
        let books = parse_books(&body).unwrap();
        // Two distinct ISBNs in the fixture: the duplicate collapses and the
        // ISBN-less entry is dropped.
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].isbn, "9780134092669");
        assert_eq!(books[0].edition.as_deref(), Some("7"));
        assert_eq!(books[1].author, None);
    }
}
