// src/models/course.rs

//! Course catalog data structures.
//!
//! A [`Subject`] holds the courses offered under one department code for one
//! term; a [`Course`] holds its scheduled [`Section`]s in document order.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// All courses offered under one subject code for one term.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Subject {
    /// Subject code (e.g. "CS")
    pub subject: String,

    /// Term code (e.g. "2194")
    pub term: String,

    /// Courses keyed by zero-padded course number
    pub courses: BTreeMap<String, Course>,
}

impl Subject {
    /// Course numbers offered this term, in ascending order.
    pub fn course_numbers(&self) -> Vec<&str> {
        self.courses.keys().map(String::as_str).collect()
    }

    /// Look up a course by its (possibly unpadded) number.
    pub fn course(&self, number: &str) -> Option<&Course> {
        let padded = format!("{number:0>4}");
        self.courses.get(&padded)
    }

    /// Flatten every course into section records, keyed by course number.
    pub fn to_records(&self) -> BTreeMap<String, Vec<Map<String, Value>>> {
        self.courses
            .iter()
            .map(|(number, course)| (number.clone(), course.to_records()))
            .collect()
    }
}

/// One course and its scheduled sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Course {
    /// Subject code
    pub subject: String,

    /// Term code
    pub term: String,

    /// Zero-padded course number (e.g. "0007")
    pub number: String,

    /// Course title as shown on the listing heading
    pub title: String,

    /// Sections in document order
    pub sections: Vec<Section>,
}

impl Course {
    /// Flat key-value records for every section, in document order.
    pub fn to_records(&self) -> Vec<Map<String, Value>> {
        self.sections.iter().map(Section::to_record).collect()
    }
}

/// Enrollment counts for a section, when the listing exposes them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Enrollment {
    /// Students currently enrolled
    pub current: u32,

    /// Seat capacity
    pub capacity: u32,
}

/// One scheduled offering of a course.
///
/// Fields the listing page omits or garbles are `None`; a section is never
/// dropped over a single bad field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Section {
    /// Subject code
    pub subject: String,

    /// Term code
    pub term: String,

    /// Course number this section belongs to
    pub course_number: String,

    /// Section identifier (e.g. "1000")
    pub section: String,

    /// Section type (e.g. "LEC", "REC")
    pub section_type: String,

    /// Registrar class number (e.g. "27378")
    pub class_number: String,

    /// Meeting day codes (e.g. ["Mo", "We"]); `None` when TBA
    pub days: Option<Vec<String>>,

    /// Meeting start and end time; `None` when TBA
    pub times: Option<(String, String)>,

    /// Meeting room
    pub room: Option<String>,

    /// Instructor display name
    pub instructor: Option<String>,

    /// First meeting date
    pub start_date: Option<NaiveDate>,

    /// Last meeting date
    pub end_date: Option<NaiveDate>,

    /// Registration status (e.g. "Open")
    pub status: Option<String>,

    /// Enrollment counts, when listed
    pub enrollment: Option<Enrollment>,

    /// Full URL to the section detail page
    pub url: String,
}

impl Section {
    /// Flat key-value record for downstream serialization.
    ///
    /// Every section emits the identical key set; missing values are JSON
    /// null so consumers can rely on field presence.
    pub fn to_record(&self) -> Map<String, Value> {
        let mut record = Map::new();
        record.insert("subject".into(), json!(self.subject));
        record.insert("term".into(), json!(self.term));
        record.insert("course_number".into(), json!(self.course_number));
        record.insert("section".into(), json!(self.section));
        record.insert("section_type".into(), json!(self.section_type));
        record.insert("class_number".into(), json!(self.class_number));
        record.insert("days".into(), json!(self.days));
        record.insert("times".into(), json!(self.times));
        record.insert("room".into(), json!(self.room));
        record.insert("instructor".into(), json!(self.instructor));
        record.insert(
            "start_date".into(),
            json!(self.start_date.map(|d| d.to_string())),
        );
        record.insert(
            "end_date".into(),
            json!(self.end_date.map(|d| d.to_string())),
        );
        record.insert("status".into(), json!(self.status));
        record.insert("enrollment".into(), json!(self.enrollment));
        record.insert("url".into(), json!(self.url));
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_section() -> Section {
        Section {
            subject: "CS".to_string(),
            term: "2194".to_string(),
            course_number: "0007".to_string(),
            section: "1000".to_string(),
            section_type: "LEC".to_string(),
            class_number: "27378".to_string(),
            days: Some(vec!["Mo".to_string(), "We".to_string()]),
            times: Some(("3:00PM".to_string(), "4:15PM".to_string())),
            room: Some("5502 Sennott Square".to_string()),
            instructor: Some("John Ramirez".to_string()),
            start_date: NaiveDate::from_ymd_opt(2019, 8, 26),
            end_date: NaiveDate::from_ymd_opt(2019, 12, 6),
            status: Some("Open".to_string()),
            enrollment: None,
            url: "https://example.com/section/27378".to_string(),
        }
    }

    #[test]
    fn test_record_field_set_is_fixed() {
        let full = sample_section().to_record();
        let sparse = Section {
            days: None,
            times: None,
            room: None,
            instructor: None,
            start_date: None,
            end_date: None,
            status: None,
            ..sample_section()
        }
        .to_record();

        let full_keys: Vec<_> = full.keys().collect();
        let sparse_keys: Vec<_> = sparse.keys().collect();
        assert_eq!(full_keys, sparse_keys);
        assert_eq!(sparse["room"], Value::Null);
    }

    #[test]
    fn test_subject_course_lookup_pads_number() {
        let course = Course {
            subject: "CS".to_string(),
            term: "2194".to_string(),
            number: "0007".to_string(),
            title: "INTRO".to_string(),
            sections: vec![],
        };
        let subject = Subject {
            subject: "CS".to_string(),
            term: "2194".to_string(),
            courses: BTreeMap::from([("0007".to_string(), course)]),
        };
        assert!(subject.course("7").is_some());
        assert!(subject.course("0007").is_some());
        assert!(subject.course("0401").is_none());
    }
}
