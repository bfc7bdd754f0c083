// src/models/mod.rs

//! Domain models for the client library.
//!
//! Each file holds the record types returned by one client. All records are
//! immutable value objects: constructed by a single fetch-and-parse cycle,
//! never mutated afterwards.

mod course;
mod dining;
mod library;
mod machine;
mod news;
mod people;
mod rating;
mod shuttle;
mod textbook;

// Re-export all public types
pub use course::{Course, Enrollment, Section, Subject};
pub use dining::{DiningLocation, LocationStatus, ScheduleEntry};
pub use library::{Document, DocumentSearchResult};
pub use machine::{LabStatus, LaundryStatus};
pub use news::NewsItem;
pub use people::Person;
pub use rating::RatingRecord;
pub use shuttle::ShuttleRoute;
pub use textbook::Textbook;
