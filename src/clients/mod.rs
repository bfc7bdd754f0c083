// src/clients/mod.rs

//! One client per University of Pittsburgh web resource.
//!
//! Every client is a leaf: it talks to exactly one upstream endpoint,
//! performs a single blocking request→parse→return cycle, and holds no state
//! beyond its HTTP client. Each module also exposes free functions that run
//! one call with default settings.

pub mod course;
pub mod dining;
pub mod lab;
pub mod laundry;
pub mod library;
pub mod news;
pub mod people;
pub mod rating;
pub mod shuttle;
pub mod textbook;

pub use course::CourseClient;
pub use dining::DiningClient;
pub use lab::LabClient;
pub use laundry::LaundryClient;
pub use library::LibraryClient;
pub use news::NewsClient;
pub use people::PeopleClient;
pub use rating::RatingClient;
pub use shuttle::ShuttleClient;
pub use textbook::TextbookClient;
