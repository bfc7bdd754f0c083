// src/lib.rs

//! Pitt API Library
//!
//! Independent clients for University of Pittsburgh web resources. Each
//! client performs one blocking fetch-and-parse cycle against a single
//! upstream endpoint and returns normalized typed records. Clients hold no
//! shared state and may be used concurrently by the caller.

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod utils;

pub use config::ClientConfig;
pub use error::{Error, Result};
