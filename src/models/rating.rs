// src/models/rating.rs

//! Professor rating records from the third-party rating service.

use serde::{Deserialize, Serialize};

/// One professor's rating summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RatingRecord {
    /// Service-assigned professor id
    pub id: String,

    /// Professor display name
    pub name: String,

    /// Department label, when listed
    pub department: Option<String>,

    /// Overall rating, when the professor has been rated
    pub rating: Option<f64>,

    /// Number of ratings behind the average
    pub num_ratings: u64,
}
