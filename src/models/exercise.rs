//! Exercise model for storage and API.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// Exercise document stored in the `exercises` collection.
///
/// Immutable after creation; referenced from users' `exercise` arrays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    /// Document ID
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// What was done
    pub description: String,
    /// Duration in minutes
    pub duration: i64,
    /// When the exercise happened (defaults to creation time)
    pub date: DateTime,
}

/// Exercise as returned by the log query, with the document ID
/// projected away.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub description: String,
    pub duration: i64,
    pub date: DateTime,
}
