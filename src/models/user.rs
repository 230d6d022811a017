//! User model for storage and API.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// User document stored in the `users` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Document ID
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// Registered username
    pub username: String,
    /// References to this user's exercise documents, in insertion order
    #[serde(default)]
    pub exercise: Vec<ObjectId>,
}

/// Projection of a user down to ID and username, as returned by the
/// user-listing query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub username: String,
}
