// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! MongoDB client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (registration, listing, lookup, exercise-reference append)
//! - Exercises (creation, filtered log queries)

use crate::db::collections;
use crate::error::AppError;
use crate::models::{Exercise, LogEntry, User, UserSummary};
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, DateTime};
use mongodb::{Client, Collection, Database};

/// MongoDB database client.
#[derive(Clone)]
pub struct MongoDb {
    client: Option<Client>,
    db_name: String,
}

impl MongoDb {
    /// Connect to MongoDB using the given connection string.
    ///
    /// The client lazily establishes connections, so this succeeds even
    /// when the server is unreachable; the first operation surfaces the
    /// connectivity error instead.
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self, AppError> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to MongoDB: {}", e)))?;

        tracing::info!(db = db_name, "Connected to MongoDB");

        Ok(Self {
            client: Some(client),
            db_name: db_name.to_string(),
        })
    }

    /// Create a mock client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self {
            client: None,
            db_name: "exercise-track-test".to_string(),
        }
    }

    /// Helper to get the database handle or return an error if offline.
    fn database(&self) -> Result<Database, AppError> {
        self.client
            .as_ref()
            .map(|client| client.database(&self.db_name))
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    fn users(&self) -> Result<Collection<User>, AppError> {
        Ok(self.database()?.collection(collections::USERS))
    }

    fn exercises(&self) -> Result<Collection<Exercise>, AppError> {
        Ok(self.database()?.collection(collections::EXERCISES))
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Insert a new user with an empty exercise list.
    pub async fn create_user(&self, username: &str) -> Result<User, AppError> {
        let user = User {
            id: ObjectId::new(),
            username: username.to_string(),
            exercise: Vec::new(),
        };

        self.users()?
            .insert_one(&user)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(user)
    }

    /// List all users, ID and username only.
    pub async fn list_users(&self) -> Result<Vec<UserSummary>, AppError> {
        let cursor = self
            .database()?
            .collection::<UserSummary>(collections::USERS)
            .find(doc! {})
            .projection(doc! { "_id": 1, "username": 1 })
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Fetch one user by ID. Returns `None` when no document matches.
    pub async fn find_user(&self, id: ObjectId) -> Result<Option<User>, AppError> {
        self.users()?
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Append an exercise reference to a user's exercise list.
    ///
    /// Uses an atomic `$push` so concurrent appends for the same user
    /// cannot lose updates.
    pub async fn append_exercise(
        &self,
        user_id: ObjectId,
        exercise_id: ObjectId,
    ) -> Result<(), AppError> {
        let result = self
            .users()?
            .update_one(
                doc! { "_id": user_id },
                doc! { "$push": { "exercise": exercise_id } },
            )
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        Ok(())
    }

    // ─── Exercise Operations ─────────────────────────────────────

    /// Insert a new exercise document.
    pub async fn create_exercise(
        &self,
        description: &str,
        duration: i64,
        date: DateTime,
    ) -> Result<Exercise, AppError> {
        let exercise = Exercise {
            id: ObjectId::new(),
            description: description.to_string(),
            duration,
            date,
        };

        self.exercises()?
            .insert_one(&exercise)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(exercise)
    }

    /// Fetch exercises whose ID is in `exercise_ids` and whose date falls
    /// within `[from, to]` inclusive, capped at `limit` results.
    ///
    /// A `limit` of 0 means unlimited. The document ID is projected away
    /// from the results.
    pub async fn find_exercises(
        &self,
        exercise_ids: &[ObjectId],
        from: DateTime,
        to: DateTime,
        limit: i64,
    ) -> Result<Vec<LogEntry>, AppError> {
        let filter = doc! {
            "_id": { "$in": exercise_ids.to_vec() },
            "date": { "$gte": from, "$lte": to },
        };

        let cursor = self
            .database()?
            .collection::<LogEntry>(collections::EXERCISES)
            .find(filter)
            .projection(doc! { "_id": 0 })
            .limit(limit)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
