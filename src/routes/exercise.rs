// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise API routes: user registration, exercise submission, and
//! log queries.

use crate::error::{AppError, Result};
use crate::models::LogEntry;
use crate::time_utils::{format_utc_rfc3339, parse_date_flexible};
use crate::AppState;
use axum::{
    extract::{FromRequest, Query, Request, State},
    http::header,
    routing::{get, post},
    Form, Json, Router,
};
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Exercise API routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/exercise/users", get(list_users))
        .route("/api/exercise/log", get(get_log))
        .route("/api/exercise/new-user", post(new_user))
        .route("/api/exercise/add", post(add_exercise))
}

// ─── Body Extraction ─────────────────────────────────────────

/// Accepts a request body as either JSON or a URL-encoded form,
/// dispatching on the Content-Type header.
struct JsonOrForm<T>(T);

impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: serde::de::DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.starts_with("application/json"))
            .unwrap_or(false);

        if is_json {
            let Json(payload) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            Ok(Self(payload))
        } else {
            let Form(payload) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            Ok(Self(payload))
        }
    }
}

// ─── User Listing ────────────────────────────────────────────

/// User as returned by the listing and registration endpoints.
#[derive(Serialize)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
}

/// List all registered users, ID and username only.
async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<UserResponse>>> {
    let users = state.db.list_users().await?;

    Ok(Json(
        users
            .into_iter()
            .map(|u| UserResponse {
                id: u.id.to_hex(),
                username: u.username,
            })
            .collect(),
    ))
}

// ─── User Registration ───────────────────────────────────────

#[derive(Deserialize)]
struct NewUserPayload {
    username: Option<String>,
}

/// Register a new user.
async fn new_user(
    State(state): State<Arc<AppState>>,
    JsonOrForm(payload): JsonOrForm<NewUserPayload>,
) -> Result<Json<UserResponse>> {
    let username = payload.username.unwrap_or_default();
    let username = username.trim();
    if username.is_empty() {
        return Err(AppError::Validation("username is required".to_string()));
    }

    let user = state.db.create_user(username).await?;

    tracing::info!(username = %user.username, "New user registered");

    Ok(Json(UserResponse {
        id: user.id.to_hex(),
        username: user.username,
    }))
}

// ─── Exercise Submission ─────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddExercisePayload {
    user_id: Option<String>,
    description: Option<String>,
    duration: Option<i64>,
    date: Option<String>,
}

#[derive(Serialize)]
pub struct AddExerciseResponse {
    pub username: String,
    pub description: String,
    pub duration: i64,
    pub date: String,
}

/// Record an exercise against a user.
///
/// The exercise document is created first and the reference appended to
/// the user afterwards; there is no rollback if the user turns out not
/// to exist, matching the storage model's best-effort invariant.
async fn add_exercise(
    State(state): State<Arc<AppState>>,
    JsonOrForm(payload): JsonOrForm<AddExercisePayload>,
) -> Result<Json<AddExerciseResponse>> {
    let user_id = payload
        .user_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("Provide user ID".to_string()))?;
    let user_id = ObjectId::parse_str(&user_id)
        .map_err(|_| AppError::BadRequest("Invalid user ID".to_string()))?;

    let description = payload.description.unwrap_or_default();
    let description = description.trim();
    if description.is_empty() {
        return Err(AppError::Validation("description is required".to_string()));
    }

    let duration = payload
        .duration
        .ok_or_else(|| AppError::Validation("duration is required".to_string()))?;

    // Absent or unparseable date means "now".
    let date = payload
        .date
        .as_deref()
        .and_then(parse_date_flexible)
        .map(DateTime::from_chrono)
        .unwrap_or_else(DateTime::now);

    let exercise = state.db.create_exercise(description, duration, date).await?;

    let user = state
        .db
        .find_user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    state.db.append_exercise(user.id, exercise.id).await?;

    tracing::info!(
        user = %user.id,
        exercise = %exercise.id,
        duration = exercise.duration,
        "New exercise recorded"
    );

    Ok(Json(AddExerciseResponse {
        username: user.username,
        description: exercise.description,
        duration: exercise.duration,
        date: format_utc_rfc3339(exercise.date.to_chrono()),
    }))
}

// ─── Log Query ───────────────────────────────────────────────

#[derive(Deserialize)]
struct LogQuery {
    #[serde(rename = "userId")]
    user_id: Option<String>,
    /// Filter by earliest date (RFC3339 or YYYY-MM-DD)
    from: Option<String>,
    /// Filter by latest date (RFC3339 or YYYY-MM-DD)
    to: Option<String>,
    /// Cap on the number of entries returned (0 = unlimited)
    limit: Option<String>,
}

#[derive(Serialize)]
pub struct LogResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub count: usize,
    pub log: Vec<LogEntryResponse>,
}

#[derive(Serialize)]
pub struct LogEntryResponse {
    pub description: String,
    pub duration: i64,
    pub date: String,
}

impl From<LogEntry> for LogEntryResponse {
    fn from(entry: LogEntry) -> Self {
        Self {
            description: entry.description,
            duration: entry.duration,
            date: format_utc_rfc3339(entry.date.to_chrono()),
        }
    }
}

/// Resolve an optional date parameter, falling back to the given bound
/// when the parameter is absent or unparseable.
fn parse_date_param(raw: Option<&str>, default: DateTime) -> DateTime {
    raw.and_then(parse_date_flexible)
        .map(DateTime::from_chrono)
        .unwrap_or(default)
}

/// Resolve the `limit` parameter. Absent, unparseable, or non-positive
/// values all mean "unlimited".
fn parse_limit_param(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.parse().ok()).filter(|l| *l > 0).unwrap_or(0)
}

/// Get a user's exercise log, filtered by date range and capped at
/// `limit` entries.
async fn get_log(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LogQuery>,
) -> Result<Json<LogResponse>> {
    let user_id = params
        .user_id
        .ok_or_else(|| AppError::BadRequest("Provide user ID".to_string()))?;
    let user_id = ObjectId::parse_str(&user_id)
        .map_err(|_| AppError::BadRequest("Invalid user ID".to_string()))?;

    let from = parse_date_param(params.from.as_deref(), DateTime::MIN);
    let to = parse_date_param(params.to.as_deref(), DateTime::MAX);
    let limit = parse_limit_param(params.limit.as_deref());

    let user = state
        .db
        .find_user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let log = state
        .db
        .find_exercises(&user.exercise, from, to, limit)
        .await?;

    tracing::debug!(user = %user.id, count = log.len(), "Fetched exercise log");

    Ok(Json(LogResponse {
        id: user.id.to_hex(),
        username: user.username,
        count: log.len(),
        log: log.into_iter().map(LogEntryResponse::from).collect(),
    }))
}
