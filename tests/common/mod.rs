// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use exercise_tracker::config::Config;
use exercise_tracker::db::MongoDb;
use exercise_tracker::routes::create_router;
use exercise_tracker::AppState;
use std::sync::Arc;

/// Check if a live MongoDB is available via environment variable.
#[allow(dead_code)]
pub fn mongo_available() -> bool {
    std::env::var("MONGO_URI").is_ok()
}

/// Skip test with message if no live MongoDB is available.
#[macro_export]
macro_rules! require_mongo {
    () => {
        if !crate::common::mongo_available() {
            eprintln!("⚠️  Skipping: MONGO_URI not set");
            return;
        }
    };
}

/// Create a test database connection against the live MongoDB.
#[allow(dead_code)]
pub async fn test_db() -> MongoDb {
    let uri = std::env::var("MONGO_URI").expect("MONGO_URI must be set");
    MongoDb::connect(&uri, "exercise-track-test")
        .await
        .expect("Failed to connect to MongoDB")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> MongoDb {
    MongoDb::new_mock()
}

/// Create a test app with an offline mock database.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::default();
    let db = test_db_offline();

    let state = Arc::new(AppState { config, db });
    (create_router(state.clone()), state)
}

/// Create a test app backed by the live MongoDB.
#[allow(dead_code)]
pub async fn create_live_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::default();
    let db = test_db().await;

    let state = Arc::new(AppState { config, db });
    (create_router(state.clone()), state)
}

/// Read a response body to a string.
#[allow(dead_code)]
pub async fn body_string(response: axum::response::Response) -> String {
    use http_body_util::BodyExt;

    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read response body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("Response body was not UTF-8")
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    use http_body_util::BodyExt;

    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read response body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("Response body was not JSON")
}
