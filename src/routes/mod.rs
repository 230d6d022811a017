// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod exercise;

use crate::AppState;
use axum::http::StatusCode;
use axum::response::Html;
use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

const LANDING_PAGE: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <title>Exercise Tracker</title>
  </head>
  <body>
    <h1>Exercise Tracker API</h1>
    <ul>
      <li>POST /api/exercise/new-user &mdash; form/json: username</li>
      <li>POST /api/exercise/add &mdash; form/json: userId, description, duration, date?</li>
      <li>GET /api/exercise/users</li>
      <li>GET /api/exercise/log?userId=&lt;id&gt;&amp;from=&lt;date&gt;&amp;to=&lt;date&gt;&amp;limit=&lt;n&gt;</li>
    </ul>
  </body>
</html>
"#;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
}

/// Health check response
async fn health_check() -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    Json(HealthResponse {
        status: "ok".to_string(),
        build_id,
    })
}

/// Landing page with API usage.
async fn landing_page() -> Html<&'static str> {
    Html(LANDING_PAGE)
}

/// Any route not matched above.
async fn fallback() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "not found")
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(landing_page))
        .route("/health", get(health_check))
        .merge(exercise::routes())
        .fallback(fallback)
        .layer(middleware::from_fn(
            crate::middleware::security::add_security_headers,
        ))
        // The API is open to any origin, matching the permissive CORS
        // the service has always shipped with.
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
