// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Exercise Tracker: a minimal exercise-logging HTTP API.
//!
//! This crate provides the backend API for registering users, recording
//! exercise entries against them, and querying a user's exercise log
//! filtered by date range and count.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod time_utils;

use config::Config;
use db::MongoDb;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: MongoDb,
}
