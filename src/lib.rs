// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Fitlog: personal fitness tracker backend.
//!
//! Stores body metrics, workout completion and diet adherence in local CSV
//! files or a Google Sheets document, and serves progress statistics and
//! chart series over a JSON API.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::RecordStore;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: RecordStore,
}
