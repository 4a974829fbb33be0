// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod analytics;
pub mod charts;
pub mod sheets;
pub mod store;

pub use sheets::SheetsClient;
pub use store::{RecordStore, Records};
