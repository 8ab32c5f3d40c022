// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Truck Tracker: status tracking for garbage trucks
//!
//! This crate provides the backend API for registering users and trucks
//! and recording each truck's fill state, arrival state and location.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;

use db::Database;

/// Shared application state.
pub struct AppState {
    pub db: Database,
}
