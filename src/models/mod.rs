// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod truck;
pub mod user;

pub use truck::{CreateTruckRequest, GeoLocation, Truck, TruckStatusUpdate};
pub use user::{ActionItem, CreateUserRequest, Role, User};
