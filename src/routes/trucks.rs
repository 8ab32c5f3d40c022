// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Truck status routes.

use crate::error::{AppError, Result};
use crate::models::{CreateTruckRequest, Truck, TruckStatusUpdate};
use crate::routes::body::JsonOrForm;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use std::sync::Arc;

/// Truck routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/trucks", get(list_trucks).post(create_truck))
        .route("/trucks/{truck_id}", get(get_truck).put(update_truck))
}

fn truck_not_found(truck_id: &str) -> AppError {
    AppError::NotFound(format!("Truck {} not found", truck_id))
}

/// Register a new truck.
async fn create_truck(
    State(state): State<Arc<AppState>>,
    JsonOrForm(request): JsonOrForm<CreateTruckRequest>,
) -> Result<(StatusCode, Json<Truck>)> {
    let truck = request.into_truck(Utc::now())?;

    tracing::info!(
        truck_id = %truck.truck_id,
        destination = %truck.destination,
        "Creating truck"
    );

    let truck = state.db.create_truck(&truck).await?;
    Ok((StatusCode::CREATED, Json(truck)))
}

/// Get the status of a single truck.
async fn get_truck(
    State(state): State<Arc<AppState>>,
    Path(truck_id): Path<String>,
) -> Result<Json<Truck>> {
    let truck = state
        .db
        .get_truck(&truck_id)
        .await?
        .ok_or_else(|| truck_not_found(&truck_id))?;

    Ok(Json(truck))
}

/// Update fill state, arrival state and location of a truck.
///
/// Fields left out of the body keep their stored values. `last_updated` is
/// always refreshed.
async fn update_truck(
    State(state): State<Arc<AppState>>,
    Path(truck_id): Path<String>,
    JsonOrForm(update): JsonOrForm<TruckStatusUpdate>,
) -> Result<Json<Truck>> {
    tracing::info!(
        truck_id = %truck_id,
        is_filled = ?update.is_filled,
        has_reached_destination = ?update.has_reached_destination,
        "Updating truck status"
    );

    let truck = state
        .db
        .update_truck_status(&truck_id, &update, Utc::now())
        .await?
        .ok_or_else(|| truck_not_found(&truck_id))?;

    Ok(Json(truck))
}

/// List every truck and its status.
async fn list_trucks(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Truck>>> {
    let trucks = state.db.list_trucks().await?;
    tracing::debug!(count = trucks.len(), "Listed trucks");
    Ok(Json(trucks))
}
