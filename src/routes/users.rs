// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User management routes.

use crate::error::Result;
use crate::models::{CreateUserRequest, User};
use crate::routes::body::JsonOrForm;
use crate::AppState;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use std::sync::Arc;

/// User routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/users", post(create_user))
}

/// Create a new customer or administrator.
async fn create_user(
    State(state): State<Arc<AppState>>,
    JsonOrForm(request): JsonOrForm<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>)> {
    tracing::info!(
        username = ?request.username,
        role = ?request.role,
        "Creating user"
    );

    let user = request.into_user()?;
    let user = state.db.create_user(&user).await?;

    Ok((StatusCode::CREATED, Json(user)))
}
