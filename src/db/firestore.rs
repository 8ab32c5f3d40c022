// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (create-only, keyed by username)
//! - Trucks (create, lookup, status updates, listing; keyed by truck_id)
//!
//! Creates use Firestore's create-if-absent semantics so the document ID
//! doubles as the uniqueness constraint.

use crate::db::collections;
use crate::error::AppError;
use crate::models::{GeoLocation, Truck, TruckStatusUpdate, User};
use chrono::{DateTime, Utc};
use firestore::errors::FirestoreError;
use firestore::FirestoreWritePrecondition;
use serde::{Deserialize, Serialize};

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreStore {
    client: firestore::FirestoreDb,
}

/// Partial truck document written by a status update.
///
/// Only the fields named in the update mask are sent; absent options are
/// skipped so they are never cleared.
#[derive(Serialize, Deserialize)]
struct StatusWrite {
    #[serde(skip_serializing_if = "Option::is_none")]
    is_filled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    has_reached_destination: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    current_location: Option<GeoLocation>,
    last_updated: DateTime<Utc>,
}

impl StatusWrite {
    fn new(update: &TruckStatusUpdate, now: DateTime<Utc>) -> Self {
        Self {
            is_filled: update.is_filled,
            has_reached_destination: update.has_reached_destination,
            current_location: update.current_location,
            last_updated: now,
        }
    }
}

impl FirestoreStore {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn connect(project_id: &str) -> Result<Self, AppError> {
        // The emulator accepts any token; skip credential discovery entirely.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::connect_emulator(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self { client })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn connect_emulator(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self { client })
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by username.
    pub async fn get_user(&self, username: &str) -> Result<Option<User>, AppError> {
        self.client
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(username)
            .await
            .map_err(AppError::from)
    }

    /// Create a user. Fails with `Conflict` if the username is taken.
    pub async fn create_user(&self, user: &User) -> Result<User, AppError> {
        self.client
            .fluent()
            .insert()
            .into(collections::USERS)
            .document_id(&user.username)
            .object(user)
            .execute()
            .await
            .map_err(AppError::from)
    }

    // ─── Truck Operations ────────────────────────────────────────

    /// Create a truck. Fails with `Conflict` if the truck_id is taken.
    pub async fn create_truck(&self, truck: &Truck) -> Result<Truck, AppError> {
        self.client
            .fluent()
            .insert()
            .into(collections::TRUCKS)
            .document_id(&truck.truck_id)
            .object(truck)
            .execute()
            .await
            .map_err(AppError::from)
    }

    /// Get a truck by truck_id.
    pub async fn get_truck(&self, truck_id: &str) -> Result<Option<Truck>, AppError> {
        self.client
            .fluent()
            .select()
            .by_id_in(collections::TRUCKS)
            .obj()
            .one(truck_id)
            .await
            .map_err(AppError::from)
    }

    /// Write the provided status fields and `last_updated` in one update.
    ///
    /// The `exists` precondition stops Firestore from creating a new document
    /// for an unknown truck_id; that case is returned as `None`.
    pub async fn update_truck_status(
        &self,
        truck_id: &str,
        update: &TruckStatusUpdate,
        now: DateTime<Utc>,
    ) -> Result<Option<Truck>, AppError> {
        let write = StatusWrite::new(update, now);

        let result: Result<Truck, FirestoreError> = self
            .client
            .fluent()
            .update()
            .fields(update.field_paths())
            .in_col(collections::TRUCKS)
            .precondition(FirestoreWritePrecondition::Exists(true))
            .document_id(truck_id)
            .object(&write)
            .execute()
            .await;

        match result {
            Ok(truck) => Ok(Some(truck)),
            Err(FirestoreError::DataNotFoundError(e)) => {
                tracing::debug!(truck_id, error = %e, "Status update for unknown truck");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// List all trucks in document order.
    pub async fn list_trucks(&self) -> Result<Vec<Truck>, AppError> {
        self.client
            .fluent()
            .select()
            .from(collections::TRUCKS)
            .obj()
            .query()
            .await
            .map_err(AppError::from)
    }
}
