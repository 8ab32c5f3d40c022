//! Database layer.
//!
//! [`Database`] is the single persistence handle owned by the application
//! state. It is opened once at startup and cloned into handlers.

pub mod firestore;
pub mod memory;

pub use self::firestore::FirestoreStore;
pub use memory::MemoryStore;

use crate::error::AppError;
use crate::models::{Truck, TruckStatusUpdate, User};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const TRUCKS: &str = "trucks";
}

#[derive(Clone)]
enum Backend {
    Firestore(FirestoreStore),
    Memory(Arc<MemoryStore>),
    /// No usable connection; every operation fails.
    Offline,
}

/// Shared database handle.
#[derive(Clone)]
pub struct Database {
    backend: Backend,
}

impl Database {
    /// Connect to Firestore.
    pub async fn connect(project_id: &str) -> Result<Self, AppError> {
        let store = FirestoreStore::connect(project_id).await?;
        Ok(Self {
            backend: Backend::Firestore(store),
        })
    }

    /// Create an empty in-memory database.
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory(Arc::new(MemoryStore::new())),
        }
    }

    /// Create a database handle with no connection.
    ///
    /// All database operations will return an error if called.
    pub fn offline() -> Self {
        Self {
            backend: Backend::Offline,
        }
    }

    /// Name of the active backend, reported by the health check.
    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            Backend::Firestore(_) => "firestore",
            Backend::Memory(_) => "memory",
            Backend::Offline => "offline",
        }
    }

    fn offline_error() -> AppError {
        AppError::Database("Database not connected (offline mode)".to_string())
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by username.
    ///
    /// No route reads users back; this is the lookup used to check what a
    /// create actually stored.
    pub async fn get_user(&self, username: &str) -> Result<Option<User>, AppError> {
        match &self.backend {
            Backend::Firestore(store) => store.get_user(username).await,
            Backend::Memory(store) => Ok(store.get_user(username)),
            Backend::Offline => Err(Self::offline_error()),
        }
    }

    /// Create a user; the username must not already exist.
    pub async fn create_user(&self, user: &User) -> Result<User, AppError> {
        match &self.backend {
            Backend::Firestore(store) => store.create_user(user).await,
            Backend::Memory(store) => store.create_user(user),
            Backend::Offline => Err(Self::offline_error()),
        }
    }

    // ─── Truck Operations ────────────────────────────────────────

    /// Create a truck; the truck_id must not already exist.
    pub async fn create_truck(&self, truck: &Truck) -> Result<Truck, AppError> {
        match &self.backend {
            Backend::Firestore(store) => store.create_truck(truck).await,
            Backend::Memory(store) => store.create_truck(truck),
            Backend::Offline => Err(Self::offline_error()),
        }
    }

    /// Get a truck by truck_id.
    pub async fn get_truck(&self, truck_id: &str) -> Result<Option<Truck>, AppError> {
        match &self.backend {
            Backend::Firestore(store) => store.get_truck(truck_id).await,
            Backend::Memory(store) => Ok(store.get_truck(truck_id)),
            Backend::Offline => Err(Self::offline_error()),
        }
    }

    /// Apply a status update and return the updated truck, or `None` if the
    /// truck does not exist.
    pub async fn update_truck_status(
        &self,
        truck_id: &str,
        update: &TruckStatusUpdate,
        now: DateTime<Utc>,
    ) -> Result<Option<Truck>, AppError> {
        match &self.backend {
            Backend::Firestore(store) => store.update_truck_status(truck_id, update, now).await,
            Backend::Memory(store) => Ok(store.update_truck_status(truck_id, update, now)),
            Backend::Offline => Err(Self::offline_error()),
        }
    }

    /// List all trucks.
    pub async fn list_trucks(&self) -> Result<Vec<Truck>, AppError> {
        match &self.backend {
            Backend::Firestore(store) => store.list_trucks().await,
            Backend::Memory(store) => Ok(store.list_trucks()),
            Backend::Offline => Err(Self::offline_error()),
        }
    }
}
