//! In-memory document store.
//!
//! Mirrors the Firestore semantics the API relies on: create-if-absent keyed
//! by document ID, and update only when the document exists. Listing returns
//! documents sorted by ID, which is the order Firestore uses.

use crate::db::collections;
use crate::error::AppError;
use crate::models::{Truck, TruckStatusUpdate, User};
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

#[derive(Default)]
pub struct MemoryStore {
    users: DashMap<String, User>,
    trucks: DashMap<String, Truck>,
}

fn insert_new<T: Clone>(
    map: &DashMap<String, T>,
    collection: &str,
    id: &str,
    value: &T,
) -> Result<T, AppError> {
    match map.entry(id.to_string()) {
        Entry::Occupied(_) => Err(AppError::Conflict(format!(
            "Document {}/{} already exists",
            collection, id
        ))),
        Entry::Vacant(slot) => {
            slot.insert(value.clone());
            Ok(value.clone())
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_user(&self, username: &str) -> Option<User> {
        self.users.get(username).map(|u| u.value().clone())
    }

    pub fn create_user(&self, user: &User) -> Result<User, AppError> {
        insert_new(&self.users, collections::USERS, &user.username, user)
    }

    pub fn create_truck(&self, truck: &Truck) -> Result<Truck, AppError> {
        insert_new(&self.trucks, collections::TRUCKS, &truck.truck_id, truck)
    }

    pub fn get_truck(&self, truck_id: &str) -> Option<Truck> {
        self.trucks.get(truck_id).map(|t| t.value().clone())
    }

    pub fn update_truck_status(
        &self,
        truck_id: &str,
        update: &TruckStatusUpdate,
        now: DateTime<Utc>,
    ) -> Option<Truck> {
        self.trucks.get_mut(truck_id).map(|mut truck| {
            update.apply(truck.value_mut(), now);
            truck.value().clone()
        })
    }

    pub fn list_trucks(&self) -> Vec<Truck> {
        let mut trucks: Vec<Truck> = self.trucks.iter().map(|t| t.value().clone()).collect();
        trucks.sort_by(|a, b| a.truck_id.cmp(&b.truck_id));
        trucks
    }
}
