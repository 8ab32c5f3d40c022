//! Truck status model for storage and API.

use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A latitude/longitude pair. Either coordinate may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// Truck status record stored in Firestore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Truck {
    /// External truck identifier (also used as document ID)
    pub truck_id: String,
    #[serde(default)]
    pub is_filled: bool,
    #[serde(default)]
    pub has_reached_destination: bool,
    pub destination: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_location: Option<GeoLocation>,
    /// Human-readable name for the current location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    /// Time of the most recent write
    pub last_updated: DateTime<Utc>,
    /// URL of the latest surveillance camera image
    pub image_url: String,
}

/// Body of `POST /trucks`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateTruckRequest {
    #[validate(
        required(message = "truck_id is required"),
        length(min = 1, message = "truck_id is required")
    )]
    pub truck_id: Option<String>,
    pub is_filled: Option<bool>,
    pub has_reached_destination: Option<bool>,
    #[validate(
        required(message = "destination is required"),
        length(min = 1, message = "destination is required")
    )]
    pub destination: Option<String>,
    pub current_location: Option<GeoLocation>,
    pub location_name: Option<String>,
    #[validate(
        required(message = "image_url is required"),
        length(min = 1, message = "image_url is required")
    )]
    pub image_url: Option<String>,
}

impl CreateTruckRequest {
    /// Validate the request and build a new truck record stamped with `now`.
    pub fn into_truck(self, now: DateTime<Utc>) -> Result<Truck, AppError> {
        self.validate()?;

        let (Some(truck_id), Some(destination), Some(image_url)) =
            (self.truck_id, self.destination, self.image_url)
        else {
            return Err(AppError::DocumentValidation(
                "truck_id, destination and image_url are required".to_string(),
            ));
        };

        Ok(Truck {
            truck_id,
            is_filled: self.is_filled.unwrap_or(false),
            has_reached_destination: self.has_reached_destination.unwrap_or(false),
            destination,
            current_location: self.current_location,
            location_name: self.location_name,
            last_updated: now,
            image_url,
        })
    }
}

/// Body of `PUT /trucks/{truck_id}`.
///
/// Only the fields present in the request are written; the rest keep their
/// stored values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TruckStatusUpdate {
    pub is_filled: Option<bool>,
    pub has_reached_destination: Option<bool>,
    pub current_location: Option<GeoLocation>,
}

impl TruckStatusUpdate {
    /// Document field paths written by this update. Always includes
    /// `last_updated`.
    pub fn field_paths(&self) -> Vec<&'static str> {
        let mut paths = Vec::with_capacity(4);
        if self.is_filled.is_some() {
            paths.push("is_filled");
        }
        if self.has_reached_destination.is_some() {
            paths.push("has_reached_destination");
        }
        if self.current_location.is_some() {
            paths.push("current_location");
        }
        paths.push("last_updated");
        paths
    }

    /// Apply this update to a truck in place.
    pub fn apply(&self, truck: &mut Truck, now: DateTime<Utc>) {
        if let Some(filled) = self.is_filled {
            truck.is_filled = filled;
        }
        if let Some(reached) = self.has_reached_destination {
            truck.has_reached_destination = reached;
        }
        if let Some(location) = self.current_location {
            truck.current_location = Some(location);
        }
        truck.last_updated = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateTruckRequest {
        CreateTruckRequest {
            truck_id: Some("TRK-001".to_string()),
            destination: Some("North Landfill".to_string()),
            image_url: Some("https://cdn.example.com/cam/1.jpg".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_into_truck_applies_defaults() {
        let now = Utc::now();
        let truck = valid_request().into_truck(now).unwrap();

        assert_eq!(truck.truck_id, "TRK-001");
        assert!(!truck.is_filled);
        assert!(!truck.has_reached_destination);
        assert_eq!(truck.current_location, None);
        assert_eq!(truck.last_updated, now);
    }

    #[test]
    fn test_into_truck_keeps_provided_fields() {
        let request = CreateTruckRequest {
            is_filled: Some(true),
            current_location: Some(GeoLocation {
                latitude: Some(6.9271),
                longitude: Some(79.8612),
            }),
            location_name: Some("Colombo Fort".to_string()),
            ..valid_request()
        };
        let truck = request.into_truck(Utc::now()).unwrap();

        assert!(truck.is_filled);
        assert_eq!(truck.current_location.unwrap().latitude, Some(6.9271));
        assert_eq!(truck.location_name.as_deref(), Some("Colombo Fort"));
    }

    #[test]
    fn test_missing_image_url_rejected() {
        let request = CreateTruckRequest {
            image_url: None,
            ..valid_request()
        };
        let err = request.into_truck(Utc::now()).unwrap_err();
        assert!(matches!(err, AppError::DocumentValidation(ref m) if m.contains("image_url")));
    }

    #[test]
    fn test_empty_required_fields_rejected() {
        let request = CreateTruckRequest {
            truck_id: Some(String::new()),
            destination: Some(String::new()),
            ..valid_request()
        };
        let err = request.into_truck(Utc::now()).unwrap_err();
        match err {
            AppError::DocumentValidation(msg) => {
                assert!(msg.contains("truck_id"));
                assert!(msg.contains("destination"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_status_update_field_paths() {
        let update = TruckStatusUpdate {
            is_filled: Some(true),
            ..Default::default()
        };
        assert_eq!(update.field_paths(), vec!["is_filled", "last_updated"]);

        assert_eq!(
            TruckStatusUpdate::default().field_paths(),
            vec!["last_updated"]
        );
    }

    #[test]
    fn test_status_update_leaves_omitted_fields() {
        let created = Utc::now();
        let mut truck = CreateTruckRequest {
            has_reached_destination: Some(true),
            ..valid_request()
        }
        .into_truck(created)
        .unwrap();

        let later = created + chrono::Duration::seconds(5);
        TruckStatusUpdate {
            is_filled: Some(true),
            ..Default::default()
        }
        .apply(&mut truck, later);

        assert!(truck.is_filled);
        assert!(truck.has_reached_destination);
        assert_eq!(truck.destination, "North Landfill");
        assert_eq!(truck.last_updated, later);
    }

    #[test]
    fn test_location_accepts_single_coordinate() {
        let location: GeoLocation = serde_json::from_str(r#"{"latitude": 1.5}"#).unwrap();
        assert_eq!(location.latitude, Some(1.5));
        assert_eq!(location.longitude, None);

        let json = serde_json::to_value(location).unwrap();
        assert_eq!(json, serde_json::json!({"latitude": 1.5}));
    }
}
