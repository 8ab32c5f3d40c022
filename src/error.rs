// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use firestore::errors::FirestoreError;
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    /// A document failed the store's required-field checks on save.
    #[error("Document validation failed: {0}")]
    DocumentValidation(String),

    /// A document with the same key already exists.
    #[error("Duplicate key: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// HTTP status for this error.
    ///
    /// Duplicate keys and missing required fields are persistence failures
    /// and surface as 500, same as any other database error. Only a bad
    /// request shape or an unknown role is a 400.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DocumentValidation(_)
            | AppError::Conflict(_)
            | AppError::Database(_)
            | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<FirestoreError> for AppError {
    fn from(err: FirestoreError) -> Self {
        match err {
            FirestoreError::DataConflictError(e) => AppError::Conflict(e.to_string()),
            FirestoreError::DataNotFoundError(e) => AppError::NotFound(e.to_string()),
            other => AppError::Database(other.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect();
        messages.sort();
        AppError::DocumentValidation(messages.join("; "))
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error, message, details) = match &self {
            AppError::Validation(msg) => ("validation_error", msg.clone(), None),
            AppError::NotFound(msg) => ("not_found", msg.clone(), None),
            AppError::DocumentValidation(msg) => {
                tracing::error!(error = %msg, "Document validation failed");
                (
                    "document_validation_error",
                    "Error saving document".to_string(),
                    Some(msg.clone()),
                )
            }
            AppError::Conflict(msg) => {
                tracing::error!(error = %msg, "Duplicate key");
                ("conflict", "Duplicate record".to_string(), Some(msg.clone()))
            }
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (
                    "database_error",
                    "Database operation failed".to_string(),
                    Some(msg.clone()),
                )
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (
                    "internal_error",
                    "Internal server error".to_string(),
                    Some(err.to_string()),
                )
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
