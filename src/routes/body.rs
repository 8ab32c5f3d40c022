//! Request body extractor accepting JSON or URL-encoded forms.

use crate::error::AppError;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header,
    Form, Json,
};
use serde::de::DeserializeOwned;

/// Deserializes the body as a form when `Content-Type` is
/// `application/x-www-form-urlencoded`, otherwise as JSON.
///
/// A request with no `Content-Type` and an empty body yields `T::default()`,
/// so bodiless requests behave like `{}`.
///
/// Rejections become `AppError::Validation` so clients always get the
/// JSON error body.
pub struct JsonOrForm<T>(pub T);

/// `None` when the request carries no `Content-Type`, otherwise whether it
/// is a URL-encoded form.
fn form_content_type(req: &Request) -> Option<bool> {
    req.headers()
        .get(header::CONTENT_TYPE)
        .map(|v| {
            v.to_str()
                .is_ok_and(|ct| ct.starts_with("application/x-www-form-urlencoded"))
        })
}

impl<T, S> FromRequest<S> for JsonOrForm<T>
where
    T: DeserializeOwned + Default + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Some(is_form) = form_content_type(&req) else {
            let bytes = Bytes::from_request(req, state)
                .await
                .map_err(|e| AppError::Validation(e.body_text()))?;
            if bytes.iter().all(u8::is_ascii_whitespace) {
                return Ok(Self(T::default()));
            }
            let Json(value) =
                Json::<T>::from_bytes(&bytes).map_err(|e| AppError::Validation(e.body_text()))?;
            return Ok(Self(value));
        };

        if is_form {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::Validation(e.body_text()))?;
            Ok(Self(value))
        } else {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::Validation(e.body_text()))?;
            Ok(Self(value))
        }
    }
}
