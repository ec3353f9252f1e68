//! Request extractors that reject with [`AppError`] instead of axum's plain-text bodies.

use crate::error::AppError;
use axum::extract::{FromRequest, rejection::JsonRejection};

/// `Json<T>` whose rejection is rendered as a 400 `{ "error": ... }`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(anyhow::anyhow!(rejection.body_text()))
    }
}
