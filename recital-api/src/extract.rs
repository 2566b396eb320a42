use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json` whose rejections (bad syntax, wrong types, missing
/// content type) come back in the usual error envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);
