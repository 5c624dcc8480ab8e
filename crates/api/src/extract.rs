//! Request extractors whose rejections render as the standard error body.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// `Json<T>` whose rejections (malformed body, wrong content type) render as
/// the standard `{ error, code }` body with status 400.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `Path<T>` whose rejections (e.g. a non-numeric id) render as the standard
/// `{ error, code }` body with status 400.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
