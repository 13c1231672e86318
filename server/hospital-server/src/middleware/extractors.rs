//! Body, query and path extractors that reject with [`ApiError`]
//!
//! axum's own `Json`, `Query` and `Path` answer malformed input with a plain
//! text body. These wrappers route the rejection through [`ApiError`] so the
//! client gets the usual JSON error and the server logs an error ID.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::ApiError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);
