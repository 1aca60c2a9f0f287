use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// `Json` body whose rejections come back as a JSON 400
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);
