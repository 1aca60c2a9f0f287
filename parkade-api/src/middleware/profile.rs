use axum::{extract::FromRequestParts, http::request::Parts};
use parkade_core::ProfileId;

use crate::error::AppError;

pub const PROFILE_HEADER: &str = "x-profile-id";

/// Profile selected by the `x-profile-id` header, `default` when absent.
/// No credentials are checked.
#[derive(Debug, Clone)]
pub struct Profile(pub ProfileId);

impl<S> FromRequestParts<S> for Profile
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(PROFILE_HEADER) else {
            return Ok(Profile(ProfileId::default()));
        };

        let raw = value
            .to_str()
            .map_err(|_| AppError::ValidationError(format!("{} is not valid ASCII", PROFILE_HEADER)))?;

        Ok(Profile(ProfileId::parse(raw)?))
    }
}
