//! Custom Axum extractors

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use formctl_core::FormId;

use super::error::ApiError;
use crate::models::ValidationError;

/// Extract and validate a numeric form id from the path
pub struct ValidFormId(pub FormId);

impl<S> FromRequestParts<S> for ValidFormId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation(ValidationError::Empty { field: "id" }))?;

        let id = raw.parse::<FormId>().map_err(|_| {
            ApiError::Validation(ValidationError::InvalidFormat {
                field: "id",
                reason: "expected an integer form id",
            })
        })?;

        Ok(Self(id))
    }
}
