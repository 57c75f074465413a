use axum::async_trait;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use service_core::error::AppError;

use crate::models::UserId;

/// Extracts the `:id` path segment as a [`UserId`].
///
/// A segment that cannot even be decoded as a path parameter is treated like any
/// other unknown id and rejected with 404.
#[derive(Debug, Clone)]
pub struct UserIdPath(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for UserIdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::NotFound(anyhow::anyhow!("Unusable user id: {}", e)))?;

        Ok(UserIdPath(UserId::from(raw)))
    }
}
