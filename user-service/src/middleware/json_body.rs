use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use service_core::error::AppError;

/// JSON body extractor that fails closed with a bare 400.
///
/// Unlike `axum::Json` it ignores `Content-Type` and reports every parse failure
/// (bad syntax, missing field, wrong type) the same way.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            AppError::BadRequest(anyhow::anyhow!("Failed to read request body: {}", e))
        })?;

        let value = serde_json::from_slice(&bytes).map_err(|e| {
            AppError::BadRequest(anyhow::anyhow!("Malformed request body: {}", e))
        })?;

        Ok(JsonBody(value))
    }
}
