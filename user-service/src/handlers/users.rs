//! User handlers.
//!
//! Each handler performs exactly one store operation and holds no state between
//! requests.

use axum::{extract::State, http::StatusCode, Json};
use service_core::error::AppError;

use crate::{
    dtos::{CreateUserRequest, UserResponse},
    middleware::{JsonBody, UserIdPath},
    models::NewUser,
    startup::AppState,
};

/// `GET /user/:id`
pub async fn fetch_user(
    State(state): State<AppState>,
    UserIdPath(user_id): UserIdPath,
) -> Result<Json<UserResponse>, AppError> {
    tracing::info!(user_id = %user_id, "Fetching user");

    let user = state
        .store
        .find_by_id(&user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("User {} not found", user_id)))?;

    Ok(Json(UserResponse::from(user)))
}

/// `POST /user`
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = state.store.insert(NewUser::from(payload)).await?;

    tracing::info!(user_id = %user.id, "Created user");

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// `DELETE /user/:id`; confirms with plain text rather than echoing the user.
pub async fn delete_user(
    State(state): State<AppState>,
    UserIdPath(user_id): UserIdPath,
) -> Result<(StatusCode, String), AppError> {
    tracing::info!(user_id = %user_id, "Deleting user");

    if !state.store.remove(&user_id).await? {
        return Err(AppError::NotFound(anyhow::anyhow!(
            "User {} not found",
            user_id
        )));
    }

    Ok((StatusCode::OK, format!("Deleted user {}", user_id)))
}

/// Anything outside the registered method and path pairs.
pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
