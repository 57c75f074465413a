use async_trait::async_trait;
use service_core::error::AppError;

use crate::models::{NewUser, User, UserId};

/// Collection-scoped access to persisted users.
///
/// Implementations decode [`UserId`]s themselves: an id that cannot name a stored
/// user is reported as absent, never as an error. Each call is one round trip to
/// the backing store and is safe to issue concurrently from many requests.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AppError>;

    /// Stores a user under a freshly assigned id and returns it.
    async fn insert(&self, user: NewUser) -> Result<User, AppError>;

    /// Returns whether a user was removed.
    async fn remove(&self, id: &UserId) -> Result<bool, AppError>;

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    /// Releases the store's connections. Called once after the server has drained.
    async fn shutdown(&self) {}
}
