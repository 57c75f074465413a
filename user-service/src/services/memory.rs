use async_trait::async_trait;
use dashmap::DashMap;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;
use std::sync::Arc;

use crate::models::{NewUser, User, UserDocument, UserId};
use crate::services::UserStore;

/// A process-local user store for tests and local runs without MongoDB.
///
/// Ids are generated as `ObjectId`s so the wire format matches the MongoDB store.
#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    users: Arc<DashMap<ObjectId, UserDocument>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AppError> {
        let Some(oid) = id.to_object_id() else {
            return Ok(None);
        };
        let document = self.users.get(&oid).map(|entry| entry.value().clone());
        document.map(UserDocument::into_user).transpose()
    }

    async fn insert(&self, user: NewUser) -> Result<User, AppError> {
        let oid = ObjectId::new();
        let document = UserDocument {
            id: Some(oid),
            ..user.into_document()
        };
        self.users.insert(oid, document.clone());
        document.into_user()
    }

    async fn remove(&self, id: &UserId) -> Result<bool, AppError> {
        let Some(oid) = id.to_object_id() else {
            return Ok(false);
        };
        Ok(self.users.remove(&oid).is_some())
    }
}
