use async_trait::async_trait;
use mongodb::{
    bson::doc, options::ClientOptions, Client as MongoClient, Collection, Database,
};
use service_core::error::AppError;

use crate::models::{NewUser, User, UserDocument, UserId};
use crate::services::UserStore;

const USERS_COLLECTION: &str = "users";

const APP_NAME: &str = "user-service";

/// MongoDB-backed user store.
///
/// Wraps one driver client for the life of the process; the driver's own pool
/// handles concurrent use, so clones share connections.
#[derive(Clone)]
pub struct MongoUserStore {
    client: MongoClient,
    db: Database,
    users: Collection<UserDocument>,
}

impl MongoUserStore {
    /// Builds the client. The driver connects lazily, so an unreachable server
    /// shows up on the first operation rather than here.
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(database = %database, "Connecting to MongoDB");

        let mut client_options = ClientOptions::parse(uri).await.map_err(|e| {
            tracing::error!("Failed to parse MongoDB connection string: {}", e);
            AppError::ConfigError(e.into())
        })?;
        client_options.app_name = Some(APP_NAME.to_string());

        let client = MongoClient::with_options(client_options).map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        let users = db.collection(USERS_COLLECTION);

        tracing::info!(
            database = %database,
            collection = USERS_COLLECTION,
            "MongoDB client ready"
        );
        Ok(Self { client, db, users })
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AppError> {
        let Some(oid) = id.to_object_id() else {
            return Ok(None);
        };

        let document = self
            .users
            .find_one(doc! { "_id": oid }, None)
            .await
            .map_err(|e| {
                tracing::error!(user_id = %id, "Failed to find user: {}", e);
                AppError::from(e)
            })?;

        document.map(UserDocument::into_user).transpose()
    }

    async fn insert(&self, user: NewUser) -> Result<User, AppError> {
        let document = user.into_document();

        let result = self.users.insert_one(&document, None).await.map_err(|e| {
            tracing::error!("Failed to insert user: {}", e);
            AppError::from(e)
        })?;

        let oid = result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::DatabaseError(anyhow::anyhow!(
                "Inserted user id is not an ObjectId: {}",
                result.inserted_id
            ))
        })?;

        UserDocument {
            id: Some(oid),
            ..document
        }
        .into_user()
    }

    async fn remove(&self, id: &UserId) -> Result<bool, AppError> {
        let Some(oid) = id.to_object_id() else {
            return Ok(false);
        };

        let result = self
            .users
            .delete_one(doc! { "_id": oid }, None)
            .await
            .map_err(|e| {
                tracing::error!(user_id = %id, "Failed to delete user: {}", e);
                AppError::from(e)
            })?;

        Ok(result.deleted_count > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB ping failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    async fn shutdown(&self) {
        tracing::info!("Shutting down MongoDB client");
        self.client.clone().shutdown().await;
    }
}
