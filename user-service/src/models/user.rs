use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use std::fmt;

/// Wire form of a user identifier.
///
/// On the wire an id is the hex encoding of the store's `ObjectId`. Keeping it a
/// string here lets handlers pass ids through without knowing which store backs
/// them; decoding happens only at the store boundary via [`UserId::to_object_id`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decodes the wire form. `None` means the id cannot name any stored user.
    pub fn to_object_id(&self) -> Option<ObjectId> {
        ObjectId::parse_str(&self.0).ok()
    }
}

impl From<ObjectId> for UserId {
    fn from(oid: ObjectId) -> Self {
        UserId(oid.to_hex())
    }
}

impl From<String> for UserId {
    fn from(raw: String) -> Self {
        UserId(raw)
    }
}

impl From<&str> for UserId {
    fn from(raw: &str) -> Self {
        UserId(raw.to_string())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Persisted shape of a user in the `users` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub gender: String,
    pub age: i64,
}

impl UserDocument {
    pub fn into_user(self) -> Result<User, AppError> {
        let id = self.id.ok_or_else(|| {
            AppError::DatabaseError(anyhow::anyhow!("Stored user document has no _id"))
        })?;
        Ok(User {
            id: UserId::from(id),
            name: self.name,
            gender: self.gender,
            age: self.age,
        })
    }
}

/// A user that has not been stored yet and therefore has no id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub gender: String,
    pub age: i64,
}

impl NewUser {
    /// Document for insertion; `_id` is left for the store to assign.
    pub fn into_document(self) -> UserDocument {
        UserDocument {
            id: None,
            name: self.name,
            gender: self.gender,
            age: self.age,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub gender: String,
    pub age: i64,
}
