use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::{NewUser, User};

/// Body of `POST /user`. Unknown fields, including a caller-supplied `id`, are ignored.
///
/// Only a JSON object is accepted; serde would otherwise also take the positional
/// array form of a struct.
#[derive(Debug, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct CreateUserRequest {
    pub name: String,
    pub gender: String,
    pub age: i64,
}

#[derive(Deserialize)]
struct CreateUserFields {
    name: String,
    gender: String,
    age: i64,
}

impl TryFrom<Map<String, Value>> for CreateUserRequest {
    type Error = serde_json::Error;

    fn try_from(object: Map<String, Value>) -> Result<Self, Self::Error> {
        let fields: CreateUserFields = serde_json::from_value(Value::Object(object))?;
        Ok(CreateUserRequest {
            name: fields.name,
            gender: fields.gender,
            age: fields.age,
        })
    }
}

impl From<CreateUserRequest> for NewUser {
    fn from(req: CreateUserRequest) -> Self {
        NewUser {
            name: req.name,
            gender: req.gender,
            age: req.age,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub gender: String,
    pub age: i64,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.as_str().to_string(),
            name: user.name,
            gender: user.gender,
            age: user.age,
        }
    }
}
