pub mod users;

pub use users::{CreateUserRequest, UserResponse};
