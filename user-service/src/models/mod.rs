pub mod user;

pub use user::{NewUser, User, UserDocument, UserId};
