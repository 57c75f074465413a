pub mod json_body;
pub mod user_id;

pub use json_body::JsonBody;
pub use user_id::UserIdPath;
