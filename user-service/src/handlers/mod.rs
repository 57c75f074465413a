pub mod users;

pub use users::{create_user, delete_user, fetch_user, not_found};
