pub mod panic;
pub mod tracing;

pub use panic::panic_response;
pub use tracing::{REQUEST_ID_HEADER, make_request_span, request_id_middleware};
