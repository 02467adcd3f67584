//! API request/response types

pub mod comps;
pub mod error;
pub mod json;

pub use comps::CompsRequest;
pub use error::{ApiError, ApiErrorResponse, ErrorCode};
pub use json::Json;
