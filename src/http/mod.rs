//! HTTP protocol layer module
//!
//! Content-type detection, cache policy, CORS decoration, and response
//! builders, decoupled from routing and business logic.

pub mod cache;
pub mod cors;
pub mod mime;
pub mod response;

// Re-export commonly used items
pub use cors::decorate;
pub use response::{
    build_404_response, build_405_response, build_error_envelope, build_json_response,
    build_preflight_response,
};
