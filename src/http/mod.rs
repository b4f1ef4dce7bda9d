//! HTTP protocol layer module
//!
//! Response builders shared by the request handler, decoupled from the
//! sentiment payload itself.

pub mod json;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_404_response, build_501_response, build_json_response, build_options_response,
};
