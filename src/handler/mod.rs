//! Request handler module
//!
//! Responsible for request routing dispatch for the mock sentiment API.

pub mod router;

// Re-export main entry point
pub use router::handle_request;
