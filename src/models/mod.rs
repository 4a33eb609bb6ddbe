//! Data models for visit records and API responses.

pub mod api;
pub mod visit;

pub use api::*;
pub use visit::*;
