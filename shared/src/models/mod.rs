//! Data models
//!
//! Shared between the client and anything else that speaks the API.
//! All IDs are opaque server-assigned strings (serialized as `_id`).

pub mod complaint;
pub mod department;
pub mod user;

// Re-exports
pub use complaint::*;
pub use department::*;
pub use user::*;
