//! Shared types for the civic complaint desk
//!
//! Wire-level models and request/response payloads used by anything that
//! speaks the complaint desk REST API, plus the text limits and validation
//! helpers applied to user input before it is sent.

pub mod client;
pub mod error;
pub mod models;
pub mod response;
pub mod validation;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{ParseError, ValidationError};
pub use models::{
    CitizenRef, Complaint, ComplaintCategory, ComplaintPatch, ComplaintStatus, Department,
    DepartmentInput, DepartmentRef, Role, User,
};
