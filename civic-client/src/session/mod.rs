//! Session management
//!
//! [`SessionContext`] owns the current actor; [`CredentialStore`] persists it
//! between runs.

mod context;
mod storage;

pub use context::{Credentials, Session, SessionContext};
pub use storage::{CredentialStore, StoredSession};
