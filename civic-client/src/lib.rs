//! Civic Client - client library for the civic complaint desk API
//!
//! Talks to the complaint desk backend over HTTP (or in-process through an
//! axum `Router`) and keeps the client-side view of complaints, departments
//! and the signed-in actor.
//!
//! # Example
//!
//! ```ignore
//! use civic_client::{ClientConfig, ComplaintQuery, Credentials, StoreScope};
//!
//! let session = ClientConfig::from_env().build_session()?;
//! session.login(&Credentials::new("admin@city.gov", "secret")).await?;
//!
//! let board = session.board(StoreScope::Admin).await;
//! board.refresh().await?;
//! let pending = board
//!     .project(&ComplaintQuery::admin().with_status("Pending".parse()?))
//!     .await;
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod departments;
pub mod error;
pub mod filter;
pub mod forms;
pub mod logger;
pub mod reconciler;
pub mod session;
pub mod store;
pub mod summary;

pub use api::CivicApi;
pub use client::{HttpClient, NetworkHttpClient, OneshotHttpClient};
pub use config::ClientConfig;
pub use dashboard::{DashboardShell, NavItem, ViewState};
pub use departments::{DepartmentDirectory, DepartmentTotals};
pub use error::{ClientError, ClientResult, ErrorKind};
pub use filter::{ComplaintQuery, DepartmentFilter, SortOrder, StatusFilter, project};
pub use forms::{ComplaintForm, FormFields, FormState, LoginForm, PasswordForm, RegisterForm};
pub use reconciler::{ComplaintBoard, can_save};
pub use session::{CredentialStore, Credentials, Session, SessionContext};
pub use store::{ComplaintStore, FetchOutcome, Mutation, StoreScope};
pub use summary::{Summary, summarize, summarize_by_department};

// Re-export shared types for convenience
pub use shared::models::{Complaint, ComplaintCategory, ComplaintStatus, Department, Role, User};
