//! Transport layer.
//!
//! [`HttpClient`] is the seam every API call goes through. Two
//! implementations exist: [`NetworkHttpClient`] over reqwest, and
//! [`OneshotHttpClient`] which calls an axum `Router` in-process.

pub mod http;
pub mod http_oneshot;

pub use http::{HttpClient, NetworkHttpClient};
pub use http_oneshot::OneshotHttpClient;
