//! API response envelopes
//!
//! The backend wraps most payloads in a single-key object
//! (`{"complaints": [...]}`, `{"department": {...}}`). These types mirror
//! those envelopes; a few endpoints are known to answer with the bare value
//! as well, and the untagged variants accept both.

use serde::{Deserialize, Serialize};

use crate::models::{Complaint, Department, User};

/// `{"complaints": [...]}` or a bare array
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComplaintList {
    Wrapped { complaints: Vec<Complaint> },
    Bare(Vec<Complaint>),
}

impl ComplaintList {
    pub fn into_vec(self) -> Vec<Complaint> {
        match self {
            Self::Wrapped { complaints } | Self::Bare(complaints) => complaints,
        }
    }
}

/// `{"complaint": {...}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplaintEnvelope {
    pub complaint: Complaint,
}

/// `{"departments": [...]}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentList {
    #[serde(default)]
    pub departments: Vec<Department>,
}

/// `{"department": {...}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentEnvelope {
    pub department: Department,
}

/// `{"user": {...}}` or the bare user object
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserEnvelope {
    Wrapped { user: User },
    Bare(User),
}

impl UserEnvelope {
    pub fn into_user(self) -> User {
        match self {
            Self::Wrapped { user } | Self::Bare(user) => user,
        }
    }
}

/// Citizen counts from `GET /my/summary`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitizenSummary {
    #[serde(default)]
    pub total_complaints: usize,
    #[serde(default)]
    pub pending: usize,
    #[serde(default)]
    pub resolved: usize,
}

/// Admin KPIs from `GET /admin/stats`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub pending_complaints: u64,
    #[serde(default)]
    pub resolved_complaints: u64,
    #[serde(default)]
    pub revenue_collected: f64,
}

/// `{"stats": {...}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsEnvelope {
    pub stats: AdminStats,
}

/// One bar of the complaints-by-department chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentComplaintCount {
    pub name: String,
    pub complaints: usize,
}

/// One point of the monthly trend chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub month: String,
    #[serde(default)]
    pub resolved: usize,
    #[serde(default)]
    pub pending: usize,
}

/// Acknowledgement body of mutations that return nothing useful
///
/// Accepts `{}` as well as `{"message": "..."}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Error body sent by the backend on non-2xx responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}
