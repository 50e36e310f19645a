//! Complaint Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// Complaint lifecycle status
///
/// Any status may be set from any other; reopening a resolved complaint
/// is a normal triage action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplaintStatus {
    #[serde(rename = "Pending")]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Resolved")]
    Resolved,
}

impl ComplaintStatus {
    pub const ALL: [ComplaintStatus; 3] = [Self::Pending, Self::InProgress, Self::Resolved];

    /// Display label, identical to the wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
        }
    }
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplaintStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseError::new("status", s))
    }
}

/// Fixed set of complaint categories offered on the filing form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplaintCategory {
    #[serde(rename = "Water Supply")]
    WaterSupply,
    #[serde(rename = "Electricity")]
    Electricity,
    #[serde(rename = "Roads & Infrastructure")]
    RoadsInfrastructure,
    #[serde(rename = "Sanitation & Waste")]
    SanitationWaste,
    #[serde(rename = "Other")]
    Other,
}

impl ComplaintCategory {
    pub const ALL: [ComplaintCategory; 5] = [
        Self::WaterSupply,
        Self::Electricity,
        Self::RoadsInfrastructure,
        Self::SanitationWaste,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WaterSupply => "Water Supply",
            Self::Electricity => "Electricity",
            Self::RoadsInfrastructure => "Roads & Infrastructure",
            Self::SanitationWaste => "Sanitation & Waste",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for ComplaintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplaintCategory {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| ParseError::new("category", s))
    }
}

/// Department reference embedded in a complaint
///
/// Endpoints either populate the reference (`{"_id": .., "name": ..}`) or
/// send the bare id string; both deserialize into this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DepartmentRefRepr")]
pub struct DepartmentRef {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl DepartmentRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DepartmentRefRepr {
    Id(String),
    Populated {
        #[serde(rename = "_id")]
        id: String,
        #[serde(default)]
        name: Option<String>,
    },
}

impl From<DepartmentRefRepr> for DepartmentRef {
    fn from(repr: DepartmentRefRepr) -> Self {
        match repr {
            DepartmentRefRepr::Id(id) => Self { id, name: None },
            DepartmentRefRepr::Populated { id, name } => Self { id, name },
        }
    }
}

/// The citizen who filed a complaint (`user` on the wire)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CitizenRefRepr")]
pub struct CitizenRef {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CitizenRefRepr {
    Id(String),
    Populated {
        #[serde(rename = "_id")]
        id: String,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        email: Option<String>,
    },
}

impl From<CitizenRefRepr> for CitizenRef {
    fn from(repr: CitizenRefRepr) -> Self {
        match repr {
            CitizenRefRepr::Id(id) => Self {
                id,
                name: None,
                email: None,
            },
            CitizenRefRepr::Populated { id, name, email } => Self { id, name, email },
        }
    }
}

/// Department label shown for a complaint with no department, or one whose
/// reference was not populated with a name
pub const UNASSIGNED_DEPARTMENT: &str = "N/A";

/// Complaint entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    /// Server-assigned, immutable
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: ComplaintCategory,
    /// `None` until the complaint is routed to a department
    #[serde(default)]
    pub department: Option<DepartmentRef>,
    pub status: ComplaintStatus,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "user", default, skip_serializing_if = "Option::is_none")]
    pub submitted_by: Option<CitizenRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Complaint {
    pub fn department_id(&self) -> Option<&str> {
        self.department.as_ref().map(|d| d.id.as_str())
    }

    pub fn department_name(&self) -> Option<&str> {
        self.department.as_ref().and_then(|d| d.name.as_deref())
    }

    /// Department display name, [`UNASSIGNED_DEPARTMENT`] when there is none
    pub fn department_label(&self) -> &str {
        self.department_name().unwrap_or(UNASSIGNED_DEPARTMENT)
    }

    pub fn citizen_name(&self) -> Option<&str> {
        self.submitted_by.as_ref().and_then(|c| c.name.as_deref())
    }

    pub fn citizen_email(&self) -> Option<&str> {
        self.submitted_by.as_ref().and_then(|c| c.email.as_deref())
    }
}

/// Partial update applied to a complaint already held in memory
///
/// Only the fields that are `Some` are written. `id`, `created_at` and
/// `submitted_by` are immutable and have no counterpart here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplaintPatch {
    pub status: Option<ComplaintStatus>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub department: Option<DepartmentRef>,
}

impl ComplaintPatch {
    pub fn status(status: ComplaintStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn apply(&self, complaint: &mut Complaint) {
        if let Some(status) = self.status {
            complaint.status = status;
        }
        if let Some(title) = &self.title {
            complaint.title = title.clone();
        }
        if let Some(description) = &self.description {
            complaint.description = description.clone();
        }
        if let Some(department) = &self.department {
            complaint.department = Some(department.clone());
        }
    }
}

/// Payload for filing a new complaint (`POST /complaints`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComplaint {
    pub title: String,
    pub description: String,
    pub category: ComplaintCategory,
    /// Department reference id chosen on the form
    pub department: String,
}

/// Payload for `PUT /admin/complaints/:id/status`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: ComplaintStatus,
}
