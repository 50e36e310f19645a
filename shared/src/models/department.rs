//! Department Model

use serde::{Deserialize, Serialize};

/// Department entity
///
/// `complaint_count` is derived data: the server may send it, and the
/// client recomputes it from the complaint list it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    #[serde(rename = "_id")]
    pub id: String,
    /// Unique display label
    pub name: String,
    #[serde(default)]
    pub head: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub complaint_count: usize,
}

/// Create / update department payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentInput {
    pub name: String,
    pub head: String,
    pub email: String,
    pub phone: String,
    pub description: String,
}

impl From<&Department> for DepartmentInput {
    fn from(department: &Department) -> Self {
        Self {
            name: department.name.clone(),
            head: department.head.clone(),
            email: department.email.clone(),
            phone: department.phone.clone(),
            description: department.description.clone(),
        }
    }
}
