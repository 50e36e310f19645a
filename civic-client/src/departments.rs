//! Department directory (admin)

use shared::models::{Complaint, Department, DepartmentInput};
use shared::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_email, validate_optional_text,
    validate_required_text,
};

use crate::api::CivicApi;
use crate::client::HttpClient;
use crate::error::ClientResult;

/// Header cards of the department screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DepartmentTotals {
    pub departments: usize,
    /// Departments with a named head
    pub officials: usize,
    pub complaints: usize,
}

/// Check a department form before it is sent
pub fn validate_department(input: &DepartmentInput) -> ClientResult<()> {
    validate_required_text(&input.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&input.head, "head", MAX_NAME_LEN)?;
    if !input.email.trim().is_empty() {
        validate_email(&input.email)?;
    }
    validate_optional_text(&Some(input.phone.clone()), "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&Some(input.description.clone()), "description", MAX_NOTE_LEN)?;
    Ok(())
}

#[derive(Debug, Clone, Default)]
pub struct DepartmentDirectory {
    departments: Vec<Department>,
}

impl DepartmentDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> &[Department] {
        &self.departments
    }

    pub fn get(&self, id: &str) -> Option<&Department> {
        self.departments.iter().find(|d| d.id == id)
    }

    pub fn replace_all(&mut self, departments: Vec<Department>) {
        self.departments = departments;
    }

    /// Case-insensitive match on name or head; empty term returns everything
    pub fn search(&self, term: &str) -> Vec<&Department> {
        let needle = term.trim().to_lowercase();
        self.departments
            .iter()
            .filter(|d| {
                needle.is_empty()
                    || d.name.to_lowercase().contains(&needle)
                    || d.head.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// New departments go first
    pub fn insert(&mut self, department: Department) {
        self.departments.retain(|d| d.id != department.id);
        self.departments.insert(0, department);
    }

    /// Replace the department with the same id; unknown ids are a no-op
    pub fn replace(&mut self, department: Department) -> bool {
        match self.departments.iter_mut().find(|d| d.id == department.id) {
            Some(existing) => {
                *existing = department;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.departments.len();
        self.departments.retain(|d| d.id != id);
        before != self.departments.len()
    }

    pub fn totals(&self) -> DepartmentTotals {
        DepartmentTotals {
            departments: self.departments.len(),
            officials: self
                .departments
                .iter()
                .filter(|d| !d.head.trim().is_empty())
                .count(),
            complaints: self.departments.iter().map(|d| d.complaint_count).sum(),
        }
    }

    /// Recompute every `complaint_count` from `complaints`
    pub fn recount(&mut self, complaints: &[Complaint]) {
        for department in &mut self.departments {
            department.complaint_count = complaints
                .iter()
                .filter(|c| c.department_id() == Some(department.id.as_str()))
                .count();
        }
    }

    // ========== Server round-trips ==========

    pub async fn load<H: HttpClient>(&mut self, api: &CivicApi<H>) -> ClientResult<()> {
        let departments = api.departments().await?;
        tracing::debug!(count = departments.len(), "departments loaded");
        self.replace_all(departments);
        Ok(())
    }

    pub async fn create<H: HttpClient>(
        &mut self,
        api: &CivicApi<H>,
        input: &DepartmentInput,
    ) -> ClientResult<Department> {
        validate_department(input)?;
        let created = api.create_department(input).await?;
        tracing::info!(department_id = %created.id, name = %created.name, "department created");
        self.insert(created.clone());
        Ok(created)
    }

    pub async fn update<H: HttpClient>(
        &mut self,
        api: &CivicApi<H>,
        id: &str,
        input: &DepartmentInput,
    ) -> ClientResult<Department> {
        validate_department(input)?;
        let updated = api.update_department(id, input).await?;
        self.replace(updated.clone());
        Ok(updated)
    }

    pub async fn delete<H: HttpClient>(&mut self, api: &CivicApi<H>, id: &str) -> ClientResult<()> {
        api.delete_department(id).await?;
        tracing::info!(department_id = %id, "department deleted");
        self.remove(id);
        Ok(())
    }
}
