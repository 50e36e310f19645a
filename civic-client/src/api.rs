//! Typed complaint desk API
//!
//! One method per REST endpoint. Envelopes are unwrapped here so callers
//! deal in domain types only.

use shared::client::{AuthResponse, LoginRequest, RegisterRequest};
use shared::models::{
    Complaint, ComplaintStatus, Department, DepartmentInput, NewComplaint, PasswordChange,
    ProfileUpdate, StatusUpdate, User,
};
use shared::response::{
    Ack, AdminStats, CitizenSummary, ComplaintEnvelope, ComplaintList, DepartmentComplaintCount,
    DepartmentEnvelope, DepartmentList, StatsEnvelope, TrendPoint, UserEnvelope,
};

use crate::client::HttpClient;
use crate::error::ClientResult;

/// Typed wrapper over an [`HttpClient`] transport
#[derive(Debug, Clone)]
pub struct CivicApi<H> {
    http: H,
}

impl<H: HttpClient> CivicApi<H> {
    pub fn new(http: H) -> Self {
        Self { http }
    }

    /// The underlying transport
    pub fn http(&self) -> &H {
        &self.http
    }

    pub async fn set_token(&self, token: Option<String>) {
        self.http.set_token(token).await;
    }

    // ========== Auth API ==========

    pub async fn login(&self, request: &LoginRequest) -> ClientResult<AuthResponse> {
        self.http.post("/auth/login", request).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<AuthResponse> {
        self.http.post("/auth/register", request).await
    }

    // ========== User API ==========

    pub async fn me(&self) -> ClientResult<User> {
        let envelope: UserEnvelope = self.http.get("/user/me").await?;
        Ok(envelope.into_user())
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> ClientResult<User> {
        let envelope: UserEnvelope = self.http.put("/user/update", update).await?;
        Ok(envelope.into_user())
    }

    pub async fn change_password(&self, change: &PasswordChange) -> ClientResult<Ack> {
        self.http.put("/user/change-password", change).await
    }

    // ========== Citizen complaints ==========

    pub async fn my_summary(&self) -> ClientResult<CitizenSummary> {
        self.http.get("/my/summary").await
    }

    pub async fn my_complaints(&self) -> ClientResult<Vec<Complaint>> {
        let list: ComplaintList = self.http.get("/my").await?;
        Ok(list.into_vec())
    }

    pub async fn create_complaint(&self, complaint: &NewComplaint) -> ClientResult<Complaint> {
        let envelope: ComplaintEnvelope = self.http.post("/complaints", complaint).await?;
        Ok(envelope.complaint)
    }

    // ========== Admin complaints ==========

    pub async fn admin_stats(&self) -> ClientResult<AdminStats> {
        let envelope: StatsEnvelope = self.http.get("/admin/stats").await?;
        Ok(envelope.stats)
    }

    pub async fn recent_complaints(&self) -> ClientResult<Vec<Complaint>> {
        let list: ComplaintList = self.http.get("/admin/recent-complaints").await?;
        Ok(list.into_vec())
    }

    pub async fn admin_complaints(&self) -> ClientResult<Vec<Complaint>> {
        let list: ComplaintList = self.http.get("/admin/complaints").await?;
        Ok(list.into_vec())
    }

    pub async fn update_status(&self, id: &str, status: ComplaintStatus) -> ClientResult<Ack> {
        self.http
            .put(&format!("/admin/complaints/{id}/status"), &StatusUpdate { status })
            .await
    }

    pub async fn delete_complaint(&self, id: &str) -> ClientResult<Ack> {
        self.http.delete(&format!("/admin/complaints/{id}")).await
    }

    // ========== Departments ==========

    pub async fn departments(&self) -> ClientResult<Vec<Department>> {
        let list: DepartmentList = self.http.get("/admin/departments").await?;
        Ok(list.departments)
    }

    pub async fn create_department(&self, input: &DepartmentInput) -> ClientResult<Department> {
        let envelope: DepartmentEnvelope = self.http.post("/admin/departments", input).await?;
        Ok(envelope.department)
    }

    pub async fn update_department(
        &self,
        id: &str,
        input: &DepartmentInput,
    ) -> ClientResult<Department> {
        let envelope: DepartmentEnvelope = self
            .http
            .put(&format!("/admin/departments/{id}"), input)
            .await?;
        Ok(envelope.department)
    }

    pub async fn delete_department(&self, id: &str) -> ClientResult<Ack> {
        self.http.delete(&format!("/admin/departments/{id}")).await
    }

    // ========== Reporting ==========

    pub async fn complaint_summary(&self) -> ClientResult<Vec<DepartmentComplaintCount>> {
        self.http.get("/admin/complaints/summary").await
    }

    pub async fn complaint_trends(&self) -> ClientResult<Vec<TrendPoint>> {
        self.http.get("/admin/complaints/trends").await
    }
}
