// civic-client/tests/common/mod.rs
// In-process stand-in for the complaint desk backend

#![allow(dead_code)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use chrono::{Duration as ChronoDuration, Utc};
use serde_json::{Value, json};

use civic_client::{CivicApi, Credentials, OneshotHttpClient, SessionContext};
use shared::client::{LoginRequest, RegisterRequest};
use shared::models::{
    CitizenRef, Complaint, ComplaintCategory, ComplaintStatus, Department, DepartmentInput,
    DepartmentRef, NewComplaint, PasswordChange, ProfileUpdate, Role, StatusUpdate, User,
};

pub const ADMIN_EMAIL: &str = "admin@city.gov";
pub const ADMIN_PASSWORD: &str = "admin-pass";
pub const CITIZEN_EMAIL: &str = "asha@example.com";
pub const CITIZEN_PASSWORD: &str = "citizen-pass";

struct Account {
    user: User,
    password: String,
}

#[derive(Default)]
struct Backend {
    accounts: Vec<Account>,
    tokens: HashMap<String, String>,
    complaints: Vec<Complaint>,
    departments: Vec<Department>,
    /// Endpoint keys that answer 500
    failing: HashSet<&'static str>,
    /// Delays applied, in order, to `GET /admin/complaints`
    fetch_delays: VecDeque<Duration>,
    requests: Vec<String>,
}

impl Backend {
    fn department_ref(&self, id: &str) -> Option<DepartmentRef> {
        self.departments
            .iter()
            .find(|d| d.id == id)
            .map(|d| DepartmentRef::new(d.id.clone(), d.name.clone()))
    }
}

struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.0, Json(json!({ "message": self.1 }))).into_response()
    }
}

type ApiResult = Result<Json<Value>, ApiError>;

/// Shared handle on the fake backend state
#[derive(Clone, Default)]
pub struct TestBackend {
    state: Arc<Mutex<Backend>>,
}

impl TestBackend {
    /// Backend seeded with one admin, one citizen and two departments
    pub fn new() -> Self {
        let backend = Self::default();
        {
            let mut s = backend.lock();
            s.accounts.push(Account {
                user: user("admin-1", "City Admin", ADMIN_EMAIL, Role::Admin),
                password: ADMIN_PASSWORD.into(),
            });
            s.accounts.push(Account {
                user: user("citizen-1", "Asha Rao", CITIZEN_EMAIL, Role::Citizen),
                password: CITIZEN_PASSWORD.into(),
            });
            s.departments.push(department("dept1", "Electricity Board", "K. Iyer"));
            s.departments.push(department("dept2", "Water Works", "R. Menon"));
        }
        backend
    }

    fn lock(&self) -> MutexGuard<'_, Backend> {
        self.state.lock().unwrap()
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/auth/login", post(login))
            .route("/auth/register", post(register))
            .route("/user/me", get(me))
            .route("/user/update", put(update_profile))
            .route("/user/change-password", put(change_password))
            .route("/my/summary", get(my_summary))
            .route("/my", get(my_complaints))
            .route("/complaints", post(create_complaint))
            .route("/admin/stats", get(admin_stats))
            .route("/admin/recent-complaints", get(recent_complaints))
            .route("/admin/complaints", get(admin_complaints))
            .route("/admin/complaints/summary", get(complaint_summary))
            .route("/admin/complaints/trends", get(complaint_trends))
            .route("/admin/complaints/{id}/status", put(update_status))
            .route("/admin/complaints/{id}", delete(delete_complaint))
            .route("/admin/departments", get(list_departments).post(create_department))
            .route(
                "/admin/departments/{id}",
                put(update_department).delete(delete_department),
            )
            .with_state(self.clone())
    }

    pub fn client(&self) -> OneshotHttpClient {
        OneshotHttpClient::new(self.router())
    }

    pub fn api(&self) -> CivicApi<OneshotHttpClient> {
        CivicApi::new(self.client())
    }

    /// Logged-in session without persistence
    pub async fn session_as(
        &self,
        email: &str,
        password: &str,
    ) -> SessionContext<OneshotHttpClient> {
        let session = SessionContext::new(self.api(), None);
        session
            .login(&Credentials::new(email, password))
            .await
            .expect("login");
        session
    }

    pub async fn admin(&self) -> SessionContext<OneshotHttpClient> {
        self.session_as(ADMIN_EMAIL, ADMIN_PASSWORD).await
    }

    pub async fn citizen(&self) -> SessionContext<OneshotHttpClient> {
        self.session_as(CITIZEN_EMAIL, CITIZEN_PASSWORD).await
    }

    /// Make the endpoint identified by `key` answer 500
    pub fn fail(&self, key: &'static str) {
        self.lock().failing.insert(key);
    }

    pub fn recover(&self, key: &'static str) {
        self.lock().failing.remove(key);
    }

    /// Hold the next `GET /admin/complaints` answer for `delay`. The list is
    /// read when the request arrives, not when it is answered.
    pub fn delay_next_admin_fetch(&self, delay: Duration) {
        self.lock().fetch_delays.push_back(delay);
    }

    /// Insert a complaint directly, bypassing the API
    pub fn seed_complaint(
        &self,
        title: &str,
        status: ComplaintStatus,
        department_id: Option<&str>,
        age_days: i64,
    ) -> String {
        let mut s = self.lock();
        let id = uuid::Uuid::new_v4().to_string();
        let department = department_id.and_then(|d| s.department_ref(d));
        let citizen = s
            .accounts
            .iter()
            .find(|a| a.user.role == Role::Citizen)
            .map(|a| citizen_ref(&a.user));
        s.complaints.push(Complaint {
            id: id.clone(),
            title: title.into(),
            description: format!("{title} reported by a resident"),
            category: ComplaintCategory::Other,
            department,
            status,
            created_at: Utc::now() - ChronoDuration::days(age_days),
            submitted_by: citizen,
            image_url: None,
        });
        id
    }

    pub fn complaint(&self, id: &str) -> Option<Complaint> {
        self.lock().complaints.iter().find(|c| c.id == id).cloned()
    }

    pub fn complaint_count(&self) -> usize {
        self.lock().complaints.len()
    }

    /// `"METHOD path"` of every request received so far
    pub fn requests(&self) -> Vec<String> {
        self.lock().requests.clone()
    }
}

pub fn user(id: &str, name: &str, email: &str, role: Role) -> User {
    User {
        id: id.into(),
        name: name.into(),
        email: email.into(),
        role,
        phone: None,
        address: None,
        avatar: None,
    }
}

fn department(id: &str, name: &str, head: &str) -> Department {
    Department {
        id: id.into(),
        name: name.into(),
        head: head.into(),
        email: format!("{id}@city.gov"),
        phone: String::new(),
        description: String::new(),
        complaint_count: 0,
    }
}

fn citizen_ref(user: &User) -> CitizenRef {
    CitizenRef {
        id: user.id.clone(),
        name: Some(user.name.clone()),
        email: Some(user.email.clone()),
    }
}

// ========== Request guards ==========

fn begin<'a>(
    backend: &'a TestBackend,
    key: &'static str,
    line: String,
) -> Result<MutexGuard<'a, Backend>, ApiError> {
    let mut s = backend.lock();
    s.requests.push(line);
    if s.failing.contains(key) {
        return Err(ApiError(StatusCode::INTERNAL_SERVER_ERROR, "Server error".into()));
    }
    Ok(s)
}

fn actor(s: &Backend, headers: &HeaderMap) -> Result<User, ApiError> {
    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| ApiError(StatusCode::UNAUTHORIZED, "No token provided".into()))?;
    let user_id = s
        .tokens
        .get(token)
        .ok_or_else(|| ApiError(StatusCode::UNAUTHORIZED, "Invalid token".into()))?;
    s.accounts
        .iter()
        .find(|a| &a.user.id == user_id)
        .map(|a| a.user.clone())
        .ok_or_else(|| ApiError(StatusCode::UNAUTHORIZED, "Invalid token".into()))
}

fn admin(s: &Backend, headers: &HeaderMap) -> Result<User, ApiError> {
    let user = actor(s, headers)?;
    if user.role != Role::Admin {
        return Err(ApiError(StatusCode::FORBIDDEN, "Admin access only".into()));
    }
    Ok(user)
}

fn issue_token(s: &mut Backend, user: &User) -> String {
    let token = uuid::Uuid::new_v4().to_string();
    s.tokens.insert(token.clone(), user.id.clone());
    token
}

fn newest_first(list: &[Complaint]) -> Vec<Complaint> {
    let mut list = list.to_vec();
    list.sort_by_key(|c| std::cmp::Reverse(c.created_at));
    list
}

// ========== Handlers ==========

async fn login(State(b): State<TestBackend>, Json(req): Json<LoginRequest>) -> ApiResult {
    let mut s = begin(&b, "login", "POST /auth/login".into())?;
    let user = s
        .accounts
        .iter()
        .find(|a| a.user.email == req.email && a.password == req.password)
        .map(|a| a.user.clone())
        .ok_or_else(|| ApiError(StatusCode::UNAUTHORIZED, "Invalid email or password".into()))?;
    let token = issue_token(&mut s, &user);
    Ok(Json(json!({ "token": token, "user": user })))
}

async fn register(State(b): State<TestBackend>, Json(req): Json<RegisterRequest>) -> ApiResult {
    let mut s = begin(&b, "register", "POST /auth/register".into())?;
    if s.accounts.iter().any(|a| a.user.email == req.email) {
        return Err(ApiError(StatusCode::BAD_REQUEST, "User already exists".into()));
    }
    let new_user = user(&uuid::Uuid::new_v4().to_string(), &req.name, &req.email, req.role);
    s.accounts.push(Account {
        user: new_user.clone(),
        password: req.password,
    });
    let token = issue_token(&mut s, &new_user);
    Ok(Json(json!({ "token": token, "user": new_user })))
}

async fn me(State(b): State<TestBackend>, headers: HeaderMap) -> ApiResult {
    let s = begin(&b, "me", "GET /user/me".into())?;
    // answered bare, without the {user} envelope
    Ok(Json(json!(actor(&s, &headers)?)))
}

async fn update_profile(
    State(b): State<TestBackend>,
    headers: HeaderMap,
    Json(update): Json<ProfileUpdate>,
) -> ApiResult {
    let mut s = begin(&b, "update_profile", "PUT /user/update".into())?;
    let current = actor(&s, &headers)?;
    let account = s
        .accounts
        .iter_mut()
        .find(|a| a.user.id == current.id)
        .ok_or_else(|| ApiError(StatusCode::NOT_FOUND, "User not found".into()))?;
    if let Some(name) = update.name {
        account.user.name = name;
    }
    if let Some(phone) = update.phone {
        account.user.phone = Some(phone);
    }
    if let Some(address) = update.address {
        account.user.address = Some(address);
    }
    Ok(Json(json!({ "user": account.user })))
}

async fn change_password(
    State(b): State<TestBackend>,
    headers: HeaderMap,
    Json(change): Json<PasswordChange>,
) -> ApiResult {
    let mut s = begin(&b, "change_password", "PUT /user/change-password".into())?;
    let current = actor(&s, &headers)?;
    let account = s
        .accounts
        .iter_mut()
        .find(|a| a.user.id == current.id)
        .ok_or_else(|| ApiError(StatusCode::NOT_FOUND, "User not found".into()))?;
    if account.password != change.current_password {
        return Err(ApiError(StatusCode::BAD_REQUEST, "Current password is incorrect".into()));
    }
    account.password = change.new_password;
    Ok(Json(json!({ "message": "Password updated" })))
}

async fn my_summary(State(b): State<TestBackend>, headers: HeaderMap) -> ApiResult {
    let s = begin(&b, "my_summary", "GET /my/summary".into())?;
    let me = actor(&s, &headers)?;
    let mine: Vec<&Complaint> = s
        .complaints
        .iter()
        .filter(|c| c.submitted_by.as_ref().is_some_and(|u| u.id == me.id))
        .collect();
    let count =
        |status: ComplaintStatus| mine.iter().filter(|c| c.status == status).count();
    Ok(Json(json!({
        "totalComplaints": mine.len(),
        "pending": count(ComplaintStatus::Pending),
        "resolved": count(ComplaintStatus::Resolved),
    })))
}

async fn my_complaints(State(b): State<TestBackend>, headers: HeaderMap) -> ApiResult {
    let s = begin(&b, "my", "GET /my".into())?;
    let me = actor(&s, &headers)?;
    let mine: Vec<&Complaint> = s
        .complaints
        .iter()
        .filter(|c| c.submitted_by.as_ref().is_some_and(|u| u.id == me.id))
        .collect();
    Ok(Json(json!({ "complaints": mine })))
}

async fn create_complaint(
    State(b): State<TestBackend>,
    headers: HeaderMap,
    Json(new): Json<NewComplaint>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let mut s = begin(&b, "create_complaint", "POST /complaints".into())?;
    let me = actor(&s, &headers)?;
    let department = s
        .department_ref(&new.department)
        .ok_or_else(|| ApiError(StatusCode::BAD_REQUEST, "Unknown department".into()))?;
    let complaint = Complaint {
        id: uuid::Uuid::new_v4().to_string(),
        title: new.title,
        description: new.description,
        category: new.category,
        department: Some(department),
        status: ComplaintStatus::Pending,
        created_at: Utc::now(),
        submitted_by: Some(citizen_ref(&me)),
        image_url: None,
    };
    s.complaints.push(complaint.clone());
    Ok((StatusCode::CREATED, Json(json!({ "complaint": complaint }))))
}

async fn admin_stats(State(b): State<TestBackend>, headers: HeaderMap) -> ApiResult {
    let s = begin(&b, "stats", "GET /admin/stats".into())?;
    admin(&s, &headers)?;
    let count = |status: ComplaintStatus| {
        s.complaints.iter().filter(|c| c.status == status).count()
    };
    Ok(Json(json!({
        "stats": {
            "totalUsers": s.accounts.len(),
            "pendingComplaints": count(ComplaintStatus::Pending),
            "resolvedComplaints": count(ComplaintStatus::Resolved),
            "revenueCollected": 0.0,
        }
    })))
}

async fn recent_complaints(State(b): State<TestBackend>, headers: HeaderMap) -> ApiResult {
    let s = begin(&b, "recent", "GET /admin/recent-complaints".into())?;
    admin(&s, &headers)?;
    let recent: Vec<Complaint> = newest_first(&s.complaints).into_iter().take(5).collect();
    Ok(Json(json!({ "complaints": recent })))
}

async fn admin_complaints(State(b): State<TestBackend>, headers: HeaderMap) -> ApiResult {
    let (list, delay) = {
        let mut s = begin(&b, "admin_complaints", "GET /admin/complaints".into())?;
        admin(&s, &headers)?;
        let delay = s.fetch_delays.pop_front();
        (newest_first(&s.complaints), delay)
    };
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    Ok(Json(json!({ "complaints": list })))
}

async fn complaint_summary(State(b): State<TestBackend>, headers: HeaderMap) -> ApiResult {
    let s = begin(&b, "summary", "GET /admin/complaints/summary".into())?;
    admin(&s, &headers)?;
    let rows: Vec<Value> = s
        .departments
        .iter()
        .map(|d| {
            let n = s
                .complaints
                .iter()
                .filter(|c| c.department_id() == Some(d.id.as_str()))
                .count();
            json!({ "name": d.name, "complaints": n })
        })
        .collect();
    Ok(Json(Value::Array(rows)))
}

async fn complaint_trends(State(b): State<TestBackend>, headers: HeaderMap) -> ApiResult {
    let s = begin(&b, "trends", "GET /admin/complaints/trends".into())?;
    admin(&s, &headers)?;
    let count = |status: ComplaintStatus| {
        s.complaints.iter().filter(|c| c.status == status).count()
    };
    Ok(Json(json!([{
        "month": Utc::now().format("%b").to_string(),
        "resolved": count(ComplaintStatus::Resolved),
        "pending": count(ComplaintStatus::Pending),
    }])))
}

async fn update_status(
    State(b): State<TestBackend>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(update): Json<StatusUpdate>,
) -> ApiResult {
    let mut s = begin(&b, "update_status", format!("PUT /admin/complaints/{id}/status"))?;
    admin(&s, &headers)?;
    let complaint = s
        .complaints
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or_else(|| ApiError(StatusCode::NOT_FOUND, "Complaint not found".into()))?;
    complaint.status = update.status;
    Ok(Json(json!({ "message": "Status updated" })))
}

async fn delete_complaint(
    State(b): State<TestBackend>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult {
    let mut s = begin(&b, "delete_complaint", format!("DELETE /admin/complaints/{id}"))?;
    admin(&s, &headers)?;
    let before = s.complaints.len();
    s.complaints.retain(|c| c.id != id);
    if s.complaints.len() == before {
        return Err(ApiError(StatusCode::NOT_FOUND, "Complaint not found".into()));
    }
    Ok(Json(json!({})))
}

async fn list_departments(State(b): State<TestBackend>, headers: HeaderMap) -> ApiResult {
    let s = begin(&b, "departments", "GET /admin/departments".into())?;
    actor(&s, &headers)?;
    let departments: Vec<Department> = s
        .departments
        .iter()
        .map(|d| Department {
            complaint_count: s
                .complaints
                .iter()
                .filter(|c| c.department_id() == Some(d.id.as_str()))
                .count(),
            ..d.clone()
        })
        .collect();
    Ok(Json(json!({ "departments": departments })))
}

async fn create_department(
    State(b): State<TestBackend>,
    headers: HeaderMap,
    Json(input): Json<DepartmentInput>,
) -> ApiResult {
    let mut s = begin(&b, "create_department", "POST /admin/departments".into())?;
    admin(&s, &headers)?;
    let created = Department {
        id: uuid::Uuid::new_v4().to_string(),
        name: input.name,
        head: input.head,
        email: input.email,
        phone: input.phone,
        description: input.description,
        complaint_count: 0,
    };
    s.departments.push(created.clone());
    Ok(Json(json!({ "department": created })))
}

async fn update_department(
    State(b): State<TestBackend>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(input): Json<DepartmentInput>,
) -> ApiResult {
    let mut s = begin(&b, "update_department", format!("PUT /admin/departments/{id}"))?;
    admin(&s, &headers)?;
    let department = s
        .departments
        .iter_mut()
        .find(|d| d.id == id)
        .ok_or_else(|| ApiError(StatusCode::NOT_FOUND, "Department not found".into()))?;
    department.name = input.name;
    department.head = input.head;
    department.email = input.email;
    department.phone = input.phone;
    department.description = input.description;
    Ok(Json(json!({ "department": department })))
}

async fn delete_department(
    State(b): State<TestBackend>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult {
    let mut s = begin(&b, "delete_department", format!("DELETE /admin/departments/{id}"))?;
    admin(&s, &headers)?;
    s.departments.retain(|d| d.id != id);
    Ok(Json(json!({ "message": "Department deleted" })))
}
