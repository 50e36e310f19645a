//! Dashboard shell and the joined loads behind each home screen
//!
//! A screen that needs several endpoints issues all of them at once with
//! `tokio::try_join!`. The first failure fails the whole view: nothing is
//! rendered from a partial set of responses.

use shared::models::{Complaint, Role, User};
use shared::response::{AdminStats, DepartmentComplaintCount, TrendPoint};

use crate::api::CivicApi;
use crate::client::HttpClient;
use crate::error::{ClientError, ClientResult};
use crate::filter::{ComplaintQuery, project};
use crate::summary::Summary;

/// How many complaints the citizen home lists
pub const CITIZEN_RECENT_LIMIT: usize = 5;

/// Sidebar entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub route: &'static str,
}

const ADMIN_NAV: &[NavItem] = &[
    NavItem {
        label: "Dashboard",
        route: "/admin/admin-dashboard",
    },
    NavItem {
        label: "Complaints",
        route: "/admin/complaints",
    },
    NavItem {
        label: "Departments",
        route: "/admin/departments",
    },
    NavItem {
        label: "Reports",
        route: "/admin/admin-reports",
    },
];

const CITIZEN_NAV: &[NavItem] = &[
    NavItem {
        label: "Dashboard",
        route: "/citizen/citizen-dashboard",
    },
    NavItem {
        label: "My Complaints",
        route: "/citizen/my-complaints",
    },
    NavItem {
        label: "New Complaint",
        route: "/citizen/new-complaint",
    },
    NavItem {
        label: "Profile",
        route: "/citizen/citizen-profile",
    },
];

/// One shell for both roles; only the navigation differs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardShell {
    role: Role,
}

impl DashboardShell {
    pub fn new(role: Role) -> Self {
        Self { role }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn nav_items(&self) -> &'static [NavItem] {
        match self.role {
            Role::Admin => ADMIN_NAV,
            Role::Citizen => CITIZEN_NAV,
        }
    }

    /// Landing route after login
    pub fn home_route(&self) -> &'static str {
        self.nav_items()[0].route
    }

    pub fn is_active(&self, item: &NavItem, current_route: &str) -> bool {
        item.route == current_route
    }
}

/// Render state of a screen
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> ViewState<T> {
    pub fn from_result(result: ClientResult<T>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(e) => Self::Failed(e.user_message()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self::Loading
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdminHome {
    pub stats: AdminStats,
    pub recent: Vec<Complaint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CitizenHome {
    pub summary: Summary,
    /// Newest first, at most [`CITIZEN_RECENT_LIMIT`]
    pub recent: Vec<Complaint>,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdminReports {
    pub stats: AdminStats,
    pub by_department: Vec<DepartmentComplaintCount>,
    pub trends: Vec<TrendPoint>,
    pub recent: Vec<Complaint>,
}

pub async fn load_admin_home<H: HttpClient>(api: &CivicApi<H>) -> ClientResult<AdminHome> {
    let (stats, recent) = tokio::try_join!(api.admin_stats(), api.recent_complaints())
        .inspect_err(|e| tracing::warn!(error = %e, "admin dashboard load failed"))?;
    Ok(AdminHome { stats, recent })
}

pub async fn load_citizen_home<H: HttpClient>(api: &CivicApi<H>) -> ClientResult<CitizenHome> {
    let (summary, complaints, user) =
        tokio::try_join!(api.my_summary(), api.my_complaints(), api.me())
            .inspect_err(|e| tracing::warn!(error = %e, "citizen dashboard load failed"))?;
    let recent = project(
        &complaints,
        &ComplaintQuery::citizen().with_limit(CITIZEN_RECENT_LIMIT),
    );
    Ok(CitizenHome {
        summary: summary.into(),
        recent,
        user,
    })
}

pub async fn load_admin_reports<H: HttpClient>(api: &CivicApi<H>) -> ClientResult<AdminReports> {
    let (stats, by_department, trends, recent) = tokio::try_join!(
        api.admin_stats(),
        api.complaint_summary(),
        api.complaint_trends(),
        api.recent_complaints(),
    )
    .inspect_err(|e| tracing::warn!(error = %e, "reports load failed"))?;
    Ok(AdminReports {
        stats,
        by_department,
        trends,
        recent,
    })
}

/// Load the home screen for `role` into a view state
pub async fn load_home<H: HttpClient>(api: &CivicApi<H>, role: Role) -> ViewState<HomeView> {
    let result = match role {
        Role::Admin => load_admin_home(api).await.map(HomeView::Admin),
        Role::Citizen => load_citizen_home(api).await.map(HomeView::Citizen),
    };
    ViewState::from_result(result)
}

#[derive(Debug, Clone, PartialEq)]
pub enum HomeView {
    Admin(AdminHome),
    Citizen(CitizenHome),
}

/// Map a role mismatch on a screen to the error the view shows
pub fn wrong_role(expected: Role) -> ClientError {
    ClientError::Forbidden(format!("{} access required", expected.as_str()))
}
