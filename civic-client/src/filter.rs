//! Complaint list projection: filter, search and sort
//!
//! [`project`] is a pure function of the full list and a [`ComplaintQuery`].
//! It is recomputed on every call and never mutates its input, so a view can
//! re-project after every store change without bookkeeping.

use std::cmp::Reverse;
use std::str::FromStr;

use shared::error::ParseError;
use shared::models::{Complaint, ComplaintStatus};

/// Status dropdown value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ComplaintStatus),
}

impl StatusFilter {
    fn matches(&self, complaint: &Complaint) -> bool {
        match self {
            Self::All => true,
            Self::Only(status) => complaint.status == *status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<ComplaintStatus>()
            .map(Self::Only)
            .map_err(|_| ParseError::new("status filter", s))
    }
}

/// What the department filter compares against.
///
/// The admin screen filters by department display name, the citizen screen
/// by department id. By name, unassigned complaints are selected with
/// `"N/A"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepartmentKey {
    Name,
    Id,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DepartmentFilter {
    #[default]
    All,
    Only(String),
}

impl DepartmentFilter {
    pub fn parse(value: &str) -> Self {
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

impl FromStr for SortOrder {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            other => Err(ParseError::new("sort order", other)),
        }
    }
}

/// Filter, search and sort settings for one list view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplaintQuery {
    pub status: StatusFilter,
    pub department: DepartmentFilter,
    pub department_key: DepartmentKey,
    pub search: String,
    pub sort: SortOrder,
    pub limit: Option<usize>,
}

impl ComplaintQuery {
    /// Admin complaints screen (department filter by name)
    pub fn admin() -> Self {
        Self {
            status: StatusFilter::All,
            department: DepartmentFilter::All,
            department_key: DepartmentKey::Name,
            search: String::new(),
            sort: SortOrder::Newest,
            limit: None,
        }
    }

    /// Citizen "my complaints" screen (department filter by id)
    pub fn citizen() -> Self {
        Self {
            department_key: DepartmentKey::Id,
            ..Self::admin()
        }
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn with_department(mut self, department: DepartmentFilter) -> Self {
        self.department = department;
        self
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Keep only the first `n` records after sorting
    pub fn with_limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    fn matches_department(&self, complaint: &Complaint) -> bool {
        let DepartmentFilter::Only(wanted) = &self.department else {
            return true;
        };
        match self.department_key {
            DepartmentKey::Name => complaint.department_label() == wanted,
            DepartmentKey::Id => complaint.department_id() == Some(wanted.as_str()),
        }
    }
}

impl Default for ComplaintQuery {
    fn default() -> Self {
        Self::admin()
    }
}

/// Case-insensitive substring match over id, citizen name and email, title
/// and category. `needle` must already be lowercase.
fn matches_search(complaint: &Complaint, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let hit = |field: &str| field.to_lowercase().contains(needle);
    hit(&complaint.id)
        || complaint.citizen_name().is_some_and(hit)
        || complaint.citizen_email().is_some_and(hit)
        || hit(&complaint.title)
        || hit(complaint.category.as_str())
}

/// Derive the visible list from the full list
pub fn project(complaints: &[Complaint], query: &ComplaintQuery) -> Vec<Complaint> {
    let needle = query.search.trim().to_lowercase();

    let mut visible: Vec<Complaint> = complaints
        .iter()
        .filter(|c| query.status.matches(c))
        .filter(|c| query.matches_department(c))
        .filter(|c| matches_search(c, &needle))
        .cloned()
        .collect();

    // sort_by_key is stable: equal timestamps keep list order
    match query.sort {
        SortOrder::Newest => visible.sort_by_key(|c| Reverse(c.created_at)),
        SortOrder::Oldest => visible.sort_by_key(|c| c.created_at),
    }

    if let Some(limit) = query.limit {
        visible.truncate(limit);
    }
    visible
}
