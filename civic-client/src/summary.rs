//! KPI counts derived from a complaint list

use std::collections::BTreeMap;

use shared::models::{Complaint, ComplaintStatus, UNASSIGNED_DEPARTMENT};
use shared::response::{CitizenSummary, DepartmentComplaintCount};

/// Status counts shown on the dashboard cards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub resolved: usize,
}

impl Summary {
    pub fn count(&self, status: ComplaintStatus) -> usize {
        match status {
            ComplaintStatus::Pending => self.pending,
            ComplaintStatus::InProgress => self.in_progress,
            ComplaintStatus::Resolved => self.resolved,
        }
    }
}

impl From<CitizenSummary> for Summary {
    /// The citizen endpoint does not report in-progress complaints; they are
    /// whatever is left of the total.
    fn from(s: CitizenSummary) -> Self {
        Self {
            total: s.total_complaints,
            pending: s.pending,
            in_progress: s
                .total_complaints
                .saturating_sub(s.pending)
                .saturating_sub(s.resolved),
            resolved: s.resolved,
        }
    }
}

pub fn summarize(complaints: &[Complaint]) -> Summary {
    complaints.iter().fold(
        Summary {
            total: complaints.len(),
            ..Summary::default()
        },
        |mut acc, c| {
            match c.status {
                ComplaintStatus::Pending => acc.pending += 1,
                ComplaintStatus::InProgress => acc.in_progress += 1,
                ComplaintStatus::Resolved => acc.resolved += 1,
            }
            acc
        },
    )
}

/// Complaint count per department display name.
///
/// Only departments that appear in the list get an entry. Complaints with no
/// department, or with an unpopulated reference, are counted under
/// [`UNASSIGNED_DEPARTMENT`], so the counts always add up to the list length.
pub fn summarize_by_department(complaints: &[Complaint]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for complaint in complaints {
        *counts
            .entry(complaint.department_label().to_string())
            .or_insert(0) += 1;
    }
    counts
}

/// Same counts in the shape the reports chart consumes
pub fn department_chart(complaints: &[Complaint]) -> Vec<DepartmentComplaintCount> {
    summarize_by_department(complaints)
        .into_iter()
        .map(|(name, complaints)| DepartmentComplaintCount { name, complaints })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::complaint;
    use shared::models::DepartmentRef;

    #[test]
    fn test_counts_add_up_to_total() {
        let list = vec![
            complaint("a", ComplaintStatus::Pending, 1),
            complaint("b", ComplaintStatus::Pending, 2),
            complaint("c", ComplaintStatus::InProgress, 3),
            complaint("d", ComplaintStatus::Resolved, 4),
        ];
        let s = summarize(&list);
        assert_eq!(s.total, list.len());
        assert_eq!(s.pending + s.in_progress + s.resolved, s.total);
        assert_eq!(s.count(ComplaintStatus::Pending), 2);
        assert_eq!(s.count(ComplaintStatus::Resolved), 1);
    }

    #[test]
    fn test_empty_list_is_all_zero() {
        assert_eq!(summarize(&[]), Summary::default());
        assert!(summarize_by_department(&[]).is_empty());
    }

    #[test]
    fn test_by_department_groups_unassigned_as_na() {
        let mut unassigned = complaint("a", ComplaintStatus::Pending, 1);
        unassigned.department = None;
        let mut power = complaint("b", ComplaintStatus::Pending, 2);
        power.department = Some(DepartmentRef::new("d2", "Power Board"));
        let mut bare = complaint("c", ComplaintStatus::Pending, 3);
        bare.department = Some(DepartmentRef {
            id: "d9".into(),
            name: None,
        });
        let water = complaint("d", ComplaintStatus::Resolved, 4);

        let list = [unassigned, power, bare, water.clone(), water];
        let counts = summarize_by_department(&list);
        assert_eq!(counts.len(), 3);
        assert_eq!(counts["Water Works"], 2);
        assert_eq!(counts["Power Board"], 1);
        assert_eq!(counts[UNASSIGNED_DEPARTMENT], 2);
        assert_eq!(counts.values().sum::<usize>(), summarize(&list).total);

        let chart = department_chart(&list);
        assert_eq!(chart[0].name, "N/A");
        assert_eq!(chart.iter().map(|row| row.complaints).sum::<usize>(), list.len());
    }

    #[test]
    fn test_from_citizen_summary_derives_in_progress() {
        let s = Summary::from(CitizenSummary {
            total_complaints: 5,
            pending: 2,
            resolved: 1,
        });
        assert_eq!(s.in_progress, 2);
        assert_eq!(s.total, 5);
    }
}
