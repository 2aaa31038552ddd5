//! Aggregate figures over loaded collections.
//!
//! These are pure functions over records the caller already holds; none of
//! them touch the store.

use serde::Serialize;

use crate::model::{
    Analytics, Contact, Expense, Gig, GigStatus, Income, Metric, Record, Release, ReleaseStage,
    Task, TaskCategory, TaskPriority, TaskStatus, Track, TrackStage,
};

/// Booking totals for the gig tracker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GigSummary {
    pub total: usize,
    /// Sum of pay over completed gigs.
    pub earned: f64,
    pub confirmed: usize,
    pub pending: usize,
    /// Confirmed or pending.
    pub upcoming: usize,
}

impl GigSummary {
    #[must_use]
    pub fn from_records(gigs: &[Record<Gig>]) -> Self {
        gigs.iter().map(|r| &r.fields).fold(
            Self {
                total: gigs.len(),
                ..Self::default()
            },
            |mut acc, gig| {
                match gig.status {
                    GigStatus::Completed => acc.earned += gig.pay.unwrap_or(0.0),
                    GigStatus::Confirmed => acc.confirmed += 1,
                    GigStatus::Pending => acc.pending += 1,
                    GigStatus::Cancelled => {}
                }
                if gig.is_upcoming() {
                    acc.upcoming += 1;
                }
                acc
            },
        )
    }
}

/// Counts for the task board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskSummary {
    /// Anything not done yet, blocked included.
    pub pending: usize,
    pub done: usize,
    /// Urgent and not done.
    pub urgent: usize,
}

impl TaskSummary {
    #[must_use]
    pub fn from_records(tasks: &[Record<Task>]) -> Self {
        let mut summary = Self::default();
        for task in tasks.iter().map(|r| &r.fields) {
            if task.is_done() {
                summary.done += 1;
            } else {
                summary.pending += 1;
                if task.priority == TaskPriority::Urgent {
                    summary.urgent += 1;
                }
            }
        }
        summary
    }
}

/// Release planner totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ReleaseSummary {
    pub released: usize,
    /// Neither at concept nor released.
    pub in_progress: usize,
    pub total_budget: f64,
}

impl ReleaseSummary {
    #[must_use]
    pub fn from_records(releases: &[Record<Release>]) -> Self {
        let mut summary = Self::default();
        for release in releases.iter().map(|r| &r.fields) {
            if release.stage == ReleaseStage::Released {
                summary.released += 1;
            }
            if release.is_in_progress() {
                summary.in_progress += 1;
            }
            summary.total_budget += release.budget.unwrap_or(0.0);
        }
        summary
    }
}

/// Catalog totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub tracks: usize,
    pub released: usize,
    pub total_streams: u64,
}

impl CatalogSummary {
    #[must_use]
    pub fn from_records(tracks: &[Record<Track>]) -> Self {
        Self {
            tracks: tracks.len(),
            released: tracks
                .iter()
                .filter(|r| r.fields.stage == TrackStage::Released)
                .count(),
            total_streams: tracks.iter().filter_map(|r| r.fields.streams).sum(),
        }
    }
}

/// Income versus expenses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LedgerSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net: f64,
}

impl LedgerSummary {
    #[must_use]
    pub fn from_records(income: &[Record<Income>], expenses: &[Record<Expense>]) -> Self {
        let total_income: f64 = income.iter().map(|r| r.fields.amount).sum();
        let total_expenses: f64 = expenses.iter().map(|r| r.fields.amount).sum();
        Self {
            total_income,
            total_expenses,
            net: total_income - total_expenses,
        }
    }
}

/// Whole-percent change of `metric` from `previous` to `latest`.
///
/// `None` when there is no previous month or its value is zero.
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn analytics_delta(
    latest: &Analytics,
    previous: Option<&Analytics>,
    metric: Metric,
) -> Option<i64> {
    let before = previous?.metric(metric);
    if before.abs() < f64::EPSILON {
        return None;
    }
    let now = latest.metric(metric);
    // Halves round up, so -12.5 becomes -12.
    Some(((((now - before) / before) * 100.0) + 0.5).floor() as i64)
}

/// Case-insensitive contact search over name, role and company.
///
/// A blank needle matches everything.
#[must_use]
pub fn search_contacts<'a>(contacts: &'a [Record<Contact>], needle: &str) -> Vec<&'a Record<Contact>> {
    let needle = needle.trim().to_lowercase();
    contacts
        .iter()
        .filter(|record| {
            if needle.is_empty() {
                return true;
            }
            let contact = &record.fields;
            contact.name.to_lowercase().contains(&needle)
                || contact.role.label().to_lowercase().contains(&needle)
                || contact
                    .company
                    .as_deref()
                    .is_some_and(|company| company.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Task board filter: everything, one status column, or one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskFilter {
    All,
    Status(TaskStatus),
    Category(TaskCategory),
}

impl TaskFilter {
    /// Reads a board filter label: `All`, a status, or a category.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        if label.trim().eq_ignore_ascii_case("all") {
            return Some(Self::All);
        }
        if let Ok(status) = label.parse() {
            return Some(Self::Status(status));
        }
        label.parse().ok().map(Self::Category)
    }

    #[must_use]
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Status(status) => task.status == status,
            Self::Category(category) => task.category == category,
        }
    }
}

#[must_use]
pub fn filter_tasks(tasks: &[Record<Task>], filter: TaskFilter) -> Vec<&Record<Task>> {
    tasks.iter().filter(|r| filter.matches(&r.fields)).collect()
}
