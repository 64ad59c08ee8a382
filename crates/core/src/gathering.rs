//! Gatherings: performance reviews and meetings merged into one
//! time-ordered list for calendar display.

use std::cmp::Ordering;

use serde::Serialize;

use crate::types::{DbId, Timestamp};

/// Which table a gathering came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GatheringKind {
    PerformanceReview,
    Meeting,
}

/// A single calendar entry.
#[derive(Debug, Clone, Serialize)]
pub struct Gathering {
    pub kind: GatheringKind,
    pub id: DbId,
    pub title: String,
    pub admin_id: Option<DbId>,
    pub admin_name: Option<String>,
    pub employee_id: DbId,
    pub employee_name: String,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    pub location: Option<String>,
    pub is_online: bool,
    pub meeting_link: Option<String>,
    pub status: String,
}

/// Sort by start time ascending with unscheduled entries last. Ties break
/// on kind, then id, so the order is stable across calls.
pub fn sort_gatherings(items: &mut [Gathering]) {
    items.sort_by(|a, b| {
        let by_time = match (a.start_time, b.start_time) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_time.then(a.kind.cmp(&b.kind)).then(a.id.cmp(&b.id))
    });
}
