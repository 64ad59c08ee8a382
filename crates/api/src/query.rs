//! Shared query parameter types for API handlers.

use hrm_core::error::CoreError;
use hrm_core::types::{Date, DbId};
use serde::Deserialize;

/// Optional `?status=` filter. The label is parsed by the handler so an
/// unknown value is a 400 rather than an extractor rejection.
#[derive(Debug, Deserialize)]
pub struct StatusFilter {
    pub status: Option<String>,
}

impl StatusFilter {
    /// Parse the label with the given status parser. Absent means no filter.
    pub fn parse_with<T>(
        &self,
        parse: fn(&str) -> Result<T, CoreError>,
    ) -> Result<Option<T>, CoreError> {
        self.status.as_deref().map(parse).transpose()
    }
}

/// `GET /performance-reviews?admin_id=&start_date=`.
///
/// Both must be given together to filter by day; neither lists everything.
#[derive(Debug, Deserialize)]
pub struct ReviewListParams {
    pub admin_id: Option<DbId>,
    pub start_date: Option<Date>,
}

/// `GET /gatherings?admin_id=` or `?employee_id=`.
#[derive(Debug, Deserialize)]
pub struct GatheringParams {
    pub admin_id: Option<DbId>,
    pub employee_id: Option<DbId>,
}
