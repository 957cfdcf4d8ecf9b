use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, MIN_PAGE_SIZE};

/// Folded form of a country or admin1 name used for every comparison
///
/// Stored alongside the display value and used as the risk score cache key,
/// so the datastore and the cache agree on which names are equal. Folds the
/// full Unicode range, unlike SQLite's `lower()`.
pub fn match_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// One row per (country, admin1 region)
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ConflictRecord {
    pub id: i64,
    pub country: String,
    pub admin1: String,
    pub population: Option<i64>,
    pub events: i64,
    pub risk_score: i64,
    #[serde(skip_serializing)]
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub updated_at: DateTime<Utc>,
}

/// Values for inserting a conflict row
#[derive(Debug, Clone)]
pub struct NewConflictRecord {
    pub country: String,
    pub admin1: String,
    pub population: Option<i64>,
    pub events: i64,
    pub risk_score: i64,
}

/// Candidate returned when a region name matches more than one row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct RegionCandidate {
    pub id: i64,
    pub country: String,
    pub admin1: String,
}

impl From<&ConflictRecord> for RegionCandidate {
    fn from(record: &ConflictRecord) -> Self {
        Self {
            id: record.id,
            country: record.country.clone(),
            admin1: record.admin1.clone(),
        }
    }
}

/// Validated offset/page-size pair for the paginated listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub offset: i64,
    pub page_size: i64,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            offset: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageParams {
    /// Build page parameters, rejecting a negative offset or a page size
    /// outside `[MIN_PAGE_SIZE, MAX_PAGE_SIZE]`.
    pub fn new(offset: i64, page_size: i64) -> Result<Self, String> {
        if offset < 0 {
            return Err("offset must be greater than or equal to 0".to_string());
        }
        if !(MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(format!(
                "page_size must be between {} and {}",
                MIN_PAGE_SIZE, MAX_PAGE_SIZE
            ));
        }
        Ok(Self { offset, page_size })
    }

    /// An offset at or past the end of the matching rows is out of range,
    /// including when nothing matches at all.
    pub fn in_range(&self, total_count: i64) -> bool {
        self.offset < total_count
    }

    /// `ceil(total_count / page_size)`
    pub fn total_pages(&self, total_count: i64) -> i64 {
        if total_count <= 0 {
            return 0;
        }
        (total_count + self.page_size - 1) / self.page_size
    }
}
