//! Service case domain entity: a tracked assistance request tied to a member.
//!
//! Case numbers follow the `CASE-<year>-NNNN` format and are unique per
//! organization. Allocation is serialized at the persistence layer; the
//! pure formatting/parsing logic lives here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::config::{CASE_NUMBER_PREFIX, CASE_NUMBER_WIDTH};

/// Case workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl CaseStatus {
    /// Whether this status ends the active lifecycle of a case
    pub fn is_terminal(&self) -> bool {
        matches!(self, CaseStatus::Resolved | CaseStatus::Closed)
    }
}

impl From<&str> for CaseStatus {
    fn from(s: &str) -> Self {
        match s {
            "in_progress" => CaseStatus::InProgress,
            "resolved" => CaseStatus::Resolved,
            "closed" => CaseStatus::Closed,
            _ => CaseStatus::Open,
        }
    }
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaseStatus::Open => write!(f, "open"),
            CaseStatus::InProgress => write!(f, "in_progress"),
            CaseStatus::Resolved => write!(f, "resolved"),
            CaseStatus::Closed => write!(f, "closed"),
        }
    }
}

/// Case priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CasePriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl From<&str> for CasePriority {
    fn from(s: &str) -> Self {
        match s {
            "low" => CasePriority::Low,
            "high" => CasePriority::High,
            "urgent" => CasePriority::Urgent,
            _ => CasePriority::Medium,
        }
    }
}

impl std::fmt::Display for CasePriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CasePriority::Low => write!(f, "low"),
            CasePriority::Medium => write!(f, "medium"),
            CasePriority::High => write!(f, "high"),
            CasePriority::Urgent => write!(f, "urgent"),
        }
    }
}

/// Kind of assistance requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CaseCategory {
    Financial,
    Food,
    Housing,
    Counseling,
    Other,
}

impl From<&str> for CaseCategory {
    fn from(s: &str) -> Self {
        match s {
            "financial" => CaseCategory::Financial,
            "food" => CaseCategory::Food,
            "housing" => CaseCategory::Housing,
            "counseling" => CaseCategory::Counseling,
            _ => CaseCategory::Other,
        }
    }
}

impl std::fmt::Display for CaseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaseCategory::Financial => write!(f, "financial"),
            CaseCategory::Food => write!(f, "food"),
            CaseCategory::Housing => write!(f, "housing"),
            CaseCategory::Counseling => write!(f, "counseling"),
            CaseCategory::Other => write!(f, "other"),
        }
    }
}

/// Service case domain entity
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceCase {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub member_id: Uuid,
    /// Generated number, unique per organization (`CASE-2024-0001`)
    #[schema(example = "CASE-2024-0001")]
    pub case_number: String,
    pub title: String,
    pub description: Option<String>,
    pub category: CaseCategory,
    pub status: CaseStatus,
    pub priority: CasePriority,
    pub amount_requested_cents: Option<i64>,
    pub amount_approved_cents: Option<i64>,
    pub opened_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ServiceCase {
    /// Days between opening and resolution, if resolved
    pub fn resolution_days(&self) -> Option<f64> {
        self.resolved_at
            .map(|resolved| (resolved - self.opened_at).num_seconds() as f64 / 86_400.0)
    }
}

/// Prefix shared by all case numbers of a given year (`CASE-2024-`)
pub fn case_number_prefix(year: i32) -> String {
    format!("{}-{}-", CASE_NUMBER_PREFIX, year)
}

/// Format a case number from its year and sequence
pub fn format_case_number(year: i32, sequence: u32) -> String {
    format!(
        "{}-{}-{:0width$}",
        CASE_NUMBER_PREFIX,
        year,
        sequence,
        width = CASE_NUMBER_WIDTH
    )
}

/// Parse the numeric sequence out of a case number for the given year.
///
/// Returns None for numbers from other years or malformed input.
pub fn parse_case_sequence(case_number: &str, year: i32) -> Option<u32> {
    case_number
        .strip_prefix(&case_number_prefix(year))
        .and_then(|suffix| suffix.parse::<u32>().ok())
}

/// Compute the next case number given the greatest existing number of the
/// year (or None when the year has no cases yet).
pub fn next_case_number(latest: Option<&str>, year: i32) -> String {
    let next_sequence = latest
        .and_then(|n| parse_case_sequence(n, year))
        .map_or(1, |seq| seq + 1);
    format_case_number(year, next_sequence)
}

/// Resolution timestamp after a status change.
///
/// Entering a terminal status stamps the time once; moving between
/// terminal statuses keeps the original timestamp so resolution
/// statistics stay stable. Reopening clears it.
pub fn resolution_timestamp(
    current: Option<DateTime<Utc>>,
    status: CaseStatus,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    if status.is_terminal() {
        current.or(Some(now))
    } else {
        None
    }
}

/// Case creation payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCase {
    pub member_id: Uuid,
    #[validate(length(min = 1, message = "Title is required"))]
    #[schema(example = "Rent assistance request")]
    pub title: String,
    pub description: Option<String>,
    pub category: CaseCategory,
    pub priority: Option<CasePriority>,
    #[validate(range(min = 0, message = "Amount cannot be negative"))]
    pub amount_requested_cents: Option<i64>,
}

/// Case update payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCase {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<CaseCategory>,
    pub priority: Option<CasePriority>,
    #[validate(range(min = 0, message = "Amount cannot be negative"))]
    pub amount_requested_cents: Option<i64>,
    #[validate(range(min = 0, message = "Amount cannot be negative"))]
    pub amount_approved_cents: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_number_of_a_year() {
        assert_eq!(next_case_number(None, 2024), "CASE-2024-0001");
    }

    #[test]
    fn increments_existing_number() {
        assert_eq!(
            next_case_number(Some("CASE-2024-0042"), 2024),
            "CASE-2024-0043"
        );
    }

    #[test]
    fn ignores_numbers_from_other_years() {
        assert_eq!(
            next_case_number(Some("CASE-2023-0099"), 2024),
            "CASE-2024-0001"
        );
    }

    #[test]
    fn grows_past_the_padded_width() {
        assert_eq!(
            next_case_number(Some("CASE-2024-9999"), 2024),
            "CASE-2024-10000"
        );
    }

    #[test]
    fn parse_rejects_malformed_numbers() {
        assert_eq!(parse_case_sequence("CASE-2024-00x1", 2024), None);
        assert_eq!(parse_case_sequence("TICKET-2024-0001", 2024), None);
    }

    #[test]
    fn resolving_stamps_the_timestamp_once() {
        let now = Utc::now();
        assert_eq!(
            resolution_timestamp(None, CaseStatus::Resolved, now),
            Some(now)
        );
    }

    #[test]
    fn terminal_transitions_keep_the_original_timestamp() {
        let resolved = Utc::now() - chrono::Duration::days(3);
        let now = Utc::now();
        assert_eq!(
            resolution_timestamp(Some(resolved), CaseStatus::Closed, now),
            Some(resolved)
        );
    }

    #[test]
    fn reopening_clears_the_timestamp() {
        let resolved = Utc::now() - chrono::Duration::days(3);
        let now = Utc::now();
        assert_eq!(
            resolution_timestamp(Some(resolved), CaseStatus::InProgress, now),
            None
        );
    }
}
