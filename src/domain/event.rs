//! Event and RSVP domain entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A member's attendance response to an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RsvpStatus {
    Going,
    Maybe,
    Declined,
}

impl From<&str> for RsvpStatus {
    fn from(s: &str) -> Self {
        match s {
            "going" => RsvpStatus::Going,
            "declined" => RsvpStatus::Declined,
            _ => RsvpStatus::Maybe,
        }
    }
}

impl std::fmt::Display for RsvpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RsvpStatus::Going => write!(f, "going"),
            RsvpStatus::Maybe => write!(f, "maybe"),
            RsvpStatus::Declined => write!(f, "declined"),
        }
    }
}

/// Event domain entity
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Event {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub capacity: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// RSVP domain entity, unique per (event, member)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventRsvp {
    pub id: Uuid,
    pub event_id: Uuid,
    pub member_id: Uuid,
    pub status: RsvpStatus,
    pub responded_at: DateTime<Utc>,
}

/// Event creation payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateEvent {
    #[validate(length(min = 1, message = "Title is required"))]
    #[schema(example = "Eid al-Fitr dinner")]
    pub title: String,
    pub description: Option<String>,
    #[schema(example = "Main hall")]
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    #[validate(range(min = 1, message = "Capacity must be positive"))]
    pub capacity: Option<i32>,
}

/// Event update payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateEvent {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    #[validate(range(min = 1, message = "Capacity must be positive"))]
    pub capacity: Option<i32>,
}

/// RSVP request payload
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RsvpRequest {
    pub member_id: Uuid,
    pub status: RsvpStatus,
}

/// Per-status attendance counts for an event
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct RsvpCounts {
    pub going: u64,
    pub maybe: u64,
    pub declined: u64,
}

impl RsvpCounts {
    /// Fold RSVPs into per-status counts
    pub fn from_rsvps(rsvps: &[EventRsvp]) -> Self {
        let mut counts = Self::default();
        for rsvp in rsvps {
            match rsvp.status {
                RsvpStatus::Going => counts.going += 1,
                RsvpStatus::Maybe => counts.maybe += 1,
                RsvpStatus::Declined => counts.declined += 1,
            }
        }
        counts
    }
}

/// RSVP listing with aggregate counts
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RsvpListing {
    pub counts: RsvpCounts,
    pub rsvps: Vec<EventRsvp>,
}
