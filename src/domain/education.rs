//! Education domain entities: classes and enrollments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A recurring class offered by an organization
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Class {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub teacher_name: Option<String>,
    /// Free-form schedule description ("Saturdays 10:00-12:00")
    pub schedule: Option<String>,
    pub capacity: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A member's enrollment in a class, unique per (class, member)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Enrollment {
    pub id: Uuid,
    pub class_id: Uuid,
    pub member_id: Uuid,
    pub enrolled_at: DateTime<Utc>,
}

/// Class creation payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateClass {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Weekend Quran school")]
    pub name: String,
    #[schema(example = "Ustadh Kareem")]
    pub teacher_name: Option<String>,
    #[schema(example = "Saturdays 10:00-12:00")]
    pub schedule: Option<String>,
    #[validate(range(min = 1, message = "Capacity must be positive"))]
    pub capacity: Option<i32>,
}

/// Class update payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateClass {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    pub teacher_name: Option<String>,
    pub schedule: Option<String>,
    #[validate(range(min = 1, message = "Capacity must be positive"))]
    pub capacity: Option<i32>,
}

/// Enrollment request payload
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct EnrollRequest {
    pub member_id: Uuid,
}
