//! Subscription plan domain entity (platform-level billing).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Subscription plan sold to organizations. Prices are integer cents.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubscriptionPlan {
    pub id: Uuid,
    pub name: String,
    pub price_monthly_cents: i64,
    pub price_yearly_cents: i64,
    /// Member cap, None = unlimited
    pub max_members: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Plan creation payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreatePlan {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Community")]
    pub name: String,
    #[validate(range(min = 0, message = "Price cannot be negative"))]
    #[schema(example = 4900)]
    pub price_monthly_cents: i64,
    #[validate(range(min = 0, message = "Price cannot be negative"))]
    #[schema(example = 49900)]
    pub price_yearly_cents: i64,
    #[validate(range(min = 1, message = "Member cap must be positive"))]
    pub max_members: Option<i32>,
}

/// Plan update payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdatePlan {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price_monthly_cents: Option<i64>,
    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price_yearly_cents: Option<i64>,
    #[validate(range(min = 1, message = "Member cap must be positive"))]
    pub max_members: Option<i32>,
}
