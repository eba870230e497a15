//! Staff account domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{ROLE_ADMIN, ROLE_PLATFORM_ADMIN, ROLE_STAFF};

/// Staff roles enumeration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Cross-tenant administrator managing all organizations
    PlatformAdmin,
    /// Organization administrator
    Admin,
    /// Regular organization staff
    Staff,
}

impl UserRole {
    /// Check if this role has platform-wide privileges
    pub fn is_platform_admin(&self) -> bool {
        matches!(self, UserRole::PlatformAdmin)
    }

    /// Check if this role administers its organization
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::PlatformAdmin | UserRole::Admin)
    }
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            ROLE_PLATFORM_ADMIN => UserRole::PlatformAdmin,
            ROLE_ADMIN => UserRole::Admin,
            _ => UserRole::Staff,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::PlatformAdmin => write!(f, "{}", ROLE_PLATFORM_ADMIN),
            UserRole::Admin => write!(f, "{}", ROLE_ADMIN),
            UserRole::Staff => write!(f, "{}", ROLE_STAFF),
        }
    }
}

/// Staff account domain entity.
///
/// Platform admins carry no organization; every other role is scoped
/// to exactly one tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub role: UserRole,
    pub organization_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft delete timestamp (None = active, Some = deleted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Check if user has platform admin role
    pub fn is_platform_admin(&self) -> bool {
        self.role.is_platform_admin()
    }

    /// Check if user is soft deleted
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// User email address
    #[schema(example = "admin@alnoor.org")]
    pub email: String,
    /// User display name
    #[schema(example = "Fatima Khan")]
    pub name: String,
    /// Staff role
    #[schema(example = "admin")]
    pub role: String,
    /// Organization this account belongs to (absent for platform admins)
    pub organization_id: Option<Uuid>,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role.to_string(),
            organization_id: user.organization_id,
            created_at: user.created_at,
        }
    }
}
