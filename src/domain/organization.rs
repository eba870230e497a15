//! Organization (tenant) domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle status of a tenant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrganizationStatus {
    Active,
    Suspended,
}

impl From<&str> for OrganizationStatus {
    fn from(s: &str) -> Self {
        match s {
            "suspended" => OrganizationStatus::Suspended,
            _ => OrganizationStatus::Active,
        }
    }
}

impl std::fmt::Display for OrganizationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrganizationStatus::Active => write!(f, "active"),
            OrganizationStatus::Suspended => write!(f, "suspended"),
        }
    }
}

/// Billing cycle for a tenant's subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BillingCycle {
    Monthly,
    Yearly,
}

impl From<&str> for BillingCycle {
    fn from(s: &str) -> Self {
        match s {
            "yearly" => BillingCycle::Yearly,
            _ => BillingCycle::Monthly,
        }
    }
}

impl std::fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BillingCycle::Monthly => write!(f, "monthly"),
            BillingCycle::Yearly => write!(f, "yearly"),
        }
    }
}

/// Organization domain entity: a community institution, the unit of
/// data isolation. Soft delete marks an offboarded tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub status: OrganizationStatus,
    pub plan_id: Option<Uuid>,
    pub billing_cycle: Option<BillingCycle>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Organization {
    /// Check if tenant is active (not suspended, not offboarded)
    pub fn is_active(&self) -> bool {
        self.status == OrganizationStatus::Active && self.deleted_at.is_none()
    }
}

/// Derive a URL-safe slug from an organization name.
///
/// Lowercases, maps runs of non-alphanumeric characters to single
/// hyphens, and trims leading/trailing hyphens.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_hyphen = true;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_hyphen = false;
        } else if !last_hyphen {
            slug.push('-');
            last_hyphen = true;
        }
    }
    slug.trim_end_matches('-').to_string()
}

/// Organization update payload (tenant-facing profile fields)
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateOrganization {
    #[schema(example = "Masjid Al-Noor")]
    pub name: Option<String>,
    #[schema(example = "42 Crescent Road")]
    pub address: Option<String>,
    #[schema(example = "+1-555-0142")]
    pub phone: Option<String>,
}

/// Organization response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrganizationResponse {
    pub id: Uuid,
    #[schema(example = "Masjid Al-Noor")]
    pub name: String,
    #[schema(example = "masjid-al-noor")]
    pub slug: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub status: OrganizationStatus,
    pub plan_id: Option<Uuid>,
    pub billing_cycle: Option<BillingCycle>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<Organization> for OrganizationResponse {
    fn from(org: Organization) -> Self {
        Self {
            id: org.id,
            name: org.name,
            slug: org.slug,
            address: org.address,
            phone: org.phone,
            status: org.status,
            plan_id: org.plan_id,
            billing_cycle: org.billing_cycle,
            created_at: org.created_at,
            deleted_at: org.deleted_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_punctuation() {
        assert_eq!(slugify("Masjid Al-Noor"), "masjid-al-noor");
        assert_eq!(slugify("  Dar us-Salaam!! "), "dar-us-salaam");
    }
}
