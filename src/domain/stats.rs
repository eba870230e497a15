//! Aggregate statistics computed as folds over fetched rows.
//!
//! Both aggregations here are pure functions so they can be tested
//! without a database: case statistics for a tenant, and platform-wide
//! monthly recurring revenue.

use serde::Serialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

use super::organization::{BillingCycle, Organization};
use super::plan::SubscriptionPlan;
use super::service_case::{CasePriority, CaseStatus, ServiceCase};
use crate::config::MONTHS_PER_YEAR;

/// Per-status case counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct StatusCounts {
    pub open: u64,
    pub in_progress: u64,
    pub resolved: u64,
    pub closed: u64,
}

/// Per-priority case counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct PriorityCounts {
    pub low: u64,
    pub medium: u64,
    pub high: u64,
    pub urgent: u64,
}

/// Aggregated case statistics for one organization
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CaseStatistics {
    pub total: u64,
    pub by_status: StatusCounts,
    pub by_priority: PriorityCounts,
    /// Counts keyed by category name
    pub by_category: BTreeMap<String, u64>,
    pub amount_requested_cents: i64,
    pub amount_approved_cents: i64,
    /// Average days from opening to resolution over resolved cases;
    /// None when no case has been resolved
    pub avg_resolution_days: Option<f64>,
}

impl CaseStatistics {
    /// Fold a list of cases into aggregate counts and sums
    pub fn from_cases(cases: &[ServiceCase]) -> Self {
        let mut by_status = StatusCounts::default();
        let mut by_priority = PriorityCounts::default();
        let mut by_category = BTreeMap::new();
        let mut amount_requested_cents = 0i64;
        let mut amount_approved_cents = 0i64;
        let mut resolution_days_sum = 0f64;
        let mut resolved_with_dates = 0u64;

        for case in cases {
            match case.status {
                CaseStatus::Open => by_status.open += 1,
                CaseStatus::InProgress => by_status.in_progress += 1,
                CaseStatus::Resolved => by_status.resolved += 1,
                CaseStatus::Closed => by_status.closed += 1,
            }

            match case.priority {
                CasePriority::Low => by_priority.low += 1,
                CasePriority::Medium => by_priority.medium += 1,
                CasePriority::High => by_priority.high += 1,
                CasePriority::Urgent => by_priority.urgent += 1,
            }

            *by_category.entry(case.category.to_string()).or_insert(0) += 1;

            amount_requested_cents += case.amount_requested_cents.unwrap_or(0);
            amount_approved_cents += case.amount_approved_cents.unwrap_or(0);

            if let Some(days) = case.resolution_days() {
                resolution_days_sum += days;
                resolved_with_dates += 1;
            }
        }

        let avg_resolution_days = if resolved_with_dates > 0 {
            Some(resolution_days_sum / resolved_with_dates as f64)
        } else {
            None
        };

        Self {
            total: cases.len() as u64,
            by_status,
            by_priority,
            by_category,
            amount_requested_cents,
            amount_approved_cents,
            avg_resolution_days,
        }
    }
}

/// Monthly revenue contribution of one organization.
///
/// Monthly-billed plans contribute their monthly price, yearly-billed
/// plans contribute the yearly price amortized over twelve months
/// (integer cents division). Organizations without an assigned plan or
/// billing cycle contribute nothing, and only active organizations
/// count toward recurring revenue.
pub fn organization_monthly_cents(
    organization: &Organization,
    plan: Option<&SubscriptionPlan>,
) -> i64 {
    if !organization.is_active() {
        return 0;
    }

    match (plan, organization.billing_cycle) {
        (Some(plan), Some(BillingCycle::Monthly)) => plan.price_monthly_cents,
        (Some(plan), Some(BillingCycle::Yearly)) => plan.price_yearly_cents / MONTHS_PER_YEAR,
        _ => 0,
    }
}

/// Sum monthly recurring revenue across organizations
pub fn monthly_revenue_cents(organizations: &[(Organization, Option<SubscriptionPlan>)]) -> i64 {
    organizations
        .iter()
        .map(|(org, plan)| organization_monthly_cents(org, plan.as_ref()))
        .sum()
}

/// Platform-wide tenant and revenue statistics
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PlatformStatistics {
    pub total_organizations: u64,
    pub active_organizations: u64,
    pub suspended_organizations: u64,
    pub monthly_revenue_cents: i64,
}

impl PlatformStatistics {
    /// Fold organizations (with their plans) into platform totals.
    ///
    /// Only non-offboarded tenants are expected as input; suspended
    /// tenants are counted but contribute no recurring revenue.
    pub fn from_organizations(
        organizations: &[(Organization, Option<SubscriptionPlan>)],
    ) -> Self {
        use super::organization::OrganizationStatus;

        let mut active = 0u64;
        let mut suspended = 0u64;
        for (org, _) in organizations {
            match org.status {
                OrganizationStatus::Active => active += 1,
                OrganizationStatus::Suspended => suspended += 1,
            }
        }

        Self {
            total_organizations: organizations.len() as u64,
            active_organizations: active,
            suspended_organizations: suspended,
            monthly_revenue_cents: monthly_revenue_cents(organizations),
        }
    }
}
