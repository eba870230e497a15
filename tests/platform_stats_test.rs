//! Platform statistics fold tests: tenant counts and monthly revenue.

use chrono::Utc;
use uuid::Uuid;

use minbar::domain::{
    monthly_revenue_cents, organization_monthly_cents, BillingCycle, Organization,
    OrganizationStatus, PlatformStatistics, SubscriptionPlan,
};

fn organization(
    status: OrganizationStatus,
    plan_id: Option<Uuid>,
    billing_cycle: Option<BillingCycle>,
) -> Organization {
    Organization {
        id: Uuid::new_v4(),
        name: "Masjid An-Noor".to_string(),
        slug: "masjid-an-noor".to_string(),
        address: None,
        phone: None,
        status,
        plan_id,
        billing_cycle,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        deleted_at: None,
    }
}

fn plan(price_monthly_cents: i64, price_yearly_cents: i64) -> SubscriptionPlan {
    SubscriptionPlan {
        id: Uuid::new_v4(),
        name: "Community".to_string(),
        price_monthly_cents,
        price_yearly_cents,
        max_members: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn monthly_billing_contributes_the_monthly_price() {
    let p = plan(4_900, 49_900);
    let org = organization(
        OrganizationStatus::Active,
        Some(p.id),
        Some(BillingCycle::Monthly),
    );

    assert_eq!(organization_monthly_cents(&org, Some(&p)), 4_900);
}

#[test]
fn yearly_billing_is_amortized_over_twelve_months() {
    let p = plan(4_900, 60_000);
    let org = organization(
        OrganizationStatus::Active,
        Some(p.id),
        Some(BillingCycle::Yearly),
    );

    assert_eq!(organization_monthly_cents(&org, Some(&p)), 5_000);
}

#[test]
fn suspended_tenant_contributes_no_revenue() {
    let p = plan(4_900, 49_900);
    let org = organization(
        OrganizationStatus::Suspended,
        Some(p.id),
        Some(BillingCycle::Monthly),
    );

    assert_eq!(organization_monthly_cents(&org, Some(&p)), 0);
}

#[test]
fn offboarded_tenant_contributes_no_revenue() {
    let p = plan(4_900, 49_900);
    let mut org = organization(
        OrganizationStatus::Active,
        Some(p.id),
        Some(BillingCycle::Monthly),
    );
    org.deleted_at = Some(Utc::now());

    assert_eq!(organization_monthly_cents(&org, Some(&p)), 0);
}

#[test]
fn missing_plan_contributes_nothing() {
    let org = organization(OrganizationStatus::Active, None, None);
    assert_eq!(organization_monthly_cents(&org, None), 0);
}

#[test]
fn missing_billing_cycle_contributes_nothing() {
    let p = plan(4_900, 49_900);
    let org = organization(OrganizationStatus::Active, Some(p.id), None);

    assert_eq!(organization_monthly_cents(&org, Some(&p)), 0);
}

#[test]
fn revenue_sums_across_mixed_billing() {
    let monthly_plan = plan(4_900, 49_900);
    let yearly_plan = plan(9_900, 120_000);

    let organizations = vec![
        (
            organization(
                OrganizationStatus::Active,
                Some(monthly_plan.id),
                Some(BillingCycle::Monthly),
            ),
            Some(monthly_plan),
        ),
        (
            organization(
                OrganizationStatus::Active,
                Some(yearly_plan.id),
                Some(BillingCycle::Yearly),
            ),
            Some(yearly_plan),
        ),
        (organization(OrganizationStatus::Active, None, None), None),
    ];

    // 4900 + 120000 / 12 + 0
    assert_eq!(monthly_revenue_cents(&organizations), 14_900);
}

#[test]
fn statistics_count_tenants_by_status() {
    let p = plan(4_900, 49_900);

    let organizations = vec![
        (
            organization(
                OrganizationStatus::Active,
                Some(p.id),
                Some(BillingCycle::Monthly),
            ),
            Some(p.clone()),
        ),
        (
            organization(
                OrganizationStatus::Suspended,
                Some(p.id),
                Some(BillingCycle::Monthly),
            ),
            Some(p),
        ),
        (organization(OrganizationStatus::Active, None, None), None),
    ];

    let stats = PlatformStatistics::from_organizations(&organizations);
    assert_eq!(stats.total_organizations, 3);
    assert_eq!(stats.active_organizations, 2);
    assert_eq!(stats.suspended_organizations, 1);
    // Only the active paying tenant counts toward revenue
    assert_eq!(stats.monthly_revenue_cents, 4_900);
}

#[test]
fn statistics_for_empty_platform() {
    let stats = PlatformStatistics::from_organizations(&[]);
    assert_eq!(stats.total_organizations, 0);
    assert_eq!(stats.monthly_revenue_cents, 0);
}
