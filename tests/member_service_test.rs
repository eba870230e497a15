//! Member service unit tests, focused on plan cap enforcement.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use minbar::domain::{
    BillingCycle, CreateMember, Member, MemberStatus, Organization, OrganizationStatus,
    SubscriptionPlan,
};
use minbar::errors::{AppError, AppResult};
use minbar::infra::repositories::{
    CaseRepository, DonationRepository, EducationRepository, EventRepository, MemberRepository,
    MockCaseRepository, MockDonationRepository, MockEducationRepository, MockEventRepository,
    MockMemberRepository, MockOrganizationRepository, MockPlanRepository, MockUserRepository,
    OrganizationRepository, PlanRepository, UserRepository,
};
use minbar::infra::{TransactionContext, UnitOfWork};
use minbar::services::{MemberManager, MemberService};

fn test_organization(id: Uuid, plan_id: Option<Uuid>) -> Organization {
    Organization {
        id,
        name: "Masjid An-Noor".to_string(),
        slug: "masjid-an-noor".to_string(),
        address: None,
        phone: None,
        status: OrganizationStatus::Active,
        plan_id,
        billing_cycle: plan_id.map(|_| BillingCycle::Monthly),
        created_at: Utc::now(),
        updated_at: Utc::now(),
        deleted_at: None,
    }
}

fn test_plan(id: Uuid, max_members: Option<i32>) -> SubscriptionPlan {
    SubscriptionPlan {
        id,
        name: "Community".to_string(),
        price_monthly_cents: 4_900,
        price_yearly_cents: 49_900,
        max_members,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn test_member(organization_id: Uuid) -> Member {
    Member {
        id: Uuid::new_v4(),
        organization_id,
        first_name: "Yusuf".to_string(),
        last_name: "Rahman".to_string(),
        email: None,
        phone: None,
        status: MemberStatus::Active,
        joined_at: Utc::now().date_naive(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn create_payload() -> CreateMember {
    CreateMember {
        first_name: "Yusuf".to_string(),
        last_name: "Rahman".to_string(),
        email: None,
        phone: None,
        joined_at: None,
    }
}

/// Test mock for UnitOfWork that wraps mocked repositories
struct TestUnitOfWork {
    members: Arc<MockMemberRepository>,
    organizations: Arc<MockOrganizationRepository>,
    plans: Arc<MockPlanRepository>,
}

impl TestUnitOfWork {
    fn new(
        members: MockMemberRepository,
        organizations: MockOrganizationRepository,
        plans: MockPlanRepository,
    ) -> Self {
        Self {
            members: Arc::new(members),
            organizations: Arc::new(organizations),
            plans: Arc::new(plans),
        }
    }
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        Arc::new(MockUserRepository::new())
    }

    fn organizations(&self) -> Arc<dyn OrganizationRepository> {
        self.organizations.clone()
    }

    fn members(&self) -> Arc<dyn MemberRepository> {
        self.members.clone()
    }

    fn cases(&self) -> Arc<dyn CaseRepository> {
        Arc::new(MockCaseRepository::new())
    }

    fn donations(&self) -> Arc<dyn DonationRepository> {
        Arc::new(MockDonationRepository::new())
    }

    fn events(&self) -> Arc<dyn EventRepository> {
        Arc::new(MockEventRepository::new())
    }

    fn education(&self) -> Arc<dyn EducationRepository> {
        Arc::new(MockEducationRepository::new())
    }

    fn plans(&self) -> Arc<dyn PlanRepository> {
        self.plans.clone()
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        Err(AppError::internal("Transactions not supported in test mock"))
    }

    async fn transaction_serializable<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        Err(AppError::internal("Transactions not supported in test mock"))
    }
}

#[tokio::test]
async fn test_create_member_without_plan_has_no_cap() {
    let organization_id = Uuid::new_v4();

    let mut organizations = MockOrganizationRepository::new();
    let org = test_organization(organization_id, None);
    organizations
        .expect_find_by_id()
        .returning(move |_| Ok(Some(org.clone())));

    let mut members = MockMemberRepository::new();
    let created = test_member(organization_id);
    members
        .expect_create()
        .returning(move |_, _| Ok(created.clone()));

    let uow = Arc::new(TestUnitOfWork::new(
        members,
        organizations,
        MockPlanRepository::new(),
    ));
    let service = MemberManager::new(uow);

    let result = service.create_member(organization_id, create_payload()).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_create_member_under_cap_succeeds() {
    let organization_id = Uuid::new_v4();
    let plan_id = Uuid::new_v4();

    let mut organizations = MockOrganizationRepository::new();
    let org = test_organization(organization_id, Some(plan_id));
    organizations
        .expect_find_by_id()
        .returning(move |_| Ok(Some(org.clone())));

    let mut plans = MockPlanRepository::new();
    let plan = test_plan(plan_id, Some(50));
    plans
        .expect_find_by_id()
        .returning(move |_| Ok(Some(plan.clone())));

    let mut members = MockMemberRepository::new();
    members.expect_count().returning(|_| Ok(49));
    let created = test_member(organization_id);
    members
        .expect_create()
        .returning(move |_, _| Ok(created.clone()));

    let uow = Arc::new(TestUnitOfWork::new(members, organizations, plans));
    let service = MemberManager::new(uow);

    let result = service.create_member(organization_id, create_payload()).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_create_member_at_cap_is_rejected() {
    let organization_id = Uuid::new_v4();
    let plan_id = Uuid::new_v4();

    let mut organizations = MockOrganizationRepository::new();
    let org = test_organization(organization_id, Some(plan_id));
    organizations
        .expect_find_by_id()
        .returning(move |_| Ok(Some(org.clone())));

    let mut plans = MockPlanRepository::new();
    let plan = test_plan(plan_id, Some(50));
    plans
        .expect_find_by_id()
        .returning(move |_| Ok(Some(plan.clone())));

    let mut members = MockMemberRepository::new();
    members.expect_count().returning(|_| Ok(50));
    // create must never be reached once the cap is hit
    members.expect_create().never();

    let uow = Arc::new(TestUnitOfWork::new(members, organizations, plans));
    let service = MemberManager::new(uow);

    let result = service.create_member(organization_id, create_payload()).await;
    assert!(matches!(result, Err(AppError::LimitReached(_))));
}

#[tokio::test]
async fn test_create_member_with_unlimited_plan_skips_count() {
    let organization_id = Uuid::new_v4();
    let plan_id = Uuid::new_v4();

    let mut organizations = MockOrganizationRepository::new();
    let org = test_organization(organization_id, Some(plan_id));
    organizations
        .expect_find_by_id()
        .returning(move |_| Ok(Some(org.clone())));

    let mut plans = MockPlanRepository::new();
    let plan = test_plan(plan_id, None);
    plans
        .expect_find_by_id()
        .returning(move |_| Ok(Some(plan.clone())));

    let mut members = MockMemberRepository::new();
    members.expect_count().never();
    let created = test_member(organization_id);
    members
        .expect_create()
        .returning(move |_, _| Ok(created.clone()));

    let uow = Arc::new(TestUnitOfWork::new(members, organizations, plans));
    let service = MemberManager::new(uow);

    let result = service.create_member(organization_id, create_payload()).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_get_member_not_found() {
    let mut members = MockMemberRepository::new();
    members.expect_find_by_id().returning(|_, _| Ok(None));

    let uow = Arc::new(TestUnitOfWork::new(
        members,
        MockOrganizationRepository::new(),
        MockPlanRepository::new(),
    ));
    let service = MemberManager::new(uow);

    let result = service.get_member(Uuid::new_v4(), Uuid::new_v4()).await;
    assert!(matches!(result, Err(AppError::NotFound)));
}
