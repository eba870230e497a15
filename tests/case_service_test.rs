//! Case service unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use minbar::domain::{
    CaseCategory, CasePriority, CaseStatus, CreateCase, Member, MemberStatus, ServiceCase,
};
use minbar::errors::{AppError, AppResult};
use minbar::infra::repositories::{
    CaseRepository, DonationRepository, EducationRepository, EventRepository, MemberRepository,
    MockCaseRepository, MockDonationRepository, MockEducationRepository, MockEventRepository,
    MockMemberRepository, MockOrganizationRepository, MockPlanRepository, MockUserRepository,
    OrganizationRepository, PlanRepository, UserRepository,
};
use minbar::infra::{TransactionContext, UnitOfWork};
use minbar::services::{CaseManager, CaseService};

fn test_member(organization_id: Uuid, id: Uuid) -> Member {
    Member {
        id,
        organization_id,
        first_name: "Yusuf".to_string(),
        last_name: "Rahman".to_string(),
        email: Some("yusuf@example.com".to_string()),
        phone: None,
        status: MemberStatus::Active,
        joined_at: Utc::now().date_naive(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn test_case(organization_id: Uuid, number: &str) -> ServiceCase {
    let now = Utc::now();
    ServiceCase {
        id: Uuid::new_v4(),
        organization_id,
        member_id: Uuid::new_v4(),
        case_number: number.to_string(),
        title: "Rent assistance".to_string(),
        description: None,
        category: CaseCategory::Financial,
        status: CaseStatus::Open,
        priority: CasePriority::Medium,
        amount_requested_cents: None,
        amount_approved_cents: None,
        opened_at: now,
        resolved_at: None,
        created_at: now,
        updated_at: now,
    }
}

/// Test mock for UnitOfWork that wraps mocked repositories
struct TestUnitOfWork {
    members: Arc<MockMemberRepository>,
    cases: Arc<MockCaseRepository>,
    txn_error: fn() -> AppError,
}

impl TestUnitOfWork {
    fn new(members: MockMemberRepository, cases: MockCaseRepository) -> Self {
        Self::with_txn_error(members, cases, || {
            AppError::internal("Transactions not supported in test mock")
        })
    }

    /// Every transaction attempt fails with the given error, standing in
    /// for a database that keeps rejecting the allocation.
    fn with_txn_error(
        members: MockMemberRepository,
        cases: MockCaseRepository,
        txn_error: fn() -> AppError,
    ) -> Self {
        Self {
            members: Arc::new(members),
            cases: Arc::new(cases),
            txn_error,
        }
    }
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        Arc::new(MockUserRepository::new())
    }

    fn organizations(&self) -> Arc<dyn OrganizationRepository> {
        Arc::new(MockOrganizationRepository::new())
    }

    fn members(&self) -> Arc<dyn MemberRepository> {
        self.members.clone()
    }

    fn cases(&self) -> Arc<dyn CaseRepository> {
        self.cases.clone()
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
        Arc::new(MockPlanRepository::new())
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        Err((self.txn_error)())
    }

    async fn transaction_serializable<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        Err((self.txn_error)())
    }
}

#[tokio::test]
async fn test_get_case_success() {
    let organization_id = Uuid::new_v4();
    let case = test_case(organization_id, "CASE-2026-0001");
    let case_id = case.id;

    let mut cases = MockCaseRepository::new();
    let returned = case.clone();
    cases
        .expect_find_by_id()
        .returning(move |_, _| Ok(Some(returned.clone())));

    let uow = Arc::new(TestUnitOfWork::new(MockMemberRepository::new(), cases));
    let service = CaseManager::new(uow);

    let result = service.get_case(organization_id, case_id).await;
    assert!(result.is_ok());
    assert_eq!(result.unwrap().case_number, "CASE-2026-0001");
}

#[tokio::test]
async fn test_get_case_not_found() {
    let mut cases = MockCaseRepository::new();
    cases.expect_find_by_id().returning(|_, _| Ok(None));

    let uow = Arc::new(TestUnitOfWork::new(MockMemberRepository::new(), cases));
    let service = CaseManager::new(uow);

    let result = service.get_case(Uuid::new_v4(), Uuid::new_v4()).await;
    assert!(matches!(result, Err(AppError::NotFound)));
}

#[tokio::test]
async fn test_open_case_rejects_unknown_member() {
    let mut members = MockMemberRepository::new();
    members.expect_find_by_id().returning(|_, _| Ok(None));

    let uow = Arc::new(TestUnitOfWork::new(members, MockCaseRepository::new()));
    let service = CaseManager::new(uow);

    let data = CreateCase {
        member_id: Uuid::new_v4(),
        title: "Rent assistance".to_string(),
        description: None,
        category: CaseCategory::Financial,
        priority: None,
        amount_requested_cents: None,
    };

    let result = service.open_case(Uuid::new_v4(), data).await;
    assert!(matches!(result, Err(AppError::NotFound)));
}

#[tokio::test]
async fn test_open_case_checks_member_before_allocating() {
    let organization_id = Uuid::new_v4();
    let member_id = Uuid::new_v4();

    let mut members = MockMemberRepository::new();
    let member = test_member(organization_id, member_id);
    members
        .expect_find_by_id()
        .returning(move |_, _| Ok(Some(member.clone())));

    let uow = Arc::new(TestUnitOfWork::new(members, MockCaseRepository::new()));
    let service = CaseManager::new(uow);

    let data = CreateCase {
        member_id,
        title: "Rent assistance".to_string(),
        description: None,
        category: CaseCategory::Financial,
        priority: None,
        amount_requested_cents: None,
    };

    // The member check passes; the mock unit of work cannot run the
    // allocation transaction, so the internal error surfaces instead
    // of NotFound.
    let result = service.open_case(organization_id, data).await;
    assert!(matches!(result, Err(AppError::Internal(_))));
}

#[tokio::test]
async fn test_open_case_maps_exhausted_serialization_retries_to_conflict() {
    let organization_id = Uuid::new_v4();
    let member_id = Uuid::new_v4();

    let mut members = MockMemberRepository::new();
    let member = test_member(organization_id, member_id);
    members
        .expect_find_by_id()
        .returning(move |_, _| Ok(Some(member.clone())));

    // The database aborts every allocation attempt the way Postgres
    // reports the loser of overlapping serializable transactions
    let uow = Arc::new(TestUnitOfWork::with_txn_error(
        members,
        MockCaseRepository::new(),
        || {
            AppError::Database(sea_orm::DbErr::Custom(
                "could not serialize access due to read/write dependencies among transactions"
                    .to_string(),
            ))
        },
    ));
    let service = CaseManager::new(uow);

    let data = CreateCase {
        member_id,
        title: "Rent assistance".to_string(),
        description: None,
        category: CaseCategory::Financial,
        priority: None,
        amount_requested_cents: None,
    };

    // The caller sees a 409 conflict, not a raw database error
    let result = service.open_case(organization_id, data).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn test_set_status_delegates_to_repository() {
    let organization_id = Uuid::new_v4();
    let mut resolved = test_case(organization_id, "CASE-2026-0007");
    resolved.status = CaseStatus::Resolved;
    resolved.resolved_at = Some(Utc::now());
    let case_id = resolved.id;

    let mut cases = MockCaseRepository::new();
    let returned = resolved.clone();
    cases
        .expect_set_status()
        .returning(move |_, _, _| Ok(returned.clone()));

    let uow = Arc::new(TestUnitOfWork::new(MockMemberRepository::new(), cases));
    let service = CaseManager::new(uow);

    let result = service
        .set_status(organization_id, case_id, CaseStatus::Resolved)
        .await;
    assert!(result.is_ok());
    let case = result.unwrap();
    assert_eq!(case.status, CaseStatus::Resolved);
    assert!(case.resolved_at.is_some());
}

#[tokio::test]
async fn test_statistics_counts_and_sums() {
    let organization_id = Uuid::new_v4();

    let mut open = test_case(organization_id, "CASE-2026-0001");
    open.amount_requested_cents = Some(50_000);

    let mut urgent = test_case(organization_id, "CASE-2026-0002");
    urgent.priority = CasePriority::Urgent;
    urgent.category = CaseCategory::Housing;
    urgent.amount_requested_cents = Some(120_000);
    urgent.amount_approved_cents = Some(100_000);

    let mut cases_repo = MockCaseRepository::new();
    let all = vec![open, urgent];
    cases_repo
        .expect_list_all()
        .returning(move |_| Ok(all.clone()));

    let uow = Arc::new(TestUnitOfWork::new(MockMemberRepository::new(), cases_repo));
    let service = CaseManager::new(uow);

    let stats = service.statistics(organization_id).await.unwrap();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.by_status.open, 2);
    assert_eq!(stats.by_priority.urgent, 1);
    assert_eq!(stats.by_category.get("financial"), Some(&1));
    assert_eq!(stats.by_category.get("housing"), Some(&1));
    assert_eq!(stats.amount_requested_cents, 170_000);
    assert_eq!(stats.amount_approved_cents, 100_000);
    assert_eq!(stats.avg_resolution_days, None);
}

#[tokio::test]
async fn test_statistics_averages_resolution_days() {
    let organization_id = Uuid::new_v4();

    // One case resolved after ten days, another after five
    let mut first = test_case(organization_id, "CASE-2026-0001");
    first.status = CaseStatus::Resolved;
    first.resolved_at = Some(first.opened_at + Duration::days(10));

    let mut second = test_case(organization_id, "CASE-2026-0002");
    second.status = CaseStatus::Resolved;
    second.resolved_at = Some(second.opened_at + Duration::days(5));

    // Unresolved cases stay out of the average
    let third = test_case(organization_id, "CASE-2026-0003");

    let mut cases_repo = MockCaseRepository::new();
    let all = vec![first, second, third];
    cases_repo
        .expect_list_all()
        .returning(move |_| Ok(all.clone()));

    let uow = Arc::new(TestUnitOfWork::new(MockMemberRepository::new(), cases_repo));
    let service = CaseManager::new(uow);

    let stats = service.statistics(organization_id).await.unwrap();
    let avg = stats.avg_resolution_days.unwrap();
    assert!((avg - 7.5).abs() < 1e-9);
}

#[tokio::test]
async fn test_statistics_empty_organization() {
    let mut cases_repo = MockCaseRepository::new();
    cases_repo.expect_list_all().returning(|_| Ok(vec![]));

    let uow = Arc::new(TestUnitOfWork::new(MockMemberRepository::new(), cases_repo));
    let service = CaseManager::new(uow);

    let stats = service.statistics(Uuid::new_v4()).await.unwrap();
    assert_eq!(stats.total, 0);
    assert_eq!(stats.avg_resolution_days, None);
}
