//! Event service unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use minbar::domain::{Event, EventRsvp, Member, MemberStatus, RsvpStatus};
use minbar::errors::{AppError, AppResult};
use minbar::infra::repositories::{
    CaseRepository, DonationRepository, EducationRepository, EventRepository, MemberRepository,
    MockCaseRepository, MockDonationRepository, MockEducationRepository, MockEventRepository,
    MockMemberRepository, MockOrganizationRepository, MockPlanRepository, MockUserRepository,
    OrganizationRepository, PlanRepository, UserRepository,
};
use minbar::infra::{TransactionContext, UnitOfWork};
use minbar::services::{EventManager, EventService};

fn test_event(organization_id: Uuid, capacity: Option<i32>) -> Event {
    let now = Utc::now();
    Event {
        id: Uuid::new_v4(),
        organization_id,
        title: "Friday community dinner".to_string(),
        description: None,
        location: Some("Main hall".to_string()),
        starts_at: now + Duration::days(7),
        ends_at: None,
        capacity,
        created_at: now,
        updated_at: now,
    }
}

fn test_member(organization_id: Uuid, id: Uuid) -> Member {
    Member {
        id,
        organization_id,
        first_name: "Amina".to_string(),
        last_name: "Hassan".to_string(),
        email: None,
        phone: None,
        status: MemberStatus::Active,
        joined_at: Utc::now().date_naive(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn going_rsvp(event_id: Uuid) -> EventRsvp {
    EventRsvp {
        id: Uuid::new_v4(),
        event_id,
        member_id: Uuid::new_v4(),
        status: RsvpStatus::Going,
        responded_at: Utc::now(),
    }
}

/// Test mock for UnitOfWork that wraps mocked repositories
struct TestUnitOfWork {
    events: Arc<MockEventRepository>,
    members: Arc<MockMemberRepository>,
}

impl TestUnitOfWork {
    fn new(events: MockEventRepository, members: MockMemberRepository) -> Self {
        Self {
            events: Arc::new(events),
            members: Arc::new(members),
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
        Arc::new(MockCaseRepository::new())
    }

    fn donations(&self) -> Arc<dyn DonationRepository> {
        Arc::new(MockDonationRepository::new())
    }

    fn events(&self) -> Arc<dyn EventRepository> {
        self.events.clone()
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
async fn test_rsvp_on_another_tenants_event_is_not_found() {
    let mut events = MockEventRepository::new();
    events.expect_find_by_id().returning(|_, _| Ok(None));

    let uow = Arc::new(TestUnitOfWork::new(events, MockMemberRepository::new()));
    let service = EventManager::new(uow);

    let result = service
        .rsvp(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), RsvpStatus::Going)
        .await;
    assert!(matches!(result, Err(AppError::NotFound)));
}

#[tokio::test]
async fn test_rsvp_insert_race_surfaces_as_conflict() {
    let organization_id = Uuid::new_v4();
    let member_id = Uuid::new_v4();
    let event = test_event(organization_id, None);

    let mut events = MockEventRepository::new();
    let returned = event.clone();
    events
        .expect_find_by_id()
        .returning(move |_, _| Ok(Some(returned.clone())));
    // Another first response won the unique (event_id, member_id)
    // index while this one was in flight
    events
        .expect_upsert_rsvp()
        .returning(|_, _, _| Err(AppError::conflict("RSVP")));

    let mut members = MockMemberRepository::new();
    let member = test_member(organization_id, member_id);
    members
        .expect_find_by_id()
        .returning(move |_, _| Ok(Some(member.clone())));

    let uow = Arc::new(TestUnitOfWork::new(events, members));
    let service = EventManager::new(uow);

    let result = service
        .rsvp(organization_id, event.id, member_id, RsvpStatus::Maybe)
        .await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn test_full_event_blocks_a_new_going_response() {
    let organization_id = Uuid::new_v4();
    let member_id = Uuid::new_v4();
    let event = test_event(organization_id, Some(2));
    let event_id = event.id;

    let mut events = MockEventRepository::new();
    let returned = event.clone();
    events
        .expect_find_by_id()
        .returning(move |_, _| Ok(Some(returned.clone())));
    events
        .expect_list_rsvps()
        .returning(move |_| Ok(vec![going_rsvp(event_id), going_rsvp(event_id)]));
    events.expect_upsert_rsvp().never();

    let mut members = MockMemberRepository::new();
    let member = test_member(organization_id, member_id);
    members
        .expect_find_by_id()
        .returning(move |_, _| Ok(Some(member.clone())));

    let uow = Arc::new(TestUnitOfWork::new(events, members));
    let service = EventManager::new(uow);

    let result = service
        .rsvp(organization_id, event_id, member_id, RsvpStatus::Going)
        .await;
    assert!(matches!(result, Err(AppError::LimitReached(_))));
}

#[tokio::test]
async fn test_changing_an_existing_response_ignores_capacity() {
    let organization_id = Uuid::new_v4();
    let member_id = Uuid::new_v4();
    let event = test_event(organization_id, Some(1));
    let event_id = event.id;

    // The member already responded; flipping to "going" never blocks
    let existing = EventRsvp {
        id: Uuid::new_v4(),
        event_id,
        member_id,
        status: RsvpStatus::Maybe,
        responded_at: Utc::now(),
    };

    let mut events = MockEventRepository::new();
    let returned = event.clone();
    events
        .expect_find_by_id()
        .returning(move |_, _| Ok(Some(returned.clone())));
    let listed = existing.clone();
    events
        .expect_list_rsvps()
        .returning(move |_| Ok(vec![listed.clone(), going_rsvp(event_id)]));
    let mut updated = existing.clone();
    updated.status = RsvpStatus::Going;
    events
        .expect_upsert_rsvp()
        .returning(move |_, _, _| Ok(updated.clone()));

    let mut members = MockMemberRepository::new();
    let member = test_member(organization_id, member_id);
    members
        .expect_find_by_id()
        .returning(move |_, _| Ok(Some(member.clone())));

    let uow = Arc::new(TestUnitOfWork::new(events, members));
    let service = EventManager::new(uow);

    let result = service
        .rsvp(organization_id, event_id, member_id, RsvpStatus::Going)
        .await;
    assert!(result.is_ok());
    assert_eq!(result.unwrap().status, RsvpStatus::Going);
}
