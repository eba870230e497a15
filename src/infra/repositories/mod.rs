//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod case_repository;
mod donation_repository;
mod education_repository;
pub(crate) mod entities;
mod event_repository;
mod member_repository;
mod organization_repository;
mod plan_repository;
mod user_repository;

pub use case_repository::{CaseRepository, CaseStore};
pub use donation_repository::{DonationRepository, DonationStore};
pub use education_repository::{EducationRepository, EducationStore};
pub use event_repository::{EventRepository, EventStore};
pub use member_repository::{MemberRepository, MemberStore};
pub use organization_repository::{OrganizationRepository, OrganizationStore};
pub use plan_repository::{PlanRepository, PlanStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use case_repository::MockCaseRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use donation_repository::MockDonationRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use education_repository::MockEducationRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use event_repository::MockEventRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use member_repository::MockMemberRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use organization_repository::MockOrganizationRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use plan_repository::MockPlanRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
