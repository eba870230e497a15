//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! All services use Unit of Work pattern for centralized repository
//! access and transaction management.

mod auth_service;
mod case_service;
pub mod container;
mod donation_service;
mod education_service;
mod event_service;
mod member_service;
mod organization_service;
mod platform_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator, Claims, Registration, TokenResponse};
pub use case_service::{CaseManager, CaseService};
pub use donation_service::{DonationManager, DonationService};
pub use education_service::{EducationManager, EducationService};
pub use event_service::{EventManager, EventService};
pub use member_service::{MemberManager, MemberService};
pub use organization_service::{OrganizationManager, OrganizationService};
pub use platform_service::{PlatformManager, PlatformService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
