//! Domain layer - Core business entities and logic
//!
//! Contains the domain models and the pure computations of the system
//! (case numbering, statistics folds), independent of infrastructure.

pub mod donation;
pub mod education;
pub mod event;
pub mod member;
pub mod organization;
pub mod password;
pub mod plan;
pub mod service_case;
pub mod stats;
pub mod user;

pub use donation::{CreateDonation, Donation, DonationSummary, Fund, PaymentMethod};
pub use education::{Class, CreateClass, EnrollRequest, Enrollment, UpdateClass};
pub use event::{
    CreateEvent, Event, EventRsvp, RsvpCounts, RsvpListing, RsvpRequest, RsvpStatus, UpdateEvent,
};
pub use member::{CreateMember, Member, MemberStatus, UpdateMember};
pub use organization::{
    slugify, BillingCycle, Organization, OrganizationResponse, OrganizationStatus,
    UpdateOrganization,
};
pub use password::Password;
pub use plan::{CreatePlan, SubscriptionPlan, UpdatePlan};
pub use service_case::{
    case_number_prefix, format_case_number, next_case_number, parse_case_sequence,
    resolution_timestamp, CaseCategory, CasePriority, CaseStatus, CreateCase, ServiceCase,
    UpdateCase,
};
pub use stats::{
    monthly_revenue_cents, organization_monthly_cents, CaseStatistics, PlatformStatistics,
    PriorityCounts, StatusCounts,
};
pub use user::{User, UserResponse, UserRole};
