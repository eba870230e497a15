//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    auth_handler, case_handler, donation_handler, education_handler, event_handler,
    member_handler, organization_handler, platform_handler,
};
use crate::domain::{
    BillingCycle, CaseCategory, CasePriority, CaseStatistics, CaseStatus, Class, CreateCase,
    CreateClass, CreateDonation, CreateEvent, CreateMember, CreatePlan, Donation, DonationSummary,
    EnrollRequest, Enrollment, Event, EventRsvp, Fund, Member, MemberStatus,
    OrganizationResponse, OrganizationStatus, PaymentMethod, PlatformStatistics, PriorityCounts,
    RsvpCounts, RsvpListing, RsvpRequest, RsvpStatus, ServiceCase, StatusCounts,
    SubscriptionPlan, UpdateCase, UpdateClass, UpdateEvent, UpdateMember, UpdateOrganization,
    UpdatePlan, UserResponse, UserRole,
};
use crate::services::TokenResponse;

/// OpenAPI documentation for the Minbar API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Minbar",
        version = "0.1.0",
        description = "Multi-tenant community management API for mosque organizations",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
        contact(name = "API Support", email = "support@example.com")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server"),
        (url = "https://api.example.com", description = "Production server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        // Organization endpoints
        organization_handler::get_organization,
        organization_handler::update_organization,
        // Member endpoints
        member_handler::create_member,
        member_handler::list_members,
        member_handler::get_member,
        member_handler::update_member,
        member_handler::delete_member,
        // Case endpoints
        case_handler::open_case,
        case_handler::list_cases,
        case_handler::case_statistics,
        case_handler::get_case,
        case_handler::update_case,
        case_handler::set_case_status,
        case_handler::delete_case,
        // Donation endpoints
        donation_handler::record_donation,
        donation_handler::list_donations,
        donation_handler::donation_summary,
        donation_handler::get_donation,
        donation_handler::delete_donation,
        // Event endpoints
        event_handler::create_event,
        event_handler::list_events,
        event_handler::get_event,
        event_handler::update_event,
        event_handler::delete_event,
        event_handler::rsvp,
        event_handler::list_rsvps,
        // Education endpoints
        education_handler::create_class,
        education_handler::list_classes,
        education_handler::get_class,
        education_handler::update_class,
        education_handler::delete_class,
        education_handler::enroll,
        education_handler::withdraw,
        education_handler::list_enrollments,
        // Platform endpoints
        platform_handler::list_organizations,
        platform_handler::get_organization,
        platform_handler::set_organization_status,
        platform_handler::assign_plan,
        platform_handler::offboard,
        platform_handler::restore_organization,
        platform_handler::create_plan,
        platform_handler::list_plans,
        platform_handler::get_plan,
        platform_handler::update_plan,
        platform_handler::delete_plan,
        platform_handler::platform_statistics,
    ),
    components(
        schemas(
            // Domain types
            UserRole,
            UserResponse,
            OrganizationResponse,
            OrganizationStatus,
            BillingCycle,
            UpdateOrganization,
            Member,
            MemberStatus,
            CreateMember,
            UpdateMember,
            ServiceCase,
            CaseStatus,
            CaseCategory,
            CasePriority,
            CreateCase,
            UpdateCase,
            CaseStatistics,
            StatusCounts,
            PriorityCounts,
            Donation,
            Fund,
            PaymentMethod,
            CreateDonation,
            DonationSummary,
            Event,
            CreateEvent,
            UpdateEvent,
            EventRsvp,
            RsvpStatus,
            RsvpRequest,
            RsvpCounts,
            RsvpListing,
            Class,
            CreateClass,
            UpdateClass,
            Enrollment,
            EnrollRequest,
            SubscriptionPlan,
            CreatePlan,
            UpdatePlan,
            PlatformStatistics,
            // Auth types
            auth_handler::RegisterRequest,
            auth_handler::RegisterResponse,
            auth_handler::LoginRequest,
            TokenResponse,
            // Case handler types
            case_handler::SetStatusRequest,
            // Platform handler types
            platform_handler::SetOrganizationStatusRequest,
            platform_handler::AssignPlanRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Tenant registration and login"),
        (name = "Organization", description = "Tenant profile management"),
        (name = "Members", description = "Community member registry"),
        (name = "Cases", description = "Social service case tracking"),
        (name = "Donations", description = "Donation recording and summaries"),
        (name = "Events", description = "Events and RSVPs"),
        (name = "Education", description = "Classes and enrollments"),
        (name = "Platform", description = "Cross-tenant platform administration")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}
