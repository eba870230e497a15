//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::infra::{Cache, Database};
use crate::services::{
    AuthService, CaseService, DonationService, EducationService, EventService, MemberService,
    OrganizationService, PlatformService, ServiceContainer, Services,
};

/// Application state containing all services (DI container).
///
/// Use `from_config()` for recommended initialization with full
/// ServiceContainer and UnitOfWork support.
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// Tenant-facing organization service
    pub organization_service: Arc<dyn OrganizationService>,
    /// Member service
    pub member_service: Arc<dyn MemberService>,
    /// Service case service
    pub case_service: Arc<dyn CaseService>,
    /// Donation service
    pub donation_service: Arc<dyn DonationService>,
    /// Event service
    pub event_service: Arc<dyn EventService>,
    /// Education service
    pub education_service: Arc<dyn EducationService>,
    /// Platform administration service
    pub platform_service: Arc<dyn PlatformService>,
    /// Redis cache
    pub cache: Arc<Cache>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from database connection and config.
    ///
    /// This is the recommended way to create AppState as it uses
    /// the ServiceContainer for centralized service management.
    pub fn from_config(
        database: Arc<Database>,
        cache: Arc<Cache>,
        config: crate::config::Config,
    ) -> Self {
        let container = Services::from_connection(
            database.get_connection(),
            cache.as_ref().clone(),
            config,
        );

        Self {
            auth_service: container.auth(),
            organization_service: container.organizations(),
            member_service: container.members(),
            case_service: container.cases(),
            donation_service: container.donations(),
            event_service: container.events(),
            education_service: container.education(),
            platform_service: container.platform(),
            cache,
            database,
        }
    }

    /// Create new application state with manually injected services.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        organization_service: Arc<dyn OrganizationService>,
        member_service: Arc<dyn MemberService>,
        case_service: Arc<dyn CaseService>,
        donation_service: Arc<dyn DonationService>,
        event_service: Arc<dyn EventService>,
        education_service: Arc<dyn EducationService>,
        platform_service: Arc<dyn PlatformService>,
        cache: Arc<Cache>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            auth_service,
            organization_service,
            member_service,
            case_service,
            donation_service,
            event_service,
            education_service,
            platform_service,
            cache,
            database,
        }
    }
}
