//! Service Container - Centralized service access.
//!
//! Holds one instance of each application service behind its trait so
//! handlers depend on abstractions only.

use std::sync::Arc;

use super::{
    AuthService, CaseService, DonationService, EducationService, EventService, MemberService,
    OrganizationService, PlatformService,
};
use crate::config::Config;
use crate::infra::{Cache, Persistence};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
///
/// Provides centralized access to all application services.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get organization service (tenant-facing)
    fn organizations(&self) -> Arc<dyn OrganizationService>;

    /// Get member service
    fn members(&self) -> Arc<dyn MemberService>;

    /// Get case service
    fn cases(&self) -> Arc<dyn CaseService>;

    /// Get donation service
    fn donations(&self) -> Arc<dyn DonationService>;

    /// Get event service
    fn events(&self) -> Arc<dyn EventService>;

    /// Get education service
    fn education(&self) -> Arc<dyn EducationService>;

    /// Get platform administration service
    fn platform(&self) -> Arc<dyn PlatformService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    organization_service: Arc<dyn OrganizationService>,
    member_service: Arc<dyn MemberService>,
    case_service: Arc<dyn CaseService>,
    donation_service: Arc<dyn DonationService>,
    event_service: Arc<dyn EventService>,
    education_service: Arc<dyn EducationService>,
    platform_service: Arc<dyn PlatformService>,
}

impl Services {
    /// Create a new service container from explicit service instances
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
        }
    }

    /// Create service container from database connection, cache and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, cache: Cache, config: Config) -> Self {
        use super::{
            Authenticator, CaseManager, DonationManager, EducationManager, EventManager,
            MemberManager, OrganizationManager, PlatformManager,
        };

        let uow = Arc::new(Persistence::new(db));

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config)),
            organization_service: Arc::new(OrganizationManager::new(uow.clone(), cache.clone())),
            member_service: Arc::new(MemberManager::new(uow.clone())),
            case_service: Arc::new(CaseManager::new(uow.clone())),
            donation_service: Arc::new(DonationManager::new(uow.clone())),
            event_service: Arc::new(EventManager::new(uow.clone())),
            education_service: Arc::new(EducationManager::new(uow.clone())),
            platform_service: Arc::new(PlatformManager::new(uow, cache)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn organizations(&self) -> Arc<dyn OrganizationService> {
        self.organization_service.clone()
    }

    fn members(&self) -> Arc<dyn MemberService> {
        self.member_service.clone()
    }

    fn cases(&self) -> Arc<dyn CaseService> {
        self.case_service.clone()
    }

    fn donations(&self) -> Arc<dyn DonationService> {
        self.donation_service.clone()
    }

    fn events(&self) -> Arc<dyn EventService> {
        self.event_service.clone()
    }

    fn education(&self) -> Arc<dyn EducationService> {
        self.education_service.clone()
    }

    fn platform(&self) -> Arc<dyn PlatformService> {
        self.platform_service.clone()
    }
}
