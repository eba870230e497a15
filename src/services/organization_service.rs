//! Organization service - Tenant-facing profile operations.
//!
//! Reads go through the Redis cache; writes invalidate it.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Organization, UpdateOrganization};
use crate::errors::{AppError, AppResult};
use crate::infra::{Cache, UnitOfWork};

/// Organization service trait for dependency injection.
#[async_trait]
pub trait OrganizationService: Send + Sync {
    /// Get the caller's organization
    async fn get_organization(&self, organization_id: Uuid) -> AppResult<Organization>;

    /// Update tenant-facing profile fields
    async fn update_organization(
        &self,
        organization_id: Uuid,
        data: UpdateOrganization,
    ) -> AppResult<Organization>;
}

/// Concrete implementation of OrganizationService using Unit of Work.
pub struct OrganizationManager<U: UnitOfWork> {
    uow: Arc<U>,
    cache: Cache,
}

impl<U: UnitOfWork> OrganizationManager<U> {
    /// Create new organization service instance with Unit of Work
    pub fn new(uow: Arc<U>, cache: Cache) -> Self {
        Self { uow, cache }
    }
}

#[async_trait]
impl<U: UnitOfWork> OrganizationService for OrganizationManager<U> {
    async fn get_organization(&self, organization_id: Uuid) -> AppResult<Organization> {
        // Cache failures fall through to the database
        if let Ok(Some(cached)) = self.cache.get_organization(&organization_id).await {
            return Ok(cached);
        }

        let organization = self
            .uow
            .organizations()
            .find_by_id(organization_id)
            .await?
            .ok_or(AppError::NotFound)?;

        if let Err(e) = self.cache.set_organization(&organization).await {
            tracing::warn!("Failed to cache organization: {}", e);
        }

        Ok(organization)
    }

    async fn update_organization(
        &self,
        organization_id: Uuid,
        data: UpdateOrganization,
    ) -> AppResult<Organization> {
        let organization = self
            .uow
            .organizations()
            .update_profile(organization_id, data.name, data.address, data.phone)
            .await?;

        if let Err(e) = self.cache.invalidate_organization(&organization_id).await {
            tracing::warn!("Failed to invalidate organization cache: {}", e);
        }

        Ok(organization)
    }
}
