//! Platform service - Cross-tenant administration.
//!
//! Only platform admins reach these operations; the route layer guards
//! access. Tenant offboarding is a soft delete so the data can be
//! restored.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    BillingCycle, CreatePlan, Organization, OrganizationStatus, PlatformStatistics,
    SubscriptionPlan, UpdatePlan,
};
use crate::errors::{AppError, AppResult};
use crate::infra::{Cache, UnitOfWork};

/// Platform administration service trait for dependency injection.
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// List organizations, optionally including offboarded tenants
    async fn list_organizations(&self, include_deleted: bool) -> AppResult<Vec<Organization>>;

    /// Get organization by ID, including offboarded tenants
    async fn get_organization(&self, id: Uuid) -> AppResult<Organization>;

    /// Suspend or reactivate a tenant
    async fn set_organization_status(
        &self,
        id: Uuid,
        status: OrganizationStatus,
    ) -> AppResult<Organization>;

    /// Assign or clear a tenant's subscription plan
    async fn assign_plan(
        &self,
        id: Uuid,
        plan_id: Option<Uuid>,
        billing_cycle: Option<BillingCycle>,
    ) -> AppResult<Organization>;

    /// Offboard a tenant (soft delete)
    async fn offboard_organization(&self, id: Uuid) -> AppResult<()>;

    /// Restore an offboarded tenant
    async fn restore_organization(&self, id: Uuid) -> AppResult<Organization>;

    /// Create a subscription plan
    async fn create_plan(&self, data: CreatePlan) -> AppResult<SubscriptionPlan>;

    /// List subscription plans
    async fn list_plans(&self) -> AppResult<Vec<SubscriptionPlan>>;

    /// Get plan by ID
    async fn get_plan(&self, id: Uuid) -> AppResult<SubscriptionPlan>;

    /// Update plan fields
    async fn update_plan(&self, id: Uuid, data: UpdatePlan) -> AppResult<SubscriptionPlan>;

    /// Delete plan
    async fn delete_plan(&self, id: Uuid) -> AppResult<()>;

    /// Platform-wide tenant counts and monthly recurring revenue
    async fn statistics(&self) -> AppResult<PlatformStatistics>;
}

/// Concrete implementation of PlatformService using Unit of Work.
pub struct PlatformManager<U: UnitOfWork> {
    uow: Arc<U>,
    cache: Cache,
}

impl<U: UnitOfWork> PlatformManager<U> {
    /// Create new platform service instance with Unit of Work
    pub fn new(uow: Arc<U>, cache: Cache) -> Self {
        Self { uow, cache }
    }

    async fn invalidate(&self, organization_id: &Uuid) {
        if let Err(e) = self.cache.invalidate_organization(organization_id).await {
            tracing::warn!("Failed to invalidate organization cache: {}", e);
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> PlatformService for PlatformManager<U> {
    async fn list_organizations(&self, include_deleted: bool) -> AppResult<Vec<Organization>> {
        self.uow.organizations().list(include_deleted).await
    }

    async fn get_organization(&self, id: Uuid) -> AppResult<Organization> {
        self.uow
            .organizations()
            .find_by_id_with_deleted(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn set_organization_status(
        &self,
        id: Uuid,
        status: OrganizationStatus,
    ) -> AppResult<Organization> {
        let organization = self.uow.organizations().set_status(id, status).await?;
        self.invalidate(&id).await;
        Ok(organization)
    }

    async fn assign_plan(
        &self,
        id: Uuid,
        plan_id: Option<Uuid>,
        billing_cycle: Option<BillingCycle>,
    ) -> AppResult<Organization> {
        if let Some(plan_id) = plan_id {
            self.uow
                .plans()
                .find_by_id(plan_id)
                .await?
                .ok_or(AppError::NotFound)?;
        }

        let organization = self
            .uow
            .organizations()
            .assign_plan(id, plan_id, billing_cycle)
            .await?;
        self.invalidate(&id).await;
        Ok(organization)
    }

    async fn offboard_organization(&self, id: Uuid) -> AppResult<()> {
        self.uow.organizations().delete(id).await?;
        self.invalidate(&id).await;
        Ok(())
    }

    async fn restore_organization(&self, id: Uuid) -> AppResult<Organization> {
        self.uow.organizations().restore(id).await
    }

    async fn create_plan(&self, data: CreatePlan) -> AppResult<SubscriptionPlan> {
        self.uow.plans().create(data).await
    }

    async fn list_plans(&self) -> AppResult<Vec<SubscriptionPlan>> {
        self.uow.plans().list().await
    }

    async fn get_plan(&self, id: Uuid) -> AppResult<SubscriptionPlan> {
        self.uow
            .plans()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn update_plan(&self, id: Uuid, data: UpdatePlan) -> AppResult<SubscriptionPlan> {
        self.uow.plans().update(id, data).await
    }

    async fn delete_plan(&self, id: Uuid) -> AppResult<()> {
        self.uow.plans().delete(id).await
    }

    async fn statistics(&self) -> AppResult<PlatformStatistics> {
        let organizations = self.uow.organizations().list_with_plans().await?;
        Ok(PlatformStatistics::from_organizations(&organizations))
    }
}
