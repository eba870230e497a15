//! Organization repository with soft delete (offboarding) support.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::organization::{self, ActiveModel, Entity as OrgEntity};
use crate::domain::{BillingCycle, Organization, OrganizationStatus, SubscriptionPlan};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Organization repository trait for dependency injection.
///
/// Query methods exclude offboarded (soft-deleted) tenants unless noted.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    /// Find active organization by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Organization>>;

    /// Find organization by ID including offboarded tenants
    async fn find_by_id_with_deleted(&self, id: Uuid) -> AppResult<Option<Organization>>;

    /// List organizations, newest first
    async fn list(&self, include_deleted: bool) -> AppResult<Vec<Organization>>;

    /// List non-offboarded organizations joined with their plans
    async fn list_with_plans(&self)
        -> AppResult<Vec<(Organization, Option<SubscriptionPlan>)>>;

    /// Update tenant-facing profile fields
    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<String>,
        address: Option<String>,
        phone: Option<String>,
    ) -> AppResult<Organization>;

    /// Change tenant status (active/suspended)
    async fn set_status(&self, id: Uuid, status: OrganizationStatus) -> AppResult<Organization>;

    /// Assign or clear a subscription plan and billing cycle
    async fn assign_plan(
        &self,
        id: Uuid,
        plan_id: Option<Uuid>,
        billing_cycle: Option<BillingCycle>,
    ) -> AppResult<Organization>;

    /// Offboard tenant (sets deleted_at timestamp)
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Restore an offboarded tenant
    async fn restore(&self, id: Uuid) -> AppResult<Organization>;
}

/// Concrete implementation of OrganizationRepository
pub struct OrganizationStore {
    db: DatabaseConnection,
}

impl OrganizationStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_active_model(&self, id: Uuid) -> AppResult<organization::Model> {
        OrgEntity::find_by_id(id)
            .filter(organization::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }
}

#[async_trait]
impl OrganizationRepository for OrganizationStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Organization>> {
        let result = OrgEntity::find_by_id(id)
            .filter(organization::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Organization::from))
    }

    async fn find_by_id_with_deleted(&self, id: Uuid) -> AppResult<Option<Organization>> {
        let result = OrgEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Organization::from))
    }

    async fn list(&self, include_deleted: bool) -> AppResult<Vec<Organization>> {
        let mut query = OrgEntity::find().order_by_desc(organization::Column::CreatedAt);
        if !include_deleted {
            query = query.filter(organization::Column::DeletedAt.is_null());
        }

        let models = query.all(&self.db).await.map_err(AppError::from)?;
        Ok(models.into_iter().map(Organization::from).collect())
    }

    async fn list_with_plans(
        &self,
    ) -> AppResult<Vec<(Organization, Option<SubscriptionPlan>)>> {
        let rows = OrgEntity::find()
            .filter(organization::Column::DeletedAt.is_null())
            .find_also_related(super::entities::subscription_plan::Entity)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows
            .into_iter()
            .map(|(org, plan)| (Organization::from(org), plan.map(SubscriptionPlan::from)))
            .collect())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<String>,
        address: Option<String>,
        phone: Option<String>,
    ) -> AppResult<Organization> {
        let mut active: ActiveModel = self.find_active_model(id).await?.into();

        if let Some(name) = name {
            active.name = Set(name);
        }
        if let Some(address) = address {
            active.address = Set(Some(address));
        }
        if let Some(phone) = phone {
            active.phone = Set(Some(phone));
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Organization::from(model))
    }

    async fn set_status(&self, id: Uuid, status: OrganizationStatus) -> AppResult<Organization> {
        let mut active: ActiveModel = self.find_active_model(id).await?.into();
        active.status = Set(status.to_string());
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Organization::from(model))
    }

    async fn assign_plan(
        &self,
        id: Uuid,
        plan_id: Option<Uuid>,
        billing_cycle: Option<BillingCycle>,
    ) -> AppResult<Organization> {
        let mut active: ActiveModel = self.find_active_model(id).await?.into();
        active.plan_id = Set(plan_id);
        active.billing_cycle = Set(billing_cycle.map(|c| c.to_string()));
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Organization::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut active: ActiveModel = self.find_active_model(id).await?.into();
        let now = Utc::now();
        active.deleted_at = Set(Some(now));
        active.updated_at = Set(now);

        active.update(&self.db).await.map_err(AppError::from)?;
        Ok(())
    }

    async fn restore(&self, id: Uuid) -> AppResult<Organization> {
        let model = OrgEntity::find_by_id(id)
            .filter(organization::Column::DeletedAt.is_not_null())
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                AppError::validation("Organization is not offboarded or does not exist")
            })?;

        let mut active: ActiveModel = model.into();
        active.deleted_at = Set(None);
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Organization::from(model))
    }
}
