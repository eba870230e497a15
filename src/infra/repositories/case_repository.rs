//! Service case repository. All queries are scoped to one organization.
//!
//! Case creation is not exposed here: new cases are inserted through
//! the transaction-scoped repository so that number allocation and the
//! insert share one serializable transaction.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::service_case::{self, ActiveModel, Entity as CaseEntity};
use crate::domain::{resolution_timestamp, CaseStatus, ServiceCase, UpdateCase};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service case repository trait for dependency injection
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CaseRepository: Send + Sync {
    /// Find case by ID within the organization
    async fn find_by_id(&self, organization_id: Uuid, id: Uuid)
        -> AppResult<Option<ServiceCase>>;

    /// Paginated list, newest first, with optional status filter
    async fn list(
        &self,
        organization_id: Uuid,
        params: &PaginationParams,
        status: Option<CaseStatus>,
    ) -> AppResult<(Vec<ServiceCase>, u64)>;

    /// Fetch every case of the organization (statistics fold input)
    async fn list_all(&self, organization_id: Uuid) -> AppResult<Vec<ServiceCase>>;

    /// Update case fields
    async fn update(
        &self,
        organization_id: Uuid,
        id: Uuid,
        data: UpdateCase,
    ) -> AppResult<ServiceCase>;

    /// Change case status; entering a terminal status stamps
    /// resolved_at once, reopening clears it
    async fn set_status(
        &self,
        organization_id: Uuid,
        id: Uuid,
        status: CaseStatus,
    ) -> AppResult<ServiceCase>;

    /// Delete case
    async fn delete(&self, organization_id: Uuid, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of CaseRepository
pub struct CaseStore {
    db: DatabaseConnection,
}

impl CaseStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, organization_id: Uuid, id: Uuid) -> AppResult<service_case::Model> {
        CaseEntity::find_by_id(id)
            .filter(service_case::Column::OrganizationId.eq(organization_id))
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }
}

#[async_trait]
impl CaseRepository for CaseStore {
    async fn find_by_id(
        &self,
        organization_id: Uuid,
        id: Uuid,
    ) -> AppResult<Option<ServiceCase>> {
        let result = CaseEntity::find_by_id(id)
            .filter(service_case::Column::OrganizationId.eq(organization_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(ServiceCase::from))
    }

    async fn list(
        &self,
        organization_id: Uuid,
        params: &PaginationParams,
        status: Option<CaseStatus>,
    ) -> AppResult<(Vec<ServiceCase>, u64)> {
        let mut query = CaseEntity::find()
            .filter(service_case::Column::OrganizationId.eq(organization_id))
            .order_by_desc(service_case::Column::OpenedAt);

        if let Some(status) = status {
            query = query.filter(service_case::Column::Status.eq(status.to_string()));
        }

        let paginator = query.paginate(&self.db, params.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(ServiceCase::from).collect(), total))
    }

    async fn list_all(&self, organization_id: Uuid) -> AppResult<Vec<ServiceCase>> {
        let models = CaseEntity::find()
            .filter(service_case::Column::OrganizationId.eq(organization_id))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(ServiceCase::from).collect())
    }

    async fn update(
        &self,
        organization_id: Uuid,
        id: Uuid,
        data: UpdateCase,
    ) -> AppResult<ServiceCase> {
        let mut active: ActiveModel = self.find_model(organization_id, id).await?.into();

        if let Some(title) = data.title {
            active.title = Set(title);
        }
        if let Some(description) = data.description {
            active.description = Set(Some(description));
        }
        if let Some(category) = data.category {
            active.category = Set(category.to_string());
        }
        if let Some(priority) = data.priority {
            active.priority = Set(priority.to_string());
        }
        if let Some(amount) = data.amount_requested_cents {
            active.amount_requested_cents = Set(Some(amount));
        }
        if let Some(amount) = data.amount_approved_cents {
            active.amount_approved_cents = Set(Some(amount));
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(ServiceCase::from(model))
    }

    async fn set_status(
        &self,
        organization_id: Uuid,
        id: Uuid,
        status: CaseStatus,
    ) -> AppResult<ServiceCase> {
        let model = self.find_model(organization_id, id).await?;
        let now = Utc::now();
        let resolved_at = resolution_timestamp(model.resolved_at, status, now);

        let mut active: ActiveModel = model.into();
        active.status = Set(status.to_string());
        active.resolved_at = Set(resolved_at);
        active.updated_at = Set(now);

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(ServiceCase::from(model))
    }

    async fn delete(&self, organization_id: Uuid, id: Uuid) -> AppResult<()> {
        let model = self.find_model(organization_id, id).await?;
        CaseEntity::delete_by_id(model.id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }
}
