//! Donation repository. All queries are scoped to one organization.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::donation::{self, ActiveModel, Entity as DonationEntity};
use crate::domain::{CreateDonation, Donation, Fund};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Donation repository trait for dependency injection
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DonationRepository: Send + Sync {
    /// Record a new donation
    async fn create(&self, organization_id: Uuid, data: CreateDonation) -> AppResult<Donation>;

    /// Find donation by ID within the organization
    async fn find_by_id(&self, organization_id: Uuid, id: Uuid) -> AppResult<Option<Donation>>;

    /// Paginated list, newest first, with optional fund filter
    async fn list(
        &self,
        organization_id: Uuid,
        params: &PaginationParams,
        fund: Option<Fund>,
    ) -> AppResult<(Vec<Donation>, u64)>;

    /// Fetch donations within a date range (summary fold input)
    async fn list_between(
        &self,
        organization_id: Uuid,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> AppResult<Vec<Donation>>;

    /// Delete donation
    async fn delete(&self, organization_id: Uuid, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of DonationRepository
pub struct DonationStore {
    db: DatabaseConnection,
}

impl DonationStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DonationRepository for DonationStore {
    async fn create(&self, organization_id: Uuid, data: CreateDonation) -> AppResult<Donation> {
        let now = Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            organization_id: Set(organization_id),
            member_id: Set(data.member_id),
            fund: Set(data.fund.to_string()),
            amount_cents: Set(data.amount_cents),
            method: Set(data.method.to_string()),
            note: Set(data.note),
            donated_at: Set(data.donated_at.unwrap_or_else(|| now.date_naive())),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Donation::from(model))
    }

    async fn find_by_id(&self, organization_id: Uuid, id: Uuid) -> AppResult<Option<Donation>> {
        let result = DonationEntity::find_by_id(id)
            .filter(donation::Column::OrganizationId.eq(organization_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Donation::from))
    }

    async fn list(
        &self,
        organization_id: Uuid,
        params: &PaginationParams,
        fund: Option<Fund>,
    ) -> AppResult<(Vec<Donation>, u64)> {
        let mut query = DonationEntity::find()
            .filter(donation::Column::OrganizationId.eq(organization_id))
            .order_by_desc(donation::Column::DonatedAt);

        if let Some(fund) = fund {
            query = query.filter(donation::Column::Fund.eq(fund.to_string()));
        }

        let paginator = query.paginate(&self.db, params.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(Donation::from).collect(), total))
    }

    async fn list_between(
        &self,
        organization_id: Uuid,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> AppResult<Vec<Donation>> {
        let mut query =
            DonationEntity::find().filter(donation::Column::OrganizationId.eq(organization_id));

        if let Some(from) = from {
            query = query.filter(donation::Column::DonatedAt.gte(from));
        }
        if let Some(to) = to {
            query = query.filter(donation::Column::DonatedAt.lte(to));
        }

        let models = query.all(&self.db).await.map_err(AppError::from)?;
        Ok(models.into_iter().map(Donation::from).collect())
    }

    async fn delete(&self, organization_id: Uuid, id: Uuid) -> AppResult<()> {
        let model = DonationEntity::find_by_id(id)
            .filter(donation::Column::OrganizationId.eq(organization_id))
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        DonationEntity::delete_by_id(model.id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }
}
