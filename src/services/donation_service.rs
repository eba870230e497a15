//! Donation service - Contribution records and period summaries.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{CreateDonation, Donation, DonationSummary, Fund};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::types::PaginationParams;

/// Donation service trait for dependency injection.
#[async_trait]
pub trait DonationService: Send + Sync {
    /// Record a donation; an absent member marks it anonymous
    async fn record_donation(
        &self,
        organization_id: Uuid,
        data: CreateDonation,
    ) -> AppResult<Donation>;

    /// Get donation by ID
    async fn get_donation(&self, organization_id: Uuid, id: Uuid) -> AppResult<Donation>;

    /// Paginated donation list with optional fund filter
    async fn list_donations(
        &self,
        organization_id: Uuid,
        params: &PaginationParams,
        fund: Option<Fund>,
    ) -> AppResult<(Vec<Donation>, u64)>;

    /// Per-fund totals over an optional date range
    async fn summary(
        &self,
        organization_id: Uuid,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> AppResult<DonationSummary>;

    /// Delete donation
    async fn delete_donation(&self, organization_id: Uuid, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of DonationService using Unit of Work.
pub struct DonationManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> DonationManager<U> {
    /// Create new donation service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> DonationService for DonationManager<U> {
    async fn record_donation(
        &self,
        organization_id: Uuid,
        data: CreateDonation,
    ) -> AppResult<Donation> {
        // A named donor must belong to this organization
        if let Some(member_id) = data.member_id {
            self.uow
                .members()
                .find_by_id(organization_id, member_id)
                .await?
                .ok_or(AppError::NotFound)?;
        }

        self.uow.donations().create(organization_id, data).await
    }

    async fn get_donation(&self, organization_id: Uuid, id: Uuid) -> AppResult<Donation> {
        self.uow
            .donations()
            .find_by_id(organization_id, id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn list_donations(
        &self,
        organization_id: Uuid,
        params: &PaginationParams,
        fund: Option<Fund>,
    ) -> AppResult<(Vec<Donation>, u64)> {
        self.uow.donations().list(organization_id, params, fund).await
    }

    async fn summary(
        &self,
        organization_id: Uuid,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> AppResult<DonationSummary> {
        let donations = self
            .uow
            .donations()
            .list_between(organization_id, from, to)
            .await?;
        Ok(DonationSummary::from_donations(&donations))
    }

    async fn delete_donation(&self, organization_id: Uuid, id: Uuid) -> AppResult<()> {
        self.uow.donations().delete(organization_id, id).await
    }
}
