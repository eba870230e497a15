//! Service case management: numbered assistance requests.
//!
//! Opening a case allocates the next `CASE-<year>-NNNN` number inside a
//! serializable transaction. If a concurrent allocation wins the race,
//! either the unique (organization_id, case_number) index fails the
//! insert or the database aborts the losing transaction with a
//! serialization failure; both retry the whole allocation with a fresh
//! number.

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::CASE_NUMBER_MAX_ATTEMPTS;
use crate::domain::{
    case_number_prefix, next_case_number, CasePriority, CaseStatistics, CaseStatus, CreateCase,
    ServiceCase, UpdateCase,
};
use crate::errors::{AppError, AppResult};
use crate::infra::{NewCaseRecord, UnitOfWork};
use crate::types::PaginationParams;

/// Case service trait for dependency injection.
#[async_trait]
pub trait CaseService: Send + Sync {
    /// Open a new case with a freshly allocated case number
    async fn open_case(&self, organization_id: Uuid, data: CreateCase) -> AppResult<ServiceCase>;

    /// Get case by ID
    async fn get_case(&self, organization_id: Uuid, id: Uuid) -> AppResult<ServiceCase>;

    /// Paginated case list with optional status filter
    async fn list_cases(
        &self,
        organization_id: Uuid,
        params: &PaginationParams,
        status: Option<CaseStatus>,
    ) -> AppResult<(Vec<ServiceCase>, u64)>;

    /// Update case fields
    async fn update_case(
        &self,
        organization_id: Uuid,
        id: Uuid,
        data: UpdateCase,
    ) -> AppResult<ServiceCase>;

    /// Change case status; resolving stamps resolved_at, reopening clears it
    async fn set_status(
        &self,
        organization_id: Uuid,
        id: Uuid,
        status: CaseStatus,
    ) -> AppResult<ServiceCase>;

    /// Delete case
    async fn delete_case(&self, organization_id: Uuid, id: Uuid) -> AppResult<()>;

    /// Aggregate statistics over all cases of the organization
    async fn statistics(&self, organization_id: Uuid) -> AppResult<CaseStatistics>;
}

/// Concrete implementation of CaseService using Unit of Work.
pub struct CaseManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CaseManager<U> {
    /// Create new case service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> CaseService for CaseManager<U> {
    async fn open_case(&self, organization_id: Uuid, data: CreateCase) -> AppResult<ServiceCase> {
        // The member must belong to this organization
        self.uow
            .members()
            .find_by_id(organization_id, data.member_id)
            .await?
            .ok_or(AppError::NotFound)?;

        let year = Utc::now().year();
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            let data = data.clone();

            let result = self
                .uow
                .transaction_serializable(move |ctx| {
                    Box::pin(async move {
                        let prefix = case_number_prefix(year);
                        let latest = ctx
                            .cases()
                            .latest_case_number(organization_id, &prefix)
                            .await?;
                        let case_number = next_case_number(latest.as_deref(), year);

                        ctx.cases()
                            .create(NewCaseRecord {
                                organization_id,
                                member_id: data.member_id,
                                case_number,
                                title: data.title,
                                description: data.description,
                                category: data.category,
                                priority: data.priority.unwrap_or(CasePriority::Medium),
                                amount_requested_cents: data.amount_requested_cents,
                            })
                            .await
                    })
                })
                .await;

            match result {
                Err(e) if e.is_unique_violation() || e.is_serialization_failure() => {
                    if attempt >= CASE_NUMBER_MAX_ATTEMPTS {
                        tracing::error!(attempt, "Case number allocation kept colliding");
                        return Err(AppError::conflict("Case number"));
                    }
                    tracing::warn!(
                        attempt,
                        "Case number collided with a concurrent allocation, retrying"
                    );
                }
                other => return other,
            }
        }
    }

    async fn get_case(&self, organization_id: Uuid, id: Uuid) -> AppResult<ServiceCase> {
        self.uow
            .cases()
            .find_by_id(organization_id, id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn list_cases(
        &self,
        organization_id: Uuid,
        params: &PaginationParams,
        status: Option<CaseStatus>,
    ) -> AppResult<(Vec<ServiceCase>, u64)> {
        self.uow.cases().list(organization_id, params, status).await
    }

    async fn update_case(
        &self,
        organization_id: Uuid,
        id: Uuid,
        data: UpdateCase,
    ) -> AppResult<ServiceCase> {
        self.uow.cases().update(organization_id, id, data).await
    }

    async fn set_status(
        &self,
        organization_id: Uuid,
        id: Uuid,
        status: CaseStatus,
    ) -> AppResult<ServiceCase> {
        self.uow.cases().set_status(organization_id, id, status).await
    }

    async fn delete_case(&self, organization_id: Uuid, id: Uuid) -> AppResult<()> {
        self.uow.cases().delete(organization_id, id).await
    }

    async fn statistics(&self, organization_id: Uuid) -> AppResult<CaseStatistics> {
        let cases = self.uow.cases().list_all(organization_id).await?;
        Ok(CaseStatistics::from_cases(&cases))
    }
}
