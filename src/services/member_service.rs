//! Member service - Community membership roster of one tenant.
//!
//! Creation enforces the member cap of the tenant's subscription plan.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{CreateMember, Member, UpdateMember};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::types::PaginationParams;

/// Member service trait for dependency injection.
#[async_trait]
pub trait MemberService: Send + Sync {
    /// Create a member, enforcing the plan's member cap
    async fn create_member(&self, organization_id: Uuid, data: CreateMember) -> AppResult<Member>;

    /// Get member by ID
    async fn get_member(&self, organization_id: Uuid, id: Uuid) -> AppResult<Member>;

    /// Paginated member list with optional name/email search
    async fn list_members(
        &self,
        organization_id: Uuid,
        params: &PaginationParams,
        search: Option<String>,
    ) -> AppResult<(Vec<Member>, u64)>;

    /// Update member fields
    async fn update_member(
        &self,
        organization_id: Uuid,
        id: Uuid,
        data: UpdateMember,
    ) -> AppResult<Member>;

    /// Delete member
    async fn delete_member(&self, organization_id: Uuid, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of MemberService using Unit of Work.
pub struct MemberManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> MemberManager<U> {
    /// Create new member service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Member cap of the tenant's plan, if any
    async fn member_cap(&self, organization_id: Uuid) -> AppResult<Option<i32>> {
        let organization = self
            .uow
            .organizations()
            .find_by_id(organization_id)
            .await?
            .ok_or(AppError::NotFound)?;

        let Some(plan_id) = organization.plan_id else {
            return Ok(None);
        };

        Ok(self
            .uow
            .plans()
            .find_by_id(plan_id)
            .await?
            .and_then(|plan| plan.max_members))
    }
}

#[async_trait]
impl<U: UnitOfWork> MemberService for MemberManager<U> {
    async fn create_member(&self, organization_id: Uuid, data: CreateMember) -> AppResult<Member> {
        if let Some(cap) = self.member_cap(organization_id).await? {
            let count = self.uow.members().count(organization_id).await?;
            if count >= cap as u64 {
                return Err(AppError::limit_reached(
                    "Member limit for the current plan reached",
                ));
            }
        }

        self.uow.members().create(organization_id, data).await
    }

    async fn get_member(&self, organization_id: Uuid, id: Uuid) -> AppResult<Member> {
        self.uow
            .members()
            .find_by_id(organization_id, id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn list_members(
        &self,
        organization_id: Uuid,
        params: &PaginationParams,
        search: Option<String>,
    ) -> AppResult<(Vec<Member>, u64)> {
        self.uow.members().list(organization_id, params, search).await
    }

    async fn update_member(
        &self,
        organization_id: Uuid,
        id: Uuid,
        data: UpdateMember,
    ) -> AppResult<Member> {
        self.uow.members().update(organization_id, id, data).await
    }

    async fn delete_member(&self, organization_id: Uuid, id: Uuid) -> AppResult<()> {
        self.uow.members().delete(organization_id, id).await
    }
}
