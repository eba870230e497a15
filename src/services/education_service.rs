//! Education service - Classes and enrollments.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Class, CreateClass, Enrollment, UpdateClass};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::types::PaginationParams;

/// Education service trait for dependency injection.
#[async_trait]
pub trait EducationService: Send + Sync {
    /// Create a new class
    async fn create_class(&self, organization_id: Uuid, data: CreateClass) -> AppResult<Class>;

    /// Get class by ID
    async fn get_class(&self, organization_id: Uuid, id: Uuid) -> AppResult<Class>;

    /// Paginated class list
    async fn list_classes(
        &self,
        organization_id: Uuid,
        params: &PaginationParams,
    ) -> AppResult<(Vec<Class>, u64)>;

    /// Update class fields
    async fn update_class(
        &self,
        organization_id: Uuid,
        id: Uuid,
        data: UpdateClass,
    ) -> AppResult<Class>;

    /// Delete class and its enrollments
    async fn delete_class(&self, organization_id: Uuid, id: Uuid) -> AppResult<()>;

    /// Enroll a member, enforcing capacity and rejecting duplicates
    async fn enroll(
        &self,
        organization_id: Uuid,
        class_id: Uuid,
        member_id: Uuid,
    ) -> AppResult<Enrollment>;

    /// Withdraw a member from a class
    async fn withdraw(
        &self,
        organization_id: Uuid,
        class_id: Uuid,
        member_id: Uuid,
    ) -> AppResult<()>;

    /// List enrollments of a class
    async fn list_enrollments(
        &self,
        organization_id: Uuid,
        class_id: Uuid,
    ) -> AppResult<Vec<Enrollment>>;
}

/// Concrete implementation of EducationService using Unit of Work.
pub struct EducationManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> EducationManager<U> {
    /// Create new education service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Resolve a class within the caller's organization or fail with 404
    async fn require_class(&self, organization_id: Uuid, class_id: Uuid) -> AppResult<Class> {
        self.uow
            .education()
            .find_class(organization_id, class_id)
            .await?
            .ok_or(AppError::NotFound)
    }
}

#[async_trait]
impl<U: UnitOfWork> EducationService for EducationManager<U> {
    async fn create_class(&self, organization_id: Uuid, data: CreateClass) -> AppResult<Class> {
        self.uow.education().create_class(organization_id, data).await
    }

    async fn get_class(&self, organization_id: Uuid, id: Uuid) -> AppResult<Class> {
        self.require_class(organization_id, id).await
    }

    async fn list_classes(
        &self,
        organization_id: Uuid,
        params: &PaginationParams,
    ) -> AppResult<(Vec<Class>, u64)> {
        self.uow.education().list_classes(organization_id, params).await
    }

    async fn update_class(
        &self,
        organization_id: Uuid,
        id: Uuid,
        data: UpdateClass,
    ) -> AppResult<Class> {
        self.uow.education().update_class(organization_id, id, data).await
    }

    async fn delete_class(&self, organization_id: Uuid, id: Uuid) -> AppResult<()> {
        self.uow.education().delete_class(organization_id, id).await
    }

    async fn enroll(
        &self,
        organization_id: Uuid,
        class_id: Uuid,
        member_id: Uuid,
    ) -> AppResult<Enrollment> {
        let class = self.require_class(organization_id, class_id).await?;

        self.uow
            .members()
            .find_by_id(organization_id, member_id)
            .await?
            .ok_or(AppError::NotFound)?;

        if let Some(capacity) = class.capacity {
            let enrolled = self.uow.education().count_enrollments(class_id).await?;
            if enrolled >= capacity as u64 {
                return Err(AppError::limit_reached("Class is at capacity"));
            }
        }

        // The unique (class_id, member_id) index rejects double enrollment
        match self.uow.education().enroll(class_id, member_id).await {
            Err(e) if e.is_unique_violation() => Err(AppError::conflict("Enrollment")),
            other => other,
        }
    }

    async fn withdraw(
        &self,
        organization_id: Uuid,
        class_id: Uuid,
        member_id: Uuid,
    ) -> AppResult<()> {
        self.require_class(organization_id, class_id).await?;
        self.uow.education().withdraw(class_id, member_id).await
    }

    async fn list_enrollments(
        &self,
        organization_id: Uuid,
        class_id: Uuid,
    ) -> AppResult<Vec<Enrollment>> {
        self.require_class(organization_id, class_id).await?;
        self.uow.education().list_enrollments(class_id).await
    }
}
