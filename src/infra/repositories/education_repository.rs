//! Class and enrollment repository. All queries are scoped to one organization.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::class::{self, ActiveModel, Entity as ClassEntity};
use super::entities::enrollment::{
    self, ActiveModel as EnrollmentActiveModel, Entity as EnrollmentEntity,
};
use crate::domain::{Class, CreateClass, Enrollment, UpdateClass};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Education repository trait for dependency injection
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EducationRepository: Send + Sync {
    /// Create a new class
    async fn create_class(&self, organization_id: Uuid, data: CreateClass) -> AppResult<Class>;

    /// Find class by ID within the organization
    async fn find_class(&self, organization_id: Uuid, id: Uuid) -> AppResult<Option<Class>>;

    /// Paginated class list, newest first
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

    /// Delete class (enrollments cascade at the database level)
    async fn delete_class(&self, organization_id: Uuid, id: Uuid) -> AppResult<()>;

    /// Enroll a member; unique index rejects duplicates
    async fn enroll(&self, class_id: Uuid, member_id: Uuid) -> AppResult<Enrollment>;

    /// Withdraw a member from a class
    async fn withdraw(&self, class_id: Uuid, member_id: Uuid) -> AppResult<()>;

    /// List enrollments for a class
    async fn list_enrollments(&self, class_id: Uuid) -> AppResult<Vec<Enrollment>>;

    /// Count enrollments for a class (capacity check)
    async fn count_enrollments(&self, class_id: Uuid) -> AppResult<u64>;
}

/// Concrete implementation of EducationRepository
pub struct EducationStore {
    db: DatabaseConnection,
}

impl EducationStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_class_model(&self, organization_id: Uuid, id: Uuid) -> AppResult<class::Model> {
        ClassEntity::find_by_id(id)
            .filter(class::Column::OrganizationId.eq(organization_id))
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }
}

#[async_trait]
impl EducationRepository for EducationStore {
    async fn create_class(&self, organization_id: Uuid, data: CreateClass) -> AppResult<Class> {
        let now = Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            organization_id: Set(organization_id),
            name: Set(data.name),
            teacher_name: Set(data.teacher_name),
            schedule: Set(data.schedule),
            capacity: Set(data.capacity),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Class::from(model))
    }

    async fn find_class(&self, organization_id: Uuid, id: Uuid) -> AppResult<Option<Class>> {
        let result = ClassEntity::find_by_id(id)
            .filter(class::Column::OrganizationId.eq(organization_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Class::from))
    }

    async fn list_classes(
        &self,
        organization_id: Uuid,
        params: &PaginationParams,
    ) -> AppResult<(Vec<Class>, u64)> {
        let query = ClassEntity::find()
            .filter(class::Column::OrganizationId.eq(organization_id))
            .order_by_desc(class::Column::CreatedAt);

        let paginator = query.paginate(&self.db, params.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(Class::from).collect(), total))
    }

    async fn update_class(
        &self,
        organization_id: Uuid,
        id: Uuid,
        data: UpdateClass,
    ) -> AppResult<Class> {
        let mut active: ActiveModel = self.find_class_model(organization_id, id).await?.into();

        if let Some(name) = data.name {
            active.name = Set(name);
        }
        if let Some(teacher_name) = data.teacher_name {
            active.teacher_name = Set(Some(teacher_name));
        }
        if let Some(schedule) = data.schedule {
            active.schedule = Set(Some(schedule));
        }
        if let Some(capacity) = data.capacity {
            active.capacity = Set(Some(capacity));
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Class::from(model))
    }

    async fn delete_class(&self, organization_id: Uuid, id: Uuid) -> AppResult<()> {
        let model = self.find_class_model(organization_id, id).await?;
        ClassEntity::delete_by_id(model.id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }

    async fn enroll(&self, class_id: Uuid, member_id: Uuid) -> AppResult<Enrollment> {
        let active = EnrollmentActiveModel {
            id: Set(Uuid::new_v4()),
            class_id: Set(class_id),
            member_id: Set(member_id),
            enrolled_at: Set(Utc::now()),
        };

        let model = active.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Enrollment::from(model))
    }

    async fn withdraw(&self, class_id: Uuid, member_id: Uuid) -> AppResult<()> {
        let result = EnrollmentEntity::delete_many()
            .filter(enrollment::Column::ClassId.eq(class_id))
            .filter(enrollment::Column::MemberId.eq(member_id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn list_enrollments(&self, class_id: Uuid) -> AppResult<Vec<Enrollment>> {
        let models = EnrollmentEntity::find()
            .filter(enrollment::Column::ClassId.eq(class_id))
            .order_by_asc(enrollment::Column::EnrolledAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Enrollment::from).collect())
    }

    async fn count_enrollments(&self, class_id: Uuid) -> AppResult<u64> {
        EnrollmentEntity::find()
            .filter(enrollment::Column::ClassId.eq(class_id))
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }
}
