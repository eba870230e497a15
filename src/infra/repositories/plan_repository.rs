//! Subscription plan repository (platform-level).

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use super::entities::subscription_plan::{self, ActiveModel, Entity as PlanEntity};
use crate::domain::{CreatePlan, SubscriptionPlan, UpdatePlan};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Subscription plan repository trait for dependency injection
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// Create a new plan
    async fn create(&self, data: CreatePlan) -> AppResult<SubscriptionPlan>;

    /// Find plan by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<SubscriptionPlan>>;

    /// List all plans, cheapest monthly price first
    async fn list(&self) -> AppResult<Vec<SubscriptionPlan>>;

    /// Update plan fields
    async fn update(&self, id: Uuid, data: UpdatePlan) -> AppResult<SubscriptionPlan>;

    /// Delete plan
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of PlanRepository
pub struct PlanStore {
    db: DatabaseConnection,
}

impl PlanStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PlanRepository for PlanStore {
    async fn create(&self, data: CreatePlan) -> AppResult<SubscriptionPlan> {
        let now = Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(data.name),
            price_monthly_cents: Set(data.price_monthly_cents),
            price_yearly_cents: Set(data.price_yearly_cents),
            max_members: Set(data.max_members),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(SubscriptionPlan::from(model))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<SubscriptionPlan>> {
        let result = PlanEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(SubscriptionPlan::from))
    }

    async fn list(&self) -> AppResult<Vec<SubscriptionPlan>> {
        let models = PlanEntity::find()
            .order_by_asc(subscription_plan::Column::PriceMonthlyCents)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(SubscriptionPlan::from).collect())
    }

    async fn update(&self, id: Uuid, data: UpdatePlan) -> AppResult<SubscriptionPlan> {
        let model = PlanEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = model.into();

        if let Some(name) = data.name {
            active.name = Set(name);
        }
        if let Some(price) = data.price_monthly_cents {
            active.price_monthly_cents = Set(price);
        }
        if let Some(price) = data.price_yearly_cents {
            active.price_yearly_cents = Set(price);
        }
        if let Some(max_members) = data.max_members {
            active.max_members = Set(Some(max_members));
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(SubscriptionPlan::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = PlanEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
