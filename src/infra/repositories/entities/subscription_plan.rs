//! Subscription plan database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::SubscriptionPlan;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "subscription_plans")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub name: String,
    pub price_monthly_cents: i64,
    pub price_yearly_cents: i64,
    pub max_members: Option<i32>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SubscriptionPlan {
    fn from(model: Model) -> Self {
        SubscriptionPlan {
            id: model.id,
            name: model.name,
            price_monthly_cents: model.price_monthly_cents,
            price_yearly_cents: model.price_yearly_cents,
            max_members: model.max_members,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
