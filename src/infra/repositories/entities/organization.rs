//! Organization database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{BillingCycle, Organization, OrganizationStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "organizations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub status: String,
    pub plan_id: Option<Uuid>,
    pub billing_cycle: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    /// Soft delete timestamp marks an offboarded tenant
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subscription_plan::Entity",
        from = "Column::PlanId",
        to = "super::subscription_plan::Column::Id"
    )]
    SubscriptionPlan,
}

impl Related<super::subscription_plan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubscriptionPlan.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Organization {
    fn from(model: Model) -> Self {
        Organization {
            id: model.id,
            name: model.name,
            slug: model.slug,
            address: model.address,
            phone: model.phone,
            status: OrganizationStatus::from(model.status.as_str()),
            plan_id: model.plan_id,
            billing_cycle: model.billing_cycle.as_deref().map(BillingCycle::from),
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
        }
    }
}
