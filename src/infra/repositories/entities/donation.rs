//! Donation database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Donation, Fund, PaymentMethod};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "donations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub organization_id: Uuid,
    /// NULL = anonymous donation
    pub member_id: Option<Uuid>,
    pub fund: String,
    pub amount_cents: i64,
    pub method: String,
    pub note: Option<String>,
    pub donated_at: Date,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::member::Entity",
        from = "Column::MemberId",
        to = "super::member::Column::Id"
    )]
    Member,
}

impl Related<super::member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Member.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Donation {
    fn from(model: Model) -> Self {
        Donation {
            id: model.id,
            organization_id: model.organization_id,
            member_id: model.member_id,
            fund: Fund::from(model.fund.as_str()),
            amount_cents: model.amount_cents,
            method: PaymentMethod::from(model.method.as_str()),
            note: model.note,
            donated_at: model.donated_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
