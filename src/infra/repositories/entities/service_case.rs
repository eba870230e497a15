//! Service case database entity for SeaORM.
//!
//! `(organization_id, case_number)` carries a unique index; the
//! case-number allocator relies on it.

use sea_orm::entity::prelude::*;

use crate::domain::{CaseCategory, CasePriority, CaseStatus, ServiceCase};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "service_cases")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub organization_id: Uuid,
    pub member_id: Uuid,
    pub case_number: String,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub status: String,
    pub priority: String,
    pub amount_requested_cents: Option<i64>,
    pub amount_approved_cents: Option<i64>,
    pub opened_at: DateTimeUtc,
    pub resolved_at: Option<DateTimeUtc>,
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

impl From<Model> for ServiceCase {
    fn from(model: Model) -> Self {
        ServiceCase {
            id: model.id,
            organization_id: model.organization_id,
            member_id: model.member_id,
            case_number: model.case_number,
            title: model.title,
            description: model.description,
            category: CaseCategory::from(model.category.as_str()),
            status: CaseStatus::from(model.status.as_str()),
            priority: CasePriority::from(model.priority.as_str()),
            amount_requested_cents: model.amount_requested_cents,
            amount_approved_cents: model.amount_approved_cents,
            opened_at: model.opened_at,
            resolved_at: model.resolved_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
