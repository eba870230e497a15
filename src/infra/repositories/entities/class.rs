//! Class database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Class;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "classes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub teacher_name: Option<String>,
    pub schedule: Option<String>,
    pub capacity: Option<i32>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::enrollment::Entity")]
    Enrollment,
}

impl Related<super::enrollment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Class {
    fn from(model: Model) -> Self {
        Class {
            id: model.id,
            organization_id: model.organization_id,
            name: model.name,
            teacher_name: model.teacher_name,
            schedule: model.schedule,
            capacity: model.capacity,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
