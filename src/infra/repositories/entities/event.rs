//! Event database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Event;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub organization_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: DateTimeUtc,
    pub ends_at: Option<DateTimeUtc>,
    pub capacity: Option<i32>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::event_rsvp::Entity")]
    EventRsvp,
}

impl Related<super::event_rsvp::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventRsvp.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Event {
    fn from(model: Model) -> Self {
        Event {
            id: model.id,
            organization_id: model.organization_id,
            title: model.title,
            description: model.description,
            location: model.location,
            starts_at: model.starts_at,
            ends_at: model.ends_at,
            capacity: model.capacity,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
