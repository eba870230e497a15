//! Event RSVP database entity for SeaORM.
//!
//! `(event_id, member_id)` carries a unique index; a member has at most
//! one response per event.

use sea_orm::entity::prelude::*;

use crate::domain::{EventRsvp, RsvpStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "event_rsvps")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub event_id: Uuid,
    pub member_id: Uuid,
    pub status: String,
    pub responded_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::event::Entity",
        from = "Column::EventId",
        to = "super::event::Column::Id"
    )]
    Event,
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for EventRsvp {
    fn from(model: Model) -> Self {
        EventRsvp {
            id: model.id,
            event_id: model.event_id,
            member_id: model.member_id,
            status: RsvpStatus::from(model.status.as_str()),
            responded_at: model.responded_at,
        }
    }
}
