//! Event and RSVP repository. All queries are scoped to one organization.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::event::{self, ActiveModel, Entity as EventEntity};
use super::entities::event_rsvp::{
    self, ActiveModel as RsvpActiveModel, Entity as RsvpEntity,
};
use crate::domain::{CreateEvent, Event, EventRsvp, RsvpStatus, UpdateEvent};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Event repository trait for dependency injection
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Create a new event
    async fn create(&self, organization_id: Uuid, data: CreateEvent) -> AppResult<Event>;

    /// Find event by ID within the organization
    async fn find_by_id(&self, organization_id: Uuid, id: Uuid) -> AppResult<Option<Event>>;

    /// Paginated list ordered by start time; upcoming_only hides past events
    async fn list(
        &self,
        organization_id: Uuid,
        params: &PaginationParams,
        upcoming_only: bool,
    ) -> AppResult<(Vec<Event>, u64)>;

    /// Update event fields
    async fn update(&self, organization_id: Uuid, id: Uuid, data: UpdateEvent)
        -> AppResult<Event>;

    /// Delete event (RSVPs cascade at the database level)
    async fn delete(&self, organization_id: Uuid, id: Uuid) -> AppResult<()>;

    /// Record or overwrite a member's response to an event
    async fn upsert_rsvp(
        &self,
        event_id: Uuid,
        member_id: Uuid,
        status: RsvpStatus,
    ) -> AppResult<EventRsvp>;

    /// List all RSVPs for an event
    async fn list_rsvps(&self, event_id: Uuid) -> AppResult<Vec<EventRsvp>>;
}

/// Concrete implementation of EventRepository
pub struct EventStore {
    db: DatabaseConnection,
}

impl EventStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, organization_id: Uuid, id: Uuid) -> AppResult<event::Model> {
        EventEntity::find_by_id(id)
            .filter(event::Column::OrganizationId.eq(organization_id))
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }
}

#[async_trait]
impl EventRepository for EventStore {
    async fn create(&self, organization_id: Uuid, data: CreateEvent) -> AppResult<Event> {
        let now = Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            organization_id: Set(organization_id),
            title: Set(data.title),
            description: Set(data.description),
            location: Set(data.location),
            starts_at: Set(data.starts_at),
            ends_at: Set(data.ends_at),
            capacity: Set(data.capacity),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Event::from(model))
    }

    async fn find_by_id(&self, organization_id: Uuid, id: Uuid) -> AppResult<Option<Event>> {
        let result = EventEntity::find_by_id(id)
            .filter(event::Column::OrganizationId.eq(organization_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Event::from))
    }

    async fn list(
        &self,
        organization_id: Uuid,
        params: &PaginationParams,
        upcoming_only: bool,
    ) -> AppResult<(Vec<Event>, u64)> {
        let mut query = EventEntity::find()
            .filter(event::Column::OrganizationId.eq(organization_id))
            .order_by_asc(event::Column::StartsAt);

        if upcoming_only {
            query = query.filter(event::Column::StartsAt.gte(Utc::now()));
        }

        let paginator = query.paginate(&self.db, params.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(Event::from).collect(), total))
    }

    async fn update(
        &self,
        organization_id: Uuid,
        id: Uuid,
        data: UpdateEvent,
    ) -> AppResult<Event> {
        let mut active: ActiveModel = self.find_model(organization_id, id).await?.into();

        if let Some(title) = data.title {
            active.title = Set(title);
        }
        if let Some(description) = data.description {
            active.description = Set(Some(description));
        }
        if let Some(location) = data.location {
            active.location = Set(Some(location));
        }
        if let Some(starts_at) = data.starts_at {
            active.starts_at = Set(starts_at);
        }
        if let Some(ends_at) = data.ends_at {
            active.ends_at = Set(Some(ends_at));
        }
        if let Some(capacity) = data.capacity {
            active.capacity = Set(Some(capacity));
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Event::from(model))
    }

    async fn delete(&self, organization_id: Uuid, id: Uuid) -> AppResult<()> {
        let model = self.find_model(organization_id, id).await?;
        EventEntity::delete_by_id(model.id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }

    async fn upsert_rsvp(
        &self,
        event_id: Uuid,
        member_id: Uuid,
        status: RsvpStatus,
    ) -> AppResult<EventRsvp> {
        let existing = RsvpEntity::find()
            .filter(event_rsvp::Column::EventId.eq(event_id))
            .filter(event_rsvp::Column::MemberId.eq(member_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        let now = Utc::now();
        let model = match existing {
            Some(model) => {
                let mut active: RsvpActiveModel = model.into();
                active.status = Set(status.to_string());
                active.responded_at = Set(now);
                active.update(&self.db).await.map_err(AppError::from)?
            }
            None => {
                let active = RsvpActiveModel {
                    id: Set(Uuid::new_v4()),
                    event_id: Set(event_id),
                    member_id: Set(member_id),
                    status: Set(status.to_string()),
                    responded_at: Set(now),
                };
                // A concurrent first response can win the unique
                // (event_id, member_id) index between the lookup and
                // this insert
                match active.insert(&self.db).await.map_err(AppError::from) {
                    Err(e) if e.is_unique_violation() => {
                        return Err(AppError::conflict("RSVP"));
                    }
                    other => other?,
                }
            }
        };

        Ok(EventRsvp::from(model))
    }

    async fn list_rsvps(&self, event_id: Uuid) -> AppResult<Vec<EventRsvp>> {
        let models = RsvpEntity::find()
            .filter(event_rsvp::Column::EventId.eq(event_id))
            .order_by_asc(event_rsvp::Column::RespondedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(EventRsvp::from).collect())
    }
}
