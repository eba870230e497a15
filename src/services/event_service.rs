//! Event service - Community events and attendance tracking.
//!
//! RSVPs are reachable only through their event, and the event lookup
//! is organization-scoped, so a member of another tenant's event
//! surfaces as not found.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    CreateEvent, Event, EventRsvp, RsvpCounts, RsvpListing, RsvpStatus, UpdateEvent,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::types::PaginationParams;

/// Event service trait for dependency injection.
#[async_trait]
pub trait EventService: Send + Sync {
    /// Create a new event
    async fn create_event(&self, organization_id: Uuid, data: CreateEvent) -> AppResult<Event>;

    /// Get event by ID
    async fn get_event(&self, organization_id: Uuid, id: Uuid) -> AppResult<Event>;

    /// Paginated event list; upcoming_only hides past events
    async fn list_events(
        &self,
        organization_id: Uuid,
        params: &PaginationParams,
        upcoming_only: bool,
    ) -> AppResult<(Vec<Event>, u64)>;

    /// Update event fields
    async fn update_event(
        &self,
        organization_id: Uuid,
        id: Uuid,
        data: UpdateEvent,
    ) -> AppResult<Event>;

    /// Delete event and its RSVPs
    async fn delete_event(&self, organization_id: Uuid, id: Uuid) -> AppResult<()>;

    /// Record or overwrite a member's response
    async fn rsvp(
        &self,
        organization_id: Uuid,
        event_id: Uuid,
        member_id: Uuid,
        status: RsvpStatus,
    ) -> AppResult<EventRsvp>;

    /// List RSVPs for an event with per-status counts
    async fn list_rsvps(&self, organization_id: Uuid, event_id: Uuid) -> AppResult<RsvpListing>;
}

/// Concrete implementation of EventService using Unit of Work.
pub struct EventManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> EventManager<U> {
    /// Create new event service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Resolve an event within the caller's organization or fail with 404
    async fn require_event(&self, organization_id: Uuid, event_id: Uuid) -> AppResult<Event> {
        self.uow
            .events()
            .find_by_id(organization_id, event_id)
            .await?
            .ok_or(AppError::NotFound)
    }
}

#[async_trait]
impl<U: UnitOfWork> EventService for EventManager<U> {
    async fn create_event(&self, organization_id: Uuid, data: CreateEvent) -> AppResult<Event> {
        if let (Some(ends_at), starts_at) = (data.ends_at, data.starts_at) {
            if ends_at < starts_at {
                return Err(AppError::validation("Event cannot end before it starts"));
            }
        }
        self.uow.events().create(organization_id, data).await
    }

    async fn get_event(&self, organization_id: Uuid, id: Uuid) -> AppResult<Event> {
        self.require_event(organization_id, id).await
    }

    async fn list_events(
        &self,
        organization_id: Uuid,
        params: &PaginationParams,
        upcoming_only: bool,
    ) -> AppResult<(Vec<Event>, u64)> {
        self.uow
            .events()
            .list(organization_id, params, upcoming_only)
            .await
    }

    async fn update_event(
        &self,
        organization_id: Uuid,
        id: Uuid,
        data: UpdateEvent,
    ) -> AppResult<Event> {
        self.uow.events().update(organization_id, id, data).await
    }

    async fn delete_event(&self, organization_id: Uuid, id: Uuid) -> AppResult<()> {
        self.uow.events().delete(organization_id, id).await
    }

    async fn rsvp(
        &self,
        organization_id: Uuid,
        event_id: Uuid,
        member_id: Uuid,
        status: RsvpStatus,
    ) -> AppResult<EventRsvp> {
        let event = self.require_event(organization_id, event_id).await?;

        self.uow
            .members()
            .find_by_id(organization_id, member_id)
            .await?
            .ok_or(AppError::NotFound)?;

        // Capacity counts only confirmed attendees; changing an existing
        // response never blocks on capacity
        if status == RsvpStatus::Going {
            if let Some(capacity) = event.capacity {
                let rsvps = self.uow.events().list_rsvps(event_id).await?;
                let already_responded = rsvps.iter().any(|r| r.member_id == member_id);
                let going = RsvpCounts::from_rsvps(&rsvps).going;
                if !already_responded && going >= capacity as u64 {
                    return Err(AppError::limit_reached("Event is at capacity"));
                }
            }
        }

        self.uow.events().upsert_rsvp(event_id, member_id, status).await
    }

    async fn list_rsvps(&self, organization_id: Uuid, event_id: Uuid) -> AppResult<RsvpListing> {
        self.require_event(organization_id, event_id).await?;

        let rsvps = self.uow.events().list_rsvps(event_id).await?;
        Ok(RsvpListing {
            counts: RsvpCounts::from_rsvps(&rsvps),
            rsvps,
        })
    }
}
