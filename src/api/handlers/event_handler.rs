//! Event and RSVP handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, put},
    Extension, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{org_scope, CurrentUser};
use crate::api::AppState;
use crate::domain::{CreateEvent, Event, EventRsvp, RsvpListing, RsvpRequest, UpdateEvent};
use crate::errors::AppResult;
use crate::types::{Created, NoContent, Paginated, PaginationParams};

/// Event list query parameters
#[derive(Debug, Deserialize)]
pub struct EventListQuery {
    /// Hide events that already started
    #[serde(default)]
    pub upcoming: bool,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

/// Create event routes
pub fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_events).post(create_event))
        .route(
            "/:id",
            get(get_event).patch(update_event).delete(delete_event),
        )
        .route("/:id/rsvp", put(rsvp))
        .route("/:id/rsvps", get(list_rsvps))
}

/// Create a new event
#[utoipa::path(
    post,
    path = "/events",
    tag = "Events",
    security(("bearer_auth" = [])),
    request_body = CreateEvent,
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_event(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateEvent>,
) -> AppResult<Created<Event>> {
    let organization_id = org_scope(&user)?;
    let event = state
        .event_service
        .create_event(organization_id, payload)
        .await?;

    Ok(Created(event))
}

/// List events ordered by start time
#[utoipa::path(
    get,
    path = "/events",
    tag = "Events",
    security(("bearer_auth" = [])),
    params(
        PaginationParams,
        ("upcoming" = Option<bool>, Query, description = "Hide past events")
    ),
    responses(
        (status = 200, description = "Paginated event list"),
        (status = 401, description = "Authentication required")
    )
)]
pub async fn list_events(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<EventListQuery>,
) -> AppResult<Json<Paginated<Event>>> {
    let organization_id = org_scope(&user)?;
    let (events, total) = state
        .event_service
        .list_events(organization_id, &query.pagination, query.upcoming)
        .await?;

    Ok(Json(Paginated::from_params(events, &query.pagination, total)))
}

/// Get an event by ID
#[utoipa::path(
    get,
    path = "/events/{id}",
    tag = "Events",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event details", body = Event),
        (status = 404, description = "Event not found")
    )
)]
pub async fn get_event(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Event>> {
    let organization_id = org_scope(&user)?;
    let event = state.event_service.get_event(organization_id, id).await?;

    Ok(Json(event))
}

/// Update an event
#[utoipa::path(
    patch,
    path = "/events/{id}",
    tag = "Events",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Event ID")),
    request_body = UpdateEvent,
    responses(
        (status = 200, description = "Event updated", body = Event),
        (status = 404, description = "Event not found")
    )
)]
pub async fn update_event(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateEvent>,
) -> AppResult<Json<Event>> {
    let organization_id = org_scope(&user)?;
    let event = state
        .event_service
        .update_event(organization_id, id, payload)
        .await?;

    Ok(Json(event))
}

/// Delete an event and its RSVPs
#[utoipa::path(
    delete,
    path = "/events/{id}",
    tag = "Events",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 404, description = "Event not found")
    )
)]
pub async fn delete_event(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    let organization_id = org_scope(&user)?;
    state.event_service.delete_event(organization_id, id).await?;

    Ok(NoContent)
}

/// Record or overwrite a member's RSVP
#[utoipa::path(
    put,
    path = "/events/{id}/rsvp",
    tag = "Events",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Event ID")),
    request_body = RsvpRequest,
    responses(
        (status = 200, description = "RSVP recorded", body = EventRsvp),
        (status = 404, description = "Event or member not found"),
        (status = 409, description = "Event at capacity")
    )
)]
pub async fn rsvp(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RsvpRequest>,
) -> AppResult<Json<EventRsvp>> {
    let organization_id = org_scope(&user)?;
    let rsvp = state
        .event_service
        .rsvp(organization_id, id, payload.member_id, payload.status)
        .await?;

    Ok(Json(rsvp))
}

/// List RSVPs for an event with per-status counts
#[utoipa::path(
    get,
    path = "/events/{id}/rsvps",
    tag = "Events",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 200, description = "RSVP listing", body = RsvpListing),
        (status = 404, description = "Event not found")
    )
)]
pub async fn list_rsvps(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<RsvpListing>> {
    let organization_id = org_scope(&user)?;
    let listing = state.event_service.list_rsvps(organization_id, id).await?;

    Ok(Json(listing))
}
