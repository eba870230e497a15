//! Member handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Extension, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{org_scope, CurrentUser};
use crate::api::AppState;
use crate::domain::{CreateMember, Member, UpdateMember};
use crate::errors::AppResult;
use crate::types::{Created, NoContent, Paginated, PaginationParams};

/// Member list query parameters
#[derive(Debug, Deserialize)]
pub struct MemberListQuery {
    /// Case-insensitive search over name and email
    pub search: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

/// Create member routes
pub fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_members).post(create_member))
        .route(
            "/:id",
            get(get_member).patch(update_member).delete(delete_member),
        )
}

/// Register a new community member
#[utoipa::path(
    post,
    path = "/members",
    tag = "Members",
    security(("bearer_auth" = [])),
    request_body = CreateMember,
    responses(
        (status = 201, description = "Member created", body = Member),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Plan member limit reached")
    )
)]
pub async fn create_member(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateMember>,
) -> AppResult<Created<Member>> {
    let organization_id = org_scope(&user)?;
    let member = state
        .member_service
        .create_member(organization_id, payload)
        .await?;

    Ok(Created(member))
}

/// List members with pagination and optional search
#[utoipa::path(
    get,
    path = "/members",
    tag = "Members",
    security(("bearer_auth" = [])),
    params(
        PaginationParams,
        ("search" = Option<String>, Query, description = "Search over name and email")
    ),
    responses(
        (status = 200, description = "Paginated member list"),
        (status = 401, description = "Authentication required")
    )
)]
pub async fn list_members(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<MemberListQuery>,
) -> AppResult<Json<Paginated<Member>>> {
    let organization_id = org_scope(&user)?;
    let (members, total) = state
        .member_service
        .list_members(organization_id, &query.pagination, query.search)
        .await?;

    Ok(Json(Paginated::from_params(members, &query.pagination, total)))
}

/// Get a member by ID
#[utoipa::path(
    get,
    path = "/members/{id}",
    tag = "Members",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Member details", body = Member),
        (status = 404, description = "Member not found")
    )
)]
pub async fn get_member(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Member>> {
    let organization_id = org_scope(&user)?;
    let member = state.member_service.get_member(organization_id, id).await?;

    Ok(Json(member))
}

/// Update a member
#[utoipa::path(
    patch,
    path = "/members/{id}",
    tag = "Members",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Member ID")),
    request_body = UpdateMember,
    responses(
        (status = 200, description = "Member updated", body = Member),
        (status = 404, description = "Member not found")
    )
)]
pub async fn update_member(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateMember>,
) -> AppResult<Json<Member>> {
    let organization_id = org_scope(&user)?;
    let member = state
        .member_service
        .update_member(organization_id, id, payload)
        .await?;

    Ok(Json(member))
}

/// Delete a member
#[utoipa::path(
    delete,
    path = "/members/{id}",
    tag = "Members",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Member ID")),
    responses(
        (status = 204, description = "Member deleted"),
        (status = 404, description = "Member not found")
    )
)]
pub async fn delete_member(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    let organization_id = org_scope(&user)?;
    state
        .member_service
        .delete_member(organization_id, id)
        .await?;

    Ok(NoContent)
}
