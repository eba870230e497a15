//! Service case handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, patch},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{org_scope, CurrentUser};
use crate::api::AppState;
use crate::domain::{CaseStatistics, CaseStatus, CreateCase, ServiceCase, UpdateCase};
use crate::errors::AppResult;
use crate::types::{Created, NoContent, Paginated, PaginationParams};

/// Case list query parameters
#[derive(Debug, Deserialize)]
pub struct CaseListQuery {
    /// Filter by workflow status
    pub status: Option<CaseStatus>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

/// Status change request
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetStatusRequest {
    pub status: CaseStatus,
}

/// Create case routes
pub fn case_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_cases).post(open_case))
        .route("/stats", get(case_statistics))
        .route(
            "/:id",
            get(get_case).patch(update_case).delete(delete_case),
        )
        .route("/:id/status", patch(set_case_status))
}

/// Open a new service case.
///
/// A case number of the form `CASE-<year>-NNNN` is allocated on
/// creation, unique within the organization.
#[utoipa::path(
    post,
    path = "/cases",
    tag = "Cases",
    security(("bearer_auth" = [])),
    request_body = CreateCase,
    responses(
        (status = 201, description = "Case opened", body = ServiceCase),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Member not found")
    )
)]
pub async fn open_case(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateCase>,
) -> AppResult<Created<ServiceCase>> {
    let organization_id = org_scope(&user)?;
    let case = state.case_service.open_case(organization_id, payload).await?;

    Ok(Created(case))
}

/// List cases with pagination and optional status filter
#[utoipa::path(
    get,
    path = "/cases",
    tag = "Cases",
    security(("bearer_auth" = [])),
    params(
        PaginationParams,
        ("status" = Option<CaseStatus>, Query, description = "Filter by status")
    ),
    responses(
        (status = 200, description = "Paginated case list"),
        (status = 401, description = "Authentication required")
    )
)]
pub async fn list_cases(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<CaseListQuery>,
) -> AppResult<Json<Paginated<ServiceCase>>> {
    let organization_id = org_scope(&user)?;
    let (cases, total) = state
        .case_service
        .list_cases(organization_id, &query.pagination, query.status)
        .await?;

    Ok(Json(Paginated::from_params(cases, &query.pagination, total)))
}

/// Aggregate case statistics for the organization
#[utoipa::path(
    get,
    path = "/cases/stats",
    tag = "Cases",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Case statistics", body = CaseStatistics),
        (status = 401, description = "Authentication required")
    )
)]
pub async fn case_statistics(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<CaseStatistics>> {
    let organization_id = org_scope(&user)?;
    let stats = state.case_service.statistics(organization_id).await?;

    Ok(Json(stats))
}

/// Get a case by ID
#[utoipa::path(
    get,
    path = "/cases/{id}",
    tag = "Cases",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Case ID")),
    responses(
        (status = 200, description = "Case details", body = ServiceCase),
        (status = 404, description = "Case not found")
    )
)]
pub async fn get_case(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ServiceCase>> {
    let organization_id = org_scope(&user)?;
    let case = state.case_service.get_case(organization_id, id).await?;

    Ok(Json(case))
}

/// Update a case
#[utoipa::path(
    patch,
    path = "/cases/{id}",
    tag = "Cases",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Case ID")),
    request_body = UpdateCase,
    responses(
        (status = 200, description = "Case updated", body = ServiceCase),
        (status = 404, description = "Case not found")
    )
)]
pub async fn update_case(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateCase>,
) -> AppResult<Json<ServiceCase>> {
    let organization_id = org_scope(&user)?;
    let case = state
        .case_service
        .update_case(organization_id, id, payload)
        .await?;

    Ok(Json(case))
}

/// Change case status.
///
/// Moving to resolved or closed stamps the resolution time; reopening
/// clears it.
#[utoipa::path(
    patch,
    path = "/cases/{id}/status",
    tag = "Cases",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Case ID")),
    request_body = SetStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = ServiceCase),
        (status = 404, description = "Case not found")
    )
)]
pub async fn set_case_status(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetStatusRequest>,
) -> AppResult<Json<ServiceCase>> {
    let organization_id = org_scope(&user)?;
    let case = state
        .case_service
        .set_status(organization_id, id, payload.status)
        .await?;

    Ok(Json(case))
}

/// Delete a case
#[utoipa::path(
    delete,
    path = "/cases/{id}",
    tag = "Cases",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Case ID")),
    responses(
        (status = 204, description = "Case deleted"),
        (status = 404, description = "Case not found")
    )
)]
pub async fn delete_case(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    let organization_id = org_scope(&user)?;
    state.case_service.delete_case(organization_id, id).await?;

    Ok(NoContent)
}
