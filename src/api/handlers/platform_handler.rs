//! Platform administration handlers (cross-tenant).
//!
//! Every handler requires the platform admin role.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, patch, post},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_platform_admin, CurrentUser};
use crate::api::AppState;
use crate::domain::{
    BillingCycle, CreatePlan, OrganizationResponse, OrganizationStatus, PlatformStatistics,
    SubscriptionPlan, UpdatePlan,
};
use crate::errors::AppResult;
use crate::types::{Created, NoContent};

/// Organization list query parameters
#[derive(Debug, Deserialize)]
pub struct OrganizationListQuery {
    /// Include offboarded tenants
    #[serde(default)]
    pub include_deleted: bool,
}

/// Tenant status change request
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetOrganizationStatusRequest {
    pub status: OrganizationStatus,
}

/// Plan assignment request; null plan_id clears the subscription
#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignPlanRequest {
    pub plan_id: Option<Uuid>,
    pub billing_cycle: Option<BillingCycle>,
}

/// Create platform administration routes
pub fn platform_routes() -> Router<AppState> {
    Router::new()
        .route("/organizations", get(list_organizations))
        .route("/organizations/:id", get(get_organization).delete(offboard))
        .route("/organizations/:id/status", patch(set_organization_status))
        .route("/organizations/:id/plan", patch(assign_plan))
        .route("/organizations/:id/restore", post(restore_organization))
        .route("/plans", get(list_plans).post(create_plan))
        .route(
            "/plans/:id",
            get(get_plan).patch(update_plan).delete(delete_plan),
        )
        .route("/stats", get(platform_statistics))
}

/// List all organizations
#[utoipa::path(
    get,
    path = "/platform/organizations",
    tag = "Platform",
    security(("bearer_auth" = [])),
    params(("include_deleted" = Option<bool>, Query, description = "Include offboarded tenants")),
    responses(
        (status = 200, description = "Organization list"),
        (status = 403, description = "Platform admin role required")
    )
)]
pub async fn list_organizations(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<OrganizationListQuery>,
) -> AppResult<Json<Vec<OrganizationResponse>>> {
    require_platform_admin(&user)?;

    let organizations = state
        .platform_service
        .list_organizations(query.include_deleted)
        .await?;

    Ok(Json(
        organizations
            .into_iter()
            .map(OrganizationResponse::from)
            .collect(),
    ))
}

/// Get any organization by ID
#[utoipa::path(
    get,
    path = "/platform/organizations/{id}",
    tag = "Platform",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Organization ID")),
    responses(
        (status = 200, description = "Organization details", body = OrganizationResponse),
        (status = 403, description = "Platform admin role required"),
        (status = 404, description = "Organization not found")
    )
)]
pub async fn get_organization(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<OrganizationResponse>> {
    require_platform_admin(&user)?;

    let organization = state.platform_service.get_organization(id).await?;
    Ok(Json(OrganizationResponse::from(organization)))
}

/// Suspend or reactivate a tenant
#[utoipa::path(
    patch,
    path = "/platform/organizations/{id}/status",
    tag = "Platform",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Organization ID")),
    request_body = SetOrganizationStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = OrganizationResponse),
        (status = 403, description = "Platform admin role required"),
        (status = 404, description = "Organization not found")
    )
)]
pub async fn set_organization_status(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetOrganizationStatusRequest>,
) -> AppResult<Json<OrganizationResponse>> {
    require_platform_admin(&user)?;

    let organization = state
        .platform_service
        .set_organization_status(id, payload.status)
        .await?;

    Ok(Json(OrganizationResponse::from(organization)))
}

/// Assign or clear a tenant's subscription plan
#[utoipa::path(
    patch,
    path = "/platform/organizations/{id}/plan",
    tag = "Platform",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Organization ID")),
    request_body = AssignPlanRequest,
    responses(
        (status = 200, description = "Plan assigned", body = OrganizationResponse),
        (status = 403, description = "Platform admin role required"),
        (status = 404, description = "Organization or plan not found")
    )
)]
pub async fn assign_plan(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AssignPlanRequest>,
) -> AppResult<Json<OrganizationResponse>> {
    require_platform_admin(&user)?;

    let organization = state
        .platform_service
        .assign_plan(id, payload.plan_id, payload.billing_cycle)
        .await?;

    Ok(Json(OrganizationResponse::from(organization)))
}

/// Offboard a tenant (soft delete)
#[utoipa::path(
    delete,
    path = "/platform/organizations/{id}",
    tag = "Platform",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Organization ID")),
    responses(
        (status = 204, description = "Organization offboarded"),
        (status = 403, description = "Platform admin role required"),
        (status = 404, description = "Organization not found")
    )
)]
pub async fn offboard(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    require_platform_admin(&user)?;

    state.platform_service.offboard_organization(id).await?;
    Ok(NoContent)
}

/// Restore an offboarded tenant
#[utoipa::path(
    post,
    path = "/platform/organizations/{id}/restore",
    tag = "Platform",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Organization ID")),
    responses(
        (status = 200, description = "Organization restored", body = OrganizationResponse),
        (status = 403, description = "Platform admin role required"),
        (status = 404, description = "Organization not found")
    )
)]
pub async fn restore_organization(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<OrganizationResponse>> {
    require_platform_admin(&user)?;

    let organization = state.platform_service.restore_organization(id).await?;
    Ok(Json(OrganizationResponse::from(organization)))
}

/// Create a subscription plan
#[utoipa::path(
    post,
    path = "/platform/plans",
    tag = "Platform",
    security(("bearer_auth" = [])),
    request_body = CreatePlan,
    responses(
        (status = 201, description = "Plan created", body = SubscriptionPlan),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Platform admin role required")
    )
)]
pub async fn create_plan(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreatePlan>,
) -> AppResult<Created<SubscriptionPlan>> {
    require_platform_admin(&user)?;

    let plan = state.platform_service.create_plan(payload).await?;
    Ok(Created(plan))
}

/// List subscription plans
#[utoipa::path(
    get,
    path = "/platform/plans",
    tag = "Platform",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Plan list"),
        (status = 403, description = "Platform admin role required")
    )
)]
pub async fn list_plans(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<SubscriptionPlan>>> {
    require_platform_admin(&user)?;

    let plans = state.platform_service.list_plans().await?;
    Ok(Json(plans))
}

/// Get a plan by ID
#[utoipa::path(
    get,
    path = "/platform/plans/{id}",
    tag = "Platform",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Plan ID")),
    responses(
        (status = 200, description = "Plan details", body = SubscriptionPlan),
        (status = 403, description = "Platform admin role required"),
        (status = 404, description = "Plan not found")
    )
)]
pub async fn get_plan(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SubscriptionPlan>> {
    require_platform_admin(&user)?;

    let plan = state.platform_service.get_plan(id).await?;
    Ok(Json(plan))
}

/// Update a plan
#[utoipa::path(
    patch,
    path = "/platform/plans/{id}",
    tag = "Platform",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Plan ID")),
    request_body = UpdatePlan,
    responses(
        (status = 200, description = "Plan updated", body = SubscriptionPlan),
        (status = 403, description = "Platform admin role required"),
        (status = 404, description = "Plan not found")
    )
)]
pub async fn update_plan(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdatePlan>,
) -> AppResult<Json<SubscriptionPlan>> {
    require_platform_admin(&user)?;

    let plan = state.platform_service.update_plan(id, payload).await?;
    Ok(Json(plan))
}

/// Delete a plan
#[utoipa::path(
    delete,
    path = "/platform/plans/{id}",
    tag = "Platform",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Plan ID")),
    responses(
        (status = 204, description = "Plan deleted"),
        (status = 403, description = "Platform admin role required"),
        (status = 404, description = "Plan not found")
    )
)]
pub async fn delete_plan(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    require_platform_admin(&user)?;

    state.platform_service.delete_plan(id).await?;
    Ok(NoContent)
}

/// Platform-wide tenant counts and monthly recurring revenue
#[utoipa::path(
    get,
    path = "/platform/stats",
    tag = "Platform",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Platform statistics", body = PlatformStatistics),
        (status = 403, description = "Platform admin role required")
    )
)]
pub async fn platform_statistics(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<PlatformStatistics>> {
    require_platform_admin(&user)?;

    let stats = state.platform_service.statistics().await?;
    Ok(Json(stats))
}
