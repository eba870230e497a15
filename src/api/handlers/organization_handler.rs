//! Organization handlers (tenant-facing profile).

use axum::{
    extract::State,
    response::Json,
    routing::{get, patch},
    Extension, Router,
};

use crate::api::middleware::{org_scope, require_admin, CurrentUser};
use crate::api::AppState;
use crate::domain::{OrganizationResponse, UpdateOrganization};
use crate::errors::AppResult;

/// Create organization routes
pub fn organization_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_organization))
        .route("/", patch(update_organization))
}

/// Get the caller's organization profile
#[utoipa::path(
    get,
    path = "/org",
    tag = "Organization",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Organization profile", body = OrganizationResponse),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Organization not found")
    )
)]
pub async fn get_organization(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<OrganizationResponse>> {
    let organization_id = org_scope(&user)?;
    let organization = state
        .organization_service
        .get_organization(organization_id)
        .await?;

    Ok(Json(OrganizationResponse::from(organization)))
}

/// Update the caller's organization profile (admin only)
#[utoipa::path(
    patch,
    path = "/org",
    tag = "Organization",
    security(("bearer_auth" = [])),
    request_body = UpdateOrganization,
    responses(
        (status = 200, description = "Organization updated", body = OrganizationResponse),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn update_organization(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<UpdateOrganization>,
) -> AppResult<Json<OrganizationResponse>> {
    let organization_id = org_scope(&user)?;
    require_admin(&user)?;

    let organization = state
        .organization_service
        .update_organization(organization_id, payload)
        .await?;

    Ok(Json(OrganizationResponse::from(organization)))
}
