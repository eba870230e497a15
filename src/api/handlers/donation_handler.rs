//! Donation handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Extension, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{org_scope, CurrentUser};
use crate::api::AppState;
use crate::domain::{CreateDonation, Donation, DonationSummary, Fund};
use crate::errors::AppResult;
use crate::types::{Created, NoContent, Paginated, PaginationParams};

/// Donation list query parameters
#[derive(Debug, Deserialize)]
pub struct DonationListQuery {
    /// Filter by fund
    pub fund: Option<Fund>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

/// Summary period query parameters
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Create donation routes
pub fn donation_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_donations).post(record_donation))
        .route("/summary", get(donation_summary))
        .route("/:id", get(get_donation).delete(delete_donation))
}

/// Record a donation; omit member_id for anonymous contributions
#[utoipa::path(
    post,
    path = "/donations",
    tag = "Donations",
    security(("bearer_auth" = [])),
    request_body = CreateDonation,
    responses(
        (status = 201, description = "Donation recorded", body = Donation),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Member not found")
    )
)]
pub async fn record_donation(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateDonation>,
) -> AppResult<Created<Donation>> {
    let organization_id = org_scope(&user)?;
    let donation = state
        .donation_service
        .record_donation(organization_id, payload)
        .await?;

    Ok(Created(donation))
}

/// List donations with pagination and optional fund filter
#[utoipa::path(
    get,
    path = "/donations",
    tag = "Donations",
    security(("bearer_auth" = [])),
    params(
        PaginationParams,
        ("fund" = Option<Fund>, Query, description = "Filter by fund")
    ),
    responses(
        (status = 200, description = "Paginated donation list"),
        (status = 401, description = "Authentication required")
    )
)]
pub async fn list_donations(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<DonationListQuery>,
) -> AppResult<Json<Paginated<Donation>>> {
    let organization_id = org_scope(&user)?;
    let (donations, total) = state
        .donation_service
        .list_donations(organization_id, &query.pagination, query.fund)
        .await?;

    Ok(Json(Paginated::from_params(
        donations,
        &query.pagination,
        total,
    )))
}

/// Per-fund donation totals over an optional date range
#[utoipa::path(
    get,
    path = "/donations/summary",
    tag = "Donations",
    security(("bearer_auth" = [])),
    params(
        ("from" = Option<NaiveDate>, Query, description = "Start date (inclusive)"),
        ("to" = Option<NaiveDate>, Query, description = "End date (inclusive)")
    ),
    responses(
        (status = 200, description = "Donation summary", body = DonationSummary),
        (status = 401, description = "Authentication required")
    )
)]
pub async fn donation_summary(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<SummaryQuery>,
) -> AppResult<Json<DonationSummary>> {
    let organization_id = org_scope(&user)?;
    let summary = state
        .donation_service
        .summary(organization_id, query.from, query.to)
        .await?;

    Ok(Json(summary))
}

/// Get a donation by ID
#[utoipa::path(
    get,
    path = "/donations/{id}",
    tag = "Donations",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Donation ID")),
    responses(
        (status = 200, description = "Donation details", body = Donation),
        (status = 404, description = "Donation not found")
    )
)]
pub async fn get_donation(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Donation>> {
    let organization_id = org_scope(&user)?;
    let donation = state
        .donation_service
        .get_donation(organization_id, id)
        .await?;

    Ok(Json(donation))
}

/// Delete a donation record
#[utoipa::path(
    delete,
    path = "/donations/{id}",
    tag = "Donations",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Donation ID")),
    responses(
        (status = 204, description = "Donation deleted"),
        (status = 404, description = "Donation not found")
    )
)]
pub async fn delete_donation(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    let organization_id = org_scope(&user)?;
    state
        .donation_service
        .delete_donation(organization_id, id)
        .await?;

    Ok(NoContent)
}
