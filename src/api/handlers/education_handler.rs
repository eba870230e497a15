//! Class and enrollment handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Extension, Router,
};
use uuid::Uuid;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{org_scope, CurrentUser};
use crate::api::AppState;
use crate::domain::{Class, CreateClass, EnrollRequest, Enrollment, UpdateClass};
use crate::errors::AppResult;
use crate::types::{Created, NoContent, Paginated, PaginationParams};

/// Create education routes
pub fn education_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_classes).post(create_class))
        .route(
            "/:id",
            get(get_class).patch(update_class).delete(delete_class),
        )
        .route("/:id/enrollments", get(list_enrollments).post(enroll))
        .route("/:id/enrollments/:member_id", axum::routing::delete(withdraw))
}

/// Create a new class
#[utoipa::path(
    post,
    path = "/classes",
    tag = "Education",
    security(("bearer_auth" = [])),
    request_body = CreateClass,
    responses(
        (status = 201, description = "Class created", body = Class),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_class(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateClass>,
) -> AppResult<Created<Class>> {
    let organization_id = org_scope(&user)?;
    let class = state
        .education_service
        .create_class(organization_id, payload)
        .await?;

    Ok(Created(class))
}

/// List classes with pagination
#[utoipa::path(
    get,
    path = "/classes",
    tag = "Education",
    security(("bearer_auth" = [])),
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated class list"),
        (status = 401, description = "Authentication required")
    )
)]
pub async fn list_classes(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<Class>>> {
    let organization_id = org_scope(&user)?;
    let (classes, total) = state
        .education_service
        .list_classes(organization_id, &params)
        .await?;

    Ok(Json(Paginated::from_params(classes, &params, total)))
}

/// Get a class by ID
#[utoipa::path(
    get,
    path = "/classes/{id}",
    tag = "Education",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Class details", body = Class),
        (status = 404, description = "Class not found")
    )
)]
pub async fn get_class(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Class>> {
    let organization_id = org_scope(&user)?;
    let class = state
        .education_service
        .get_class(organization_id, id)
        .await?;

    Ok(Json(class))
}

/// Update a class
#[utoipa::path(
    patch,
    path = "/classes/{id}",
    tag = "Education",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Class ID")),
    request_body = UpdateClass,
    responses(
        (status = 200, description = "Class updated", body = Class),
        (status = 404, description = "Class not found")
    )
)]
pub async fn update_class(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateClass>,
) -> AppResult<Json<Class>> {
    let organization_id = org_scope(&user)?;
    let class = state
        .education_service
        .update_class(organization_id, id, payload)
        .await?;

    Ok(Json(class))
}

/// Delete a class and its enrollments
#[utoipa::path(
    delete,
    path = "/classes/{id}",
    tag = "Education",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Class ID")),
    responses(
        (status = 204, description = "Class deleted"),
        (status = 404, description = "Class not found")
    )
)]
pub async fn delete_class(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    let organization_id = org_scope(&user)?;
    state
        .education_service
        .delete_class(organization_id, id)
        .await?;

    Ok(NoContent)
}

/// Enroll a member into a class
#[utoipa::path(
    post,
    path = "/classes/{id}/enrollments",
    tag = "Education",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Class ID")),
    request_body = EnrollRequest,
    responses(
        (status = 201, description = "Member enrolled", body = Enrollment),
        (status = 404, description = "Class or member not found"),
        (status = 409, description = "Class full or member already enrolled")
    )
)]
pub async fn enroll(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<EnrollRequest>,
) -> AppResult<Created<Enrollment>> {
    let organization_id = org_scope(&user)?;
    let enrollment = state
        .education_service
        .enroll(organization_id, id, payload.member_id)
        .await?;

    Ok(Created(enrollment))
}

/// Withdraw a member from a class
#[utoipa::path(
    delete,
    path = "/classes/{id}/enrollments/{member_id}",
    tag = "Education",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Class ID"),
        ("member_id" = Uuid, Path, description = "Member ID")
    ),
    responses(
        (status = 204, description = "Member withdrawn"),
        (status = 404, description = "Enrollment not found")
    )
)]
pub async fn withdraw(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path((id, member_id)): Path<(Uuid, Uuid)>,
) -> AppResult<NoContent> {
    let organization_id = org_scope(&user)?;
    state
        .education_service
        .withdraw(organization_id, id, member_id)
        .await?;

    Ok(NoContent)
}

/// List enrollments of a class
#[utoipa::path(
    get,
    path = "/classes/{id}/enrollments",
    tag = "Education",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Enrollment list"),
        (status = 404, description = "Class not found")
    )
)]
pub async fn list_enrollments(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<Enrollment>>> {
    let organization_id = org_scope(&user)?;
    let enrollments = state
        .education_service
        .list_enrollments(organization_id, id)
        .await?;

    Ok(Json(enrollments))
}
