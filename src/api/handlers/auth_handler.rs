//! Authentication handlers.

use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{OrganizationResponse, UserResponse};
use crate::errors::AppResult;
use crate::services::TokenResponse;

/// Tenant registration request: a new organization with its first admin
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Organization (mosque/community) name
    #[validate(length(min = 1, message = "Organization name is required"))]
    #[schema(example = "Masjid Al-Noor")]
    pub organization_name: String,
    /// Admin email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "admin@alnoor.org")]
    pub email: String,
    /// Admin password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    /// Admin display name
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Fatima Khan")]
    pub name: String,
}

/// Registration response: the new tenant and its admin account
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub organization: OrganizationResponse,
    pub user: UserResponse,
}

/// Staff login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Staff email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "admin@alnoor.org")]
    pub email: String,
    /// Staff password
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Register a new organization with its first admin account
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Organization registered successfully", body = RegisterResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Organization or user already exists")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let registration = state
        .auth_service
        .register(
            payload.organization_name,
            payload.email,
            payload.password,
            payload.name,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            organization: OrganizationResponse::from(registration.organization),
            user: UserResponse::from(registration.user),
        }),
    ))
}

/// Login and get JWT token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Organization suspended")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state
        .auth_service
        .login(payload.email, payload.password)
        .await?;

    Ok(Json(token))
}
