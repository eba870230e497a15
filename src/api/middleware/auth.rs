//! JWT authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::UserRole;
use crate::errors::AppError;

/// Authenticated staff account extracted from JWT token
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
    /// Tenant the account belongs to; absent for platform admins
    pub organization_id: Option<Uuid>,
}

impl CurrentUser {
    /// Check if account has platform-wide privileges.
    pub fn is_platform_admin(&self) -> bool {
        self.role.is_platform_admin()
    }

    /// Check if account administers its organization.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// JWT authentication middleware.
///
/// Extracts and validates the JWT token from the Authorization header,
/// then injects the CurrentUser into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::Unauthorized)?;

    let claims = state.auth_service.verify_token(token)?;

    let current_user = CurrentUser {
        id: claims.sub,
        email: claims.email,
        role: UserRole::from(claims.role.as_str()),
        organization_id: claims.org,
    };

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}

/// The tenant a request is scoped to.
///
/// Every tenant route requires an organization-bound account; platform
/// admins use the /platform routes instead.
pub fn org_scope(user: &CurrentUser) -> Result<Uuid, AppError> {
    user.organization_id.ok_or(AppError::Forbidden)
}

/// Require organization admin role, returns Forbidden error otherwise.
pub fn require_admin(user: &CurrentUser) -> Result<(), AppError> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Require the platform admin role, returns Forbidden error otherwise.
pub fn require_platform_admin(user: &CurrentUser) -> Result<(), AppError> {
    if user.is_platform_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}
