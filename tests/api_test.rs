//! Integration tests for API building blocks.
//!
//! These tests use mock services to exercise API-facing types without
//! requiring actual database or Redis connections.

use async_trait::async_trait;
use axum::http::StatusCode;
use chrono::Utc;
use uuid::Uuid;

use minbar::domain::{
    BillingCycle, CaseStatus, Organization, OrganizationStatus, User, UserRole,
};
use minbar::errors::{AppError, AppResult};
use minbar::services::{AuthService, Claims, Registration, TokenResponse};

// =============================================================================
// Mock Services for Testing
// =============================================================================

/// Mock auth service that returns predefined responses
struct MockAuthService;

fn test_organization(name: &str, slug: &str) -> Organization {
    Organization {
        id: Uuid::new_v4(),
        name: name.to_string(),
        slug: slug.to_string(),
        address: None,
        phone: None,
        status: OrganizationStatus::Active,
        plan_id: None,
        billing_cycle: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        deleted_at: None,
    }
}

#[async_trait]
impl AuthService for MockAuthService {
    async fn register(
        &self,
        organization_name: String,
        email: String,
        _password: String,
        name: String,
    ) -> AppResult<Registration> {
        let organization = test_organization(&organization_name, "mock-slug");
        let user = User {
            id: Uuid::new_v4(),
            email,
            password_hash: "hashed".to_string(),
            name,
            role: UserRole::Admin,
            organization_id: Some(organization.id),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        };

        Ok(Registration { organization, user })
    }

    async fn login(&self, _email: String, _password: String) -> AppResult<TokenResponse> {
        Ok(TokenResponse {
            access_token: "mock-token".to_string(),
            token_type: "Bearer".to_string(),
            expires_in: 86400,
        })
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        if token == "valid-test-token" {
            Ok(Claims {
                sub: Uuid::new_v4(),
                email: "test@example.com".to_string(),
                role: "admin".to_string(),
                org: Some(Uuid::new_v4()),
                exp: Utc::now().timestamp() + 3600,
                iat: Utc::now().timestamp(),
            })
        } else {
            Err(AppError::Unauthorized)
        }
    }
}

// =============================================================================
// Mock Service Tests
// =============================================================================

#[tokio::test]
async fn test_mock_auth_service_register() {
    let service = MockAuthService;
    let result = service
        .register(
            "Masjid An-Noor".to_string(),
            "imam@annoor.org".to_string(),
            "password123".to_string(),
            "Imam Khalid".to_string(),
        )
        .await;

    assert!(result.is_ok());
    let registration = result.unwrap();
    assert_eq!(registration.organization.name, "Masjid An-Noor");
    assert_eq!(registration.user.role, UserRole::Admin);
    assert_eq!(
        registration.user.organization_id,
        Some(registration.organization.id)
    );
}

#[tokio::test]
async fn test_mock_auth_service_verify_token() {
    let service = MockAuthService;

    let claims = service.verify_token("valid-test-token").unwrap();
    assert!(claims.org.is_some());
    assert!(claims.exp > claims.iat);

    let result = service.verify_token("garbage");
    assert!(matches!(result, Err(AppError::Unauthorized)));
}

// =============================================================================
// API Response Type Tests
// =============================================================================

#[tokio::test]
async fn test_api_response_structure() {
    use minbar::types::ApiResponse;

    let response: ApiResponse<String> = ApiResponse::success("test data".to_string());
    assert!(response.success);
    assert!(response.data.is_some());
    assert_eq!(response.data.unwrap(), "test data");
    assert!(response.message.is_none());
}

#[tokio::test]
async fn test_paginated_response_metadata() {
    use minbar::types::Paginated;

    let page = Paginated::new(vec![1, 2, 3], 2, 3, 10);
    assert_eq!(page.data.len(), 3);
    assert_eq!(page.meta.page, 2);
    assert_eq!(page.meta.per_page, 3);
    assert_eq!(page.meta.total, 10);
    assert_eq!(page.meta.total_pages, 4);
}

// =============================================================================
// Domain Model Tests
// =============================================================================

#[tokio::test]
async fn test_user_role_display() {
    assert_eq!(UserRole::Staff.to_string(), "staff");
    assert_eq!(UserRole::Admin.to_string(), "admin");
    assert_eq!(UserRole::PlatformAdmin.to_string(), "platform_admin");
}

#[tokio::test]
async fn test_user_role_from_str() {
    assert_eq!(UserRole::from("admin"), UserRole::Admin);
    assert_eq!(UserRole::from("platform_admin"), UserRole::PlatformAdmin);
    // Unknown values default to the least privileged role
    assert_eq!(UserRole::from("invalid"), UserRole::Staff);
}

#[tokio::test]
async fn test_case_status_terminality() {
    assert!(!CaseStatus::Open.is_terminal());
    assert!(!CaseStatus::InProgress.is_terminal());
    assert!(CaseStatus::Resolved.is_terminal());
    assert!(CaseStatus::Closed.is_terminal());
}

#[tokio::test]
async fn test_organization_active_state() {
    let mut org = test_organization("Masjid An-Noor", "masjid-an-noor");
    assert!(org.is_active());

    org.status = OrganizationStatus::Suspended;
    assert!(!org.is_active());

    org.status = OrganizationStatus::Active;
    org.deleted_at = Some(Utc::now());
    assert!(!org.is_active());
}

#[tokio::test]
async fn test_billing_cycle_roundtrip() {
    assert_eq!(BillingCycle::from("monthly"), BillingCycle::Monthly);
    assert_eq!(BillingCycle::from("yearly"), BillingCycle::Yearly);
    assert_eq!(BillingCycle::Monthly.to_string(), "monthly");
    assert_eq!(BillingCycle::Yearly.to_string(), "yearly");
}

// =============================================================================
// Error Type Tests
// =============================================================================

#[tokio::test]
async fn test_app_error_types() {
    let not_found = AppError::NotFound;
    let unauthorized = AppError::Unauthorized;
    let validation = AppError::validation("invalid field");
    let limit = AppError::limit_reached("Member limit for the current plan reached");

    assert!(matches!(not_found, AppError::NotFound));
    assert!(matches!(unauthorized, AppError::Unauthorized));
    assert!(matches!(validation, AppError::Validation(_)));
    assert!(matches!(limit, AppError::LimitReached(_)));
}

#[tokio::test]
async fn test_app_error_status_codes() {
    use axum::response::IntoResponse;

    let response = AppError::NotFound.into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = AppError::Forbidden.into_response();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Capacity and duplicate errors both surface as conflicts
    let response = AppError::limit_reached("Event is at capacity").into_response();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = AppError::conflict("Organization").into_response();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// =============================================================================
// Password Hashing Tests
// =============================================================================

#[tokio::test]
async fn test_password_hashing() {
    use minbar::domain::Password;

    let plain_password = "secure_password_123";
    let password = Password::new(plain_password).expect("Hashing should succeed");
    let hash = password.into_string();

    assert_ne!(hash.as_str(), plain_password);

    let stored = Password::from_hash(hash);
    assert!(stored.verify(plain_password));
    assert!(!stored.verify("wrong_password"));
}

// =============================================================================
// JWT Claims Tests
// =============================================================================

#[tokio::test]
async fn test_claims_structure() {
    let claims = Claims {
        sub: Uuid::new_v4(),
        email: "test@example.com".to_string(),
        role: "admin".to_string(),
        org: Some(Uuid::new_v4()),
        exp: Utc::now().timestamp() + 3600,
        iat: Utc::now().timestamp(),
    };

    assert!(!claims.email.is_empty());
    assert!(claims.exp > claims.iat);
}

#[tokio::test]
async fn test_platform_admin_claims_have_no_org() {
    let claims = Claims {
        sub: Uuid::new_v4(),
        email: "ops@example.com".to_string(),
        role: "platform_admin".to_string(),
        org: None,
        exp: Utc::now().timestamp() + 3600,
        iat: Utc::now().timestamp(),
    };

    let json = serde_json::to_string(&claims).unwrap();
    // The org claim is omitted entirely for platform admins
    assert!(!json.contains("\"org\""));
}
