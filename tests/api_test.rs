//! API-facing behavior tests.
//!
//! These tests use mock services and direct response conversion to check
//! the HTTP contract without requiring a database connection.

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use uuid::Uuid;

use accounts_api::domain::{UserRecord, UserVisibleData};
use accounts_api::errors::{AppError, AppResult, ValidationError};
use accounts_api::services::{AccountService, UpdateUserData, UserService};

// =============================================================================
// Mock Services
// =============================================================================

/// Mock account service that returns predefined responses
struct MockAccountService;

fn visible(id: Uuid, name: String, email: String) -> UserVisibleData {
    UserVisibleData {
        id,
        name,
        email,
        access_token: "mock-token".to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[async_trait]
impl AccountService for MockAccountService {
    async fn sign_up(
        &self,
        name: String,
        email: String,
        _password: String,
    ) -> AppResult<UserVisibleData> {
        Ok(visible(Uuid::new_v4(), name, email))
    }

    async fn external_sign_in(&self, name: String, email: String) -> AppResult<UserVisibleData> {
        Ok(visible(Uuid::new_v4(), name, email))
    }
}

/// Mock user service for testing
struct MockUserService;

#[async_trait]
impl UserService for MockUserService {
    async fn get_user(&self, id: Uuid) -> AppResult<UserVisibleData> {
        Ok(visible(id, "Test User".to_string(), "test@example.com".to_string()))
    }

    async fn list_users(&self) -> AppResult<Vec<UserVisibleData>> {
        Ok(vec![
            visible(Uuid::new_v4(), "User One".to_string(), "user1@example.com".to_string()),
            visible(Uuid::new_v4(), "User Two".to_string(), "user2@example.com".to_string()),
        ])
    }

    async fn update_user(&self, id: Uuid, data: UpdateUserData) -> AppResult<UserVisibleData> {
        Ok(visible(
            id,
            data.name.unwrap_or_else(|| "Updated User".to_string()),
            data.email.unwrap_or_else(|| "test@example.com".to_string()),
        ))
    }
}

// =============================================================================
// Mock Service Behavior
// =============================================================================

#[tokio::test]
async fn mock_services_satisfy_the_traits() {
    let accounts = MockAccountService;
    let users = MockUserService;

    let created = accounts
        .sign_up("Jo".to_string(), "jo@x.com".to_string(), "abc123".to_string())
        .await
        .unwrap();
    assert_eq!(created.email, "jo@x.com");

    let listed = users.list_users().await.unwrap();
    assert_eq!(listed.len(), 2);
}

// =============================================================================
// Error-to-Status Mapping
// =============================================================================

#[tokio::test]
async fn validation_errors_map_to_bad_request() {
    let response =
        AppError::Validation(ValidationError::InvalidEmail("broken".to_string())).into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn existing_user_maps_to_conflict() {
    let response = AppError::UserAlreadyExists.into_response();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn non_existing_user_maps_to_not_found() {
    let response = AppError::UserNotFound.into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_token_maps_to_unauthorized() {
    let response = AppError::Unauthorized.into_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn foreign_target_maps_to_forbidden() {
    let response = AppError::Forbidden.into_response();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn infrastructure_failures_map_to_server_error() {
    let response = AppError::IdGenerationExhausted.into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = AppError::internal("boom").into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn conflict_body_leaks_no_detail() {
    let response = AppError::UserAlreadyExists.into_response();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["error"]["code"], "EXISTING_USER");
    assert_eq!(body["error"]["message"], "User already exists");
}

// =============================================================================
// Response Shape
// =============================================================================

#[tokio::test]
async fn visible_data_serializes_without_password_hash() {
    let record = UserRecord {
        id: Uuid::new_v4(),
        name: "Jo".to_string(),
        email: "jo@x.com".to_string(),
        password_hash: Some("$argon2id$v=19$secret".to_string()),
        access_token: "token".to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    let json = serde_json::to_value(UserVisibleData::from(record)).unwrap();

    assert!(json.get("password_hash").is_none());
    for field in ["id", "name", "email", "access_token", "created_at", "updated_at"] {
        assert!(json.get(field).is_some(), "missing field {field}");
    }
}
