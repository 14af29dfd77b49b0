//! Sign-up and external sign-in handlers.
//!
//! Requests carry raw strings; all validation happens in the service
//! layer through the domain value objects.

use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::AppState;
use crate::domain::UserVisibleData;
use crate::errors::AppResult;

/// Account registration request
#[derive(Debug, Deserialize, ToSchema)]
pub struct SignUpRequest {
    /// User display name
    #[schema(example = "Jo")]
    pub name: String,
    /// User email address
    #[schema(example = "jo@x.com")]
    pub email: String,
    /// User password (minimum 6 characters, at least one digit)
    #[schema(example = "abc123", min_length = 6)]
    pub password: String,
}

/// External sign-in request (identity established by an external provider)
#[derive(Debug, Deserialize, ToSchema)]
pub struct ExternalSignInRequest {
    /// User display name
    #[schema(example = "Jo")]
    pub name: String,
    /// User email address
    #[schema(example = "jo@x.com")]
    pub email: String,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/sign-up", post(sign_up))
        .route("/external-sign-in", post(external_sign_in))
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/auth/sign-up",
    tag = "Accounts",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Account created", body = UserVisibleData),
        (status = 400, description = "Validation error"),
        (status = 409, description = "User already exists")
    )
)]
pub async fn sign_up(
    State(state): State<AppState>,
    Json(payload): Json<SignUpRequest>,
) -> AppResult<(StatusCode, Json<UserVisibleData>)> {
    let user = state
        .account_service
        .sign_up(payload.name, payload.email, payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Sign in an externally-authenticated user, rotating the access token
#[utoipa::path(
    post,
    path = "/auth/external-sign-in",
    tag = "Accounts",
    request_body = ExternalSignInRequest,
    responses(
        (status = 200, description = "Signed in, token rotated", body = UserVisibleData),
        (status = 400, description = "Validation error")
    )
)]
pub async fn external_sign_in(
    State(state): State<AppState>,
    Json(payload): Json<ExternalSignInRequest>,
) -> AppResult<Json<UserVisibleData>> {
    let user = state
        .account_service
        .external_sign_in(payload.name, payload.email)
        .await?;

    Ok(Json(user))
}
