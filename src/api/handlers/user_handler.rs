//! User read and update handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::UserVisibleData;
use crate::errors::{AppError, AppResult};
use crate::services::UpdateUserData;

/// Partial profile update request; any subset of fields may be supplied
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    /// New display name
    #[schema(example = "Jo")]
    pub name: Option<String>,
    /// New email address
    #[schema(example = "jo@x.com")]
    pub email: Option<String>,
    /// New password (minimum 6 characters, at least one digit)
    #[schema(example = "abc123", min_length = 6)]
    pub password: Option<String>,
}

impl From<UpdateUserRequest> for UpdateUserData {
    fn from(request: UpdateUserRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            password: request.password,
        }
    }
}

/// Create user routes (all behind the auth middleware)
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/me", get(get_current_user))
        .route("/:id", get(get_user).patch(update_user))
}

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All users", body = [UserVisibleData]),
        (status = 401, description = "Authentication required")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<UserVisibleData>>> {
    let users = state.user_service.list_users().await?;
    Ok(Json(users))
}

/// Get the authenticated user
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = UserVisibleData),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_current_user(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<UserVisibleData>> {
    let user = state.user_service.get_user(current_user.id).await?;
    Ok(Json(user))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserVisibleData),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserVisibleData>> {
    let user = state.user_service.get_user(id).await?;
    Ok(Json(user))
}

/// Update a user's profile.
///
/// A token only authorizes updates to the account it was issued for.
#[utoipa::path(
    patch,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserVisibleData),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Token does not match target user"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> AppResult<Json<UserVisibleData>> {
    if current_user.id != id {
        return Err(AppError::Forbidden);
    }

    let user = state
        .user_service
        .update_user(id, UpdateUserData::from(payload))
        .await?;

    Ok(Json(user))
}
