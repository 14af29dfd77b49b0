//! Access-token authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::errors::AppError;

/// Authenticated user extracted from the access token
#[derive(Clone, Copy, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
}

/// Access-token authentication middleware.
///
/// Decrypts the bearer token from the Authorization header back into the
/// user id it was issued for, then injects a `CurrentUser` into the
/// request extensions.
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

    let user_id = state.encrypter.decrypt(token)?;

    request.extensions_mut().insert(CurrentUser { id: user_id });

    Ok(next.run(request).await)
}
