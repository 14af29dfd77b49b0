//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, user_handler};
use crate::domain::UserVisibleData;

/// OpenAPI documentation for the Accounts API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Accounts API",
        version = "0.1.0",
        description = "User-account backend: registration, external sign-in, profile update and reads",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Account endpoints
        auth_handler::sign_up,
        auth_handler::external_sign_in,
        // User endpoints
        user_handler::list_users,
        user_handler::get_current_user,
        user_handler::get_user,
        user_handler::update_user,
    ),
    components(
        schemas(
            UserVisibleData,
            auth_handler::SignUpRequest,
            auth_handler::ExternalSignInRequest,
            user_handler::UpdateUserRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Accounts", description = "Registration and sign-in"),
        (name = "Users", description = "User reads and profile updates")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for bearer access tokens
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token issued on sign-up or sign-in"))
                        .build(),
                ),
            );
        }
    }
}
