//! Middleware for protecting authenticated routes and handling authorization.
//!
//! The session guard reads the signed `token` cookie, verifies the cookie
//! signature and the JWT inside it, and makes the decoded [`Claims`]
//! available to handlers through request extensions.

use crate::api::common::{ApiError, error_body};
use crate::config::Config;
use crate::utils::jwt::{Claims, JwtUtils};
use axum::{
    extract::{Extension, Request},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use tower_cookies::{Cookies, Key};
use tracing::debug;

/// Name of the cookie holding the session token.
pub const SESSION_COOKIE: &str = "token";

fn unauthorized(message: &str) -> ApiError {
    (
        StatusCode::UNAUTHORIZED,
        error_body(message, "unauthorized", None),
    )
}

/// Session cookie authentication middleware
pub async fn session_guard(
    Extension(config): Extension<Config>,
    Extension(key): Extension<Key>,
    cookies: Cookies,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // A cookie whose signature does not verify is treated as absent
    let token = cookies
        .signed(&key)
        .get(SESSION_COOKIE)
        .ok_or_else(|| unauthorized("Authentication required"))?;

    let claims = JwtUtils::new(&config)
        .validate_token(token.value())
        .map_err(|e| {
            debug!("Rejected session token: {}", e);
            unauthorized("Invalid or expired session")
        })?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Admin role authorization middleware. Must run after [`session_guard`].
pub async fn admin_only(request: Request, next: Next) -> Result<Response, ApiError> {
    let claims = request
        .extensions()
        .get::<Claims>()
        .ok_or_else(|| unauthorized("Authentication required"))?;

    if !claims.is_admin() {
        return Err((
            StatusCode::FORBIDDEN,
            error_body("Admin access required", "permission_denied", None),
        ));
    }

    Ok(next.run(request).await)
}
