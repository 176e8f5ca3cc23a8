//! Defines the HTTP routes specifically for authentication.
//!
//! These routes handle admin and customer registration and login, logout,
//! and the current-session lookup. They are designed to be nested into the
//! main Axum router.

use crate::auth::handlers::*;
use crate::auth::middleware::session_guard;
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// Creates the authentication router with all auth-related routes
pub fn auth_router() -> Router {
    Router::new()
        .route("/", get(session).layer(middleware::from_fn(session_guard)))
        .route("/admin/register", post(register_admin))
        .route("/admin/login", post(login_admin))
        .route("/customer/register", post(register_customer))
        .route("/customer/login", post(login_customer))
        .route("/logout", post(logout))
}
