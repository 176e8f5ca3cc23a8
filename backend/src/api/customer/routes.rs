//! Defines the HTTP routes for customer management.

use super::handlers::{create_customer, get_customer_combo};
use crate::auth::middleware::{admin_only, session_guard};
use axum::{
    Router, middleware,
    routing::{get, post},
};

pub fn customer_router() -> Router {
    Router::new()
        .route(
            "/create",
            post(create_customer).layer(middleware::from_fn(admin_only)),
        )
        .route("/combo", get(get_customer_combo))
        .layer(middleware::from_fn(session_guard))
}
