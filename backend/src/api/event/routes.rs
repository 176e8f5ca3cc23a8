//! Defines the HTTP routes for event management.

use super::handlers::{create_event, delete_event, get_event_by_id, get_events};
use crate::auth::middleware::session_guard;
use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

pub fn event_router() -> Router {
    Router::new()
        .route("/", delete(delete_event))
        .route("/create", post(create_event))
        .route("/all", get(get_events))
        .route("/{id}", get(get_event_by_id))
        .layer(middleware::from_fn(session_guard))
}
