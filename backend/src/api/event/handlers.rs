//! Handler functions for event management API endpoints.

use crate::api::common::{ApiError, ApiResponse, JsonBody, service_error_to_http};
use crate::config::Config;
use crate::database::models::{CreateNewEvent, EventResponse};
use crate::errors::ServiceError;
use crate::services::event_service::EventService;
use crate::utils::jwt::Claims;
use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::Json as ResponseJson,
};
use serde::Deserialize;
use sqlx::SqlitePool;

#[derive(Debug, Deserialize)]
pub struct DeleteEventQuery {
    pub id: Option<String>,
}

/// Creates an event.
#[axum::debug_handler]
pub async fn create_event(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    Extension(claims): Extension<Claims>,
    JsonBody(payload): JsonBody<CreateNewEvent>,
) -> Result<(StatusCode, ResponseJson<ApiResponse<()>>), ApiError> {
    let service = EventService::new(&pool, &config);

    service
        .create_event(&claims, payload)
        .await
        .map_err(service_error_to_http)?;

    Ok((
        StatusCode::CREATED,
        ResponseJson(ApiResponse::message("Event created successfully")),
    ))
}

/// Retrieves the events visible to the session as a bare array.
#[axum::debug_handler]
pub async fn get_events(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    Extension(claims): Extension<Claims>,
) -> Result<ResponseJson<Vec<EventResponse>>, ApiError> {
    let service = EventService::new(&pool, &config);

    let events = service
        .list_events(&claims)
        .await
        .map_err(service_error_to_http)?;

    Ok(ResponseJson(events))
}

/// Retrieves a specific event by ID.
#[axum::debug_handler]
pub async fn get_event_by_id(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<ResponseJson<ApiResponse<EventResponse>>, ApiError> {
    let service = EventService::new(&pool, &config);

    let event = service
        .get_event(&claims, &id)
        .await
        .map_err(service_error_to_http)?;

    Ok(ResponseJson(ApiResponse::success(
        event,
        "Event retrieved successfully",
    )))
}

/// Deletes the event named by the `id` query parameter.
#[axum::debug_handler]
pub async fn delete_event(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<DeleteEventQuery>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let id = query
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| service_error_to_http(ServiceError::validation("Event id is required")))?;

    let service = EventService::new(&pool, &config);

    service
        .delete_event(&claims, &id)
        .await
        .map_err(service_error_to_http)?;

    Ok(ResponseJson(ApiResponse::message("Event deleted successfully")))
}
