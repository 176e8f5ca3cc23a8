//! Handler functions for customer management API endpoints.

use crate::api::common::{ApiError, ApiResponse, JsonBody, service_error_to_http};
use crate::auth::models::{RegisteredAccount, Role};
use crate::config::Config;
use crate::database::models::{CreateNewCustomer, CustomerRef};
use crate::services::customer_service::CustomerService;
use crate::utils::jwt::Claims;
use axum::{
    extract::Extension,
    http::StatusCode,
    response::Json as ResponseJson,
};
use sqlx::SqlitePool;

/// Creates a customer on behalf of an admin.
#[axum::debug_handler]
pub async fn create_customer(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    JsonBody(payload): JsonBody<CreateNewCustomer>,
) -> Result<(StatusCode, ResponseJson<ApiResponse<RegisteredAccount>>), ApiError> {
    let service = CustomerService::new(&pool, &config);

    let customer = service
        .create_customer(payload)
        .await
        .map_err(service_error_to_http)?;

    Ok((
        StatusCode::CREATED,
        ResponseJson(ApiResponse::success(
            RegisteredAccount {
                id: customer.id,
                role: Role::Customer,
            },
            "Customer created successfully",
        )),
    ))
}

/// Lists `{c_id, mobileNo}` pairs for the customer picker.
#[axum::debug_handler]
pub async fn get_customer_combo(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    Extension(claims): Extension<Claims>,
) -> Result<ResponseJson<ApiResponse<Vec<CustomerRef>>>, ApiError> {
    let service = CustomerService::new(&pool, &config);

    let customers = service
        .combo(&claims)
        .await
        .map_err(service_error_to_http)?;

    Ok(ResponseJson(ApiResponse::success(
        customers,
        "Customers retrieved successfully",
    )))
}
