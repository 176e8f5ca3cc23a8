//! Handler functions for authentication-related API endpoints.
//!
//! These functions process incoming HTTP requests for admin and customer
//! registration, login and logout, parse request data, and interact with the
//! `auth::service` for core business logic. Successful logins set the signed
//! session cookie.

use crate::api::common::{ApiError, ApiResponse, JsonBody, service_error_to_http};
use crate::auth::middleware::SESSION_COOKIE;
use crate::auth::models::*;
use crate::auth::service::AuthService;
use crate::config::Config;
use crate::database::models::CreateNewCustomer;
use crate::utils::jwt::Claims;
use axum::{
    extract::Extension,
    http::StatusCode,
    response::Json as ResponseJson,
};
use sqlx::SqlitePool;
use time::Duration;
use tower_cookies::{
    Cookie, Cookies, Key,
    cookie::SameSite,
};

/// Handle admin registration request
#[axum::debug_handler]
pub async fn register_admin(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    JsonBody(payload): JsonBody<RegisterAdminRequest>,
) -> Result<(StatusCode, ResponseJson<ApiResponse<RegisteredAccount>>), ApiError> {
    let auth_service = AuthService::new(&pool, &config);

    match auth_service.register_admin(payload).await {
        Ok(account) => Ok((
            StatusCode::CREATED,
            ResponseJson(ApiResponse::success(account, "Admin registered successfully")),
        )),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle customer self-registration request
#[axum::debug_handler]
pub async fn register_customer(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    JsonBody(payload): JsonBody<CreateNewCustomer>,
) -> Result<(StatusCode, ResponseJson<ApiResponse<RegisteredAccount>>), ApiError> {
    let auth_service = AuthService::new(&pool, &config);

    match auth_service.register_customer(payload).await {
        Ok(account) => Ok((
            StatusCode::CREATED,
            ResponseJson(ApiResponse::success(
                account,
                "Customer registered successfully",
            )),
        )),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle admin login request
#[axum::debug_handler]
pub async fn login_admin(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    Extension(key): Extension<Key>,
    cookies: Cookies,
    JsonBody(payload): JsonBody<AdminLoginRequest>,
) -> Result<ResponseJson<ApiResponse<SessionInfo>>, ApiError> {
    let auth_service = AuthService::new(&pool, &config);

    let outcome = auth_service
        .login_admin(payload)
        .await
        .map_err(service_error_to_http)?;

    set_session_cookie(&cookies, &key, &config, outcome.token, outcome.expires_in_seconds);

    Ok(ResponseJson(ApiResponse::success(
        outcome.session,
        "Logged in successfully",
    )))
}

/// Handle customer login request
#[axum::debug_handler]
pub async fn login_customer(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    Extension(key): Extension<Key>,
    cookies: Cookies,
    JsonBody(payload): JsonBody<CustomerLoginRequest>,
) -> Result<ResponseJson<ApiResponse<SessionInfo>>, ApiError> {
    let auth_service = AuthService::new(&pool, &config);

    let outcome = auth_service
        .login_customer(payload)
        .await
        .map_err(service_error_to_http)?;

    set_session_cookie(&cookies, &key, &config, outcome.token, outcome.expires_in_seconds);

    Ok(ResponseJson(ApiResponse::success(
        outcome.session,
        "Logged in successfully",
    )))
}

/// Handle logout request by clearing the session cookie
#[axum::debug_handler]
pub async fn logout(cookies: Cookies) -> ResponseJson<ApiResponse<()>> {
    cookies.remove(Cookie::build((SESSION_COOKIE, "")).path("/").build());
    ResponseJson(ApiResponse::message("Logged out successfully"))
}

/// Get the current session from the verified cookie
#[axum::debug_handler]
pub async fn session(Extension(claims): Extension<Claims>) -> ResponseJson<ApiResponse<SessionInfo>> {
    ResponseJson(ApiResponse::ok(claims.session_info()))
}

fn set_session_cookie(
    cookies: &Cookies,
    key: &Key,
    config: &Config,
    token: String,
    expires_in_seconds: u64,
) {
    let cookie = Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::seconds(expires_in_seconds as i64))
        .build();

    cookies.signed(key).add(cookie);
}
