//! Central module for organizing the application's HTTP API.
//!
//! Each resource lives in its own module with `routes.rs` and `handlers.rs`;
//! authentication routes are defined in `crate::auth`. [`app_router`]
//! assembles them and attaches the shared state.

pub mod common;
pub mod customer;
pub mod event;

use crate::api::common::ApiResponse;
use crate::auth;
use crate::config::Config;
use axum::{Extension, Router, response::Json, routing::get};
use sqlx::SqlitePool;
use tower_cookies::{CookieManagerLayer, Key};

/// Builds the application router with shared state attached as extensions.
pub fn app_router(pool: SqlitePool, config: Config, cookie_key: Key) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .nest("/auth", auth::routes::auth_router())
        .nest("/customer", customer::routes::customer_router())
        .nest("/event", event::routes::event_router())
        .layer(CookieManagerLayer::new())
        .layer(Extension(cookie_key))
        .layer(Extension(config))
        .layer(Extension(pool))
}

async fn root_handler() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(
        serde_json::json!({
            "service": "Event Booking Backend",
            "version": env!("CARGO_PKG_VERSION")
        }),
        "Server is running",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_config, test_pool};
    use axum::{
        body::Body,
        http::{HeaderMap, Request, StatusCode, header},
    };
    use chrono::{Duration, Utc};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    struct TestApp {
        router: Router,
    }

    struct TestResponse {
        status: StatusCode,
        headers: HeaderMap,
        body: Value,
    }

    impl TestApp {
        async fn new() -> Self {
            let config = test_config();
            let key = config.cookie_key().unwrap();
            let pool = test_pool().await;
            Self {
                router: app_router(pool, config, key),
            }
        }

        async fn send(
            &self,
            method: &str,
            uri: &str,
            cookie: Option<&str>,
            body: Option<Value>,
        ) -> TestResponse {
            let mut builder = Request::builder().method(method).uri(uri);
            if let Some(cookie) = cookie {
                builder = builder.header(header::COOKIE, cookie);
            }
            let request = match body {
                Some(body) => builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };

            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let headers = response.headers().clone();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

            TestResponse {
                status,
                headers,
                body,
            }
        }

        async fn admin_cookie(&self) -> String {
            let registered = self
                .send(
                    "POST",
                    "/auth/admin/register",
                    None,
                    Some(json!({ "username": "root", "password": "secret123" })),
                )
                .await;
            assert_eq!(registered.status, StatusCode::CREATED);

            let login = self
                .send(
                    "POST",
                    "/auth/admin/login",
                    None,
                    Some(json!({ "username": "root", "password": "secret123" })),
                )
                .await;
            assert_eq!(login.status, StatusCode::OK);
            let set_cookie = login.headers[header::SET_COOKIE].to_str().unwrap();
            assert!(set_cookie.contains("Max-Age=3600"), "{set_cookie}");
            session_cookie(&login.headers)
        }

        async fn customer_cookie(&self, mobile_no: &str) -> (String, String) {
            let registered = self
                .send(
                    "POST",
                    "/auth/customer/register",
                    None,
                    Some(json!({ "name": "Ada", "mobileNo": mobile_no, "password": "secret123" })),
                )
                .await;
            assert_eq!(registered.status, StatusCode::CREATED);
            let id = registered.body["data"]["id"].as_str().unwrap().to_string();

            let login = self
                .send(
                    "POST",
                    "/auth/customer/login",
                    None,
                    Some(json!({ "mobileNo": mobile_no, "password": "secret123" })),
                )
                .await;
            assert_eq!(login.status, StatusCode::OK);
            (id, session_cookie(&login.headers))
        }
    }

    /// Extracts `token=<value>` from the Set-Cookie headers.
    fn session_cookie(headers: &HeaderMap) -> String {
        headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find(|value| value.starts_with("token="))
            .and_then(|value| value.split(';').next())
            .map(str::to_string)
            .expect("No session cookie returned")
    }

    fn future_date(days: i64) -> String {
        (Utc::now() + Duration::days(days))
            .format("%Y-%m-%d")
            .to_string()
    }

    fn event_body(title: &str, customer_id: &str) -> Value {
        json!({
            "title": title,
            "date": future_date(7),
            "cust": { "c_id": customer_id },
            "opts": { "hall": true, "dining": false, "decorations": true }
        })
    }

    #[tokio::test]
    async fn test_root() {
        let app = TestApp::new().await;
        let response = app.send("GET", "/", None, None).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["success"], true);
        assert_eq!(response.body["message"], "Server is running");
    }

    #[tokio::test]
    async fn test_protected_routes_require_session() {
        let app = TestApp::new().await;

        for (method, uri) in [
            ("GET", "/auth"),
            ("GET", "/event/all"),
            ("GET", "/event/some-id"),
            ("DELETE", "/event?id=some-id"),
            ("GET", "/customer/combo"),
        ] {
            let response = app.send(method, uri, None, None).await;
            assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{method} {uri}");
            assert_eq!(response.body["error"]["error_type"], "unauthorized");
            assert_eq!(response.headers[header::CONTENT_TYPE], "application/json");
        }

        let response = app
            .send("POST", "/event/create", None, Some(event_body("x", "y")))
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_tampered_or_unsigned_cookie_rejected() {
        let app = TestApp::new().await;
        let cookie = app.admin_cookie().await;

        let mut tampered = cookie.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });
        let response = app.send("GET", "/auth", Some(&tampered), None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);

        let config = test_config();
        let jwt = crate::utils::jwt::JwtUtils::new(&config);
        let raw = jwt.generate_admin_token("forged".to_string()).unwrap();
        let unsigned = format!("token={}", raw);
        let response = app.send("GET", "/auth", Some(&unsigned), None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_admin_event_lifecycle() {
        let app = TestApp::new().await;
        let admin = app.admin_cookie().await;

        let session = app.send("GET", "/auth", Some(&admin), None).await;
        assert_eq!(session.status, StatusCode::OK);
        assert_eq!(session.body["data"]["role"], "ADMIN");
        assert!(session.body["data"].get("customerId").is_none());

        let customer = app
            .send(
                "POST",
                "/customer/create",
                Some(&admin),
                Some(json!({ "name": "Grace", "mobileNo": "5559876543", "password": "secret123" })),
            )
            .await;
        assert_eq!(customer.status, StatusCode::CREATED);
        let customer_id = customer.body["data"]["id"].as_str().unwrap().to_string();

        let combo = app.send("GET", "/customer/combo", Some(&admin), None).await;
        assert_eq!(combo.status, StatusCode::OK);
        assert_eq!(combo.body["data"][0]["c_id"], customer_id.as_str());
        assert_eq!(combo.body["data"][0]["mobileNo"], "5559876543");

        let created = app
            .send(
                "POST",
                "/event/create",
                Some(&admin),
                Some(event_body("Wedding", &customer_id)),
            )
            .await;
        assert_eq!(created.status, StatusCode::CREATED);
        assert_eq!(created.body["message"], "Event created successfully");

        let all = app.send("GET", "/event/all", Some(&admin), None).await;
        assert_eq!(all.status, StatusCode::OK);
        let events = all.body.as_array().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["title"], "Wedding");
        assert_eq!(events[0]["cust"]["mobileNo"], "5559876543");
        assert_eq!(events[0]["opts"]["decorations"], true);
        let event_id = events[0]["_id"].as_str().unwrap().to_string();

        let one = app
            .send("GET", &format!("/event/{}", event_id), Some(&admin), None)
            .await;
        assert_eq!(one.status, StatusCode::OK);
        assert_eq!(one.body["data"]["title"], "Wedding");
        assert_eq!(one.body["data"]["cust"]["c_id"], customer_id.as_str());

        let deleted = app
            .send("DELETE", &format!("/event?id={}", event_id), Some(&admin), None)
            .await;
        assert_eq!(deleted.status, StatusCode::OK);

        let gone = app
            .send("GET", &format!("/event/{}", event_id), Some(&admin), None)
            .await;
        assert_eq!(gone.status, StatusCode::NOT_FOUND);
        assert_eq!(gone.body["error"]["error_type"], "not_found");
    }

    #[tokio::test]
    async fn test_customer_sees_only_own_events() {
        let app = TestApp::new().await;
        let admin = app.admin_cookie().await;
        let (ada_id, ada) = app.customer_cookie("5551110000").await;
        let (bob_id, bob) = app.customer_cookie("5552220000").await;

        let own = app
            .send("POST", "/event/create", Some(&ada), Some(event_body("Ada's", &ada_id)))
            .await;
        assert_eq!(own.status, StatusCode::CREATED);

        let foreign = app
            .send("POST", "/event/create", Some(&ada), Some(event_body("Not Ada's", &bob_id)))
            .await;
        assert_eq!(foreign.status, StatusCode::FORBIDDEN);

        let by_admin = app
            .send("POST", "/event/create", Some(&admin), Some(event_body("Bob's", &bob_id)))
            .await;
        assert_eq!(by_admin.status, StatusCode::CREATED);

        let ada_events = app.send("GET", "/event/all", Some(&ada), None).await;
        let ada_events = ada_events.body.as_array().unwrap().clone();
        assert_eq!(ada_events.len(), 1);
        assert_eq!(ada_events[0]["title"], "Ada's");

        let all = app.send("GET", "/event/all", Some(&admin), None).await;
        assert_eq!(all.body.as_array().unwrap().len(), 2);

        let bob_events = app.send("GET", "/event/all", Some(&bob), None).await;
        let bob_event_id = bob_events.body[0]["_id"].as_str().unwrap().to_string();

        let peek = app
            .send("GET", &format!("/event/{}", bob_event_id), Some(&ada), None)
            .await;
        assert_eq!(peek.status, StatusCode::NOT_FOUND);

        let combo = app.send("GET", "/customer/combo", Some(&ada), None).await;
        let combo = combo.body["data"].as_array().unwrap().clone();
        assert_eq!(combo.len(), 1);
        assert_eq!(combo[0]["c_id"], ada_id.as_str());

        let session = app.send("GET", "/auth", Some(&ada), None).await;
        assert_eq!(session.body["data"]["role"], "CUSTOMER");
        assert_eq!(session.body["data"]["customerId"], ada_id.as_str());
    }

    #[tokio::test]
    async fn test_customer_cannot_create_customers() {
        let app = TestApp::new().await;
        let (_, ada) = app.customer_cookie("5551110000").await;

        let response = app
            .send(
                "POST",
                "/customer/create",
                Some(&ada),
                Some(json!({ "name": "Eve", "mobileNo": "5553330000", "password": "secret123" })),
            )
            .await;
        assert_eq!(response.status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_invalid_event_rejected_with_details() {
        let app = TestApp::new().await;
        let admin = app.admin_cookie().await;

        let response = app
            .send(
                "POST",
                "/event/create",
                Some(&admin),
                Some(json!({
                    "title": "",
                    "date": (Utc::now() - Duration::days(2)).to_rfc3339(),
                    "cust": { "c_id": "whoever" }
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);

        let fields: Vec<&str> = response.body["error"]["details"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, vec!["date", "title"]);
    }

    #[tokio::test]
    async fn test_blank_text_is_rejected() {
        let app = TestApp::new().await;
        let admin = app.admin_cookie().await;
        let (customer_id, _) = app.customer_cookie("5550001111").await;

        let response = app
            .send(
                "POST",
                "/event/create",
                Some(&admin),
                Some(json!({
                    "title": "   ",
                    "date": (Utc::now() + Duration::days(5)).to_rfc3339(),
                    "cust": { "c_id": customer_id }
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["error"]["details"][0]["field"], "title");

        let listed = app.send("GET", "/event/all", Some(&admin), None).await;
        assert_eq!(listed.body, json!([]));

        let response = app
            .send(
                "POST",
                "/auth/admin/register",
                None,
                Some(json!({ "username": "  ab  ", "password": "secret123" })),
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unreadable_bodies_use_error_envelope() {
        let app = TestApp::new().await;
        let admin = app.admin_cookie().await;
        let (customer_id, _) = app.customer_cookie("5550002222").await;

        let payloads = [
            json!({
                "title": "Gala",
                "date": "next tuesday",
                "cust": { "c_id": customer_id }
            }),
            json!({
                "title": "Gala",
                "date": (Utc::now() + Duration::days(5)).to_rfc3339()
            }),
        ];

        for payload in payloads {
            let response = app
                .send("POST", "/event/create", Some(&admin), Some(payload))
                .await;
            assert_eq!(response.status, StatusCode::BAD_REQUEST);
            assert_eq!(response.body["success"], false);
            assert_eq!(response.body["error"]["error_type"], "validation_error");
            assert_eq!(
                response.headers[header::CONTENT_TYPE],
                "application/json"
            );
        }

        let request = Request::builder()
            .method("POST")
            .uri("/auth/customer/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
    }

    #[tokio::test]
    async fn test_delete_requires_id() {
        let app = TestApp::new().await;
        let admin = app.admin_cookie().await;

        let response = app.send("DELETE", "/event", Some(&admin), None).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);

        let response = app
            .send("DELETE", "/event?id=missing", Some(&admin), None)
            .await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_login_failures_and_duplicates() {
        let app = TestApp::new().await;
        app.admin_cookie().await;

        let wrong = app
            .send(
                "POST",
                "/auth/admin/login",
                None,
                Some(json!({ "username": "root", "password": "wrong-pass" })),
            )
            .await;
        assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
        assert!(wrong.headers.get(header::SET_COOKIE).is_none());

        let duplicate = app
            .send(
                "POST",
                "/auth/admin/register",
                None,
                Some(json!({ "username": "root", "password": "secret123" })),
            )
            .await;
        assert_eq!(duplicate.status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_logout_clears_cookie() {
        let app = TestApp::new().await;
        let admin = app.admin_cookie().await;

        let response = app.send("POST", "/auth/logout", Some(&admin), None).await;
        assert_eq!(response.status, StatusCode::OK);

        let cleared = response
            .headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find(|value| value.starts_with("token="))
            .expect("logout should reset the session cookie");
        assert!(cleared.contains("Max-Age=0"));
    }
}
