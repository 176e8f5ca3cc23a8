//! Data structures for authentication-related entities.
//!
//! This module defines the session roles, the login and registration payloads
//! for admins and customers, and the session view returned to the client.

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Role carried by a session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Customer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "ADMIN"),
            Role::Customer => write!(f, "CUSTOMER"),
        }
    }
}

/// Admin registration payload
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterAdminRequest {
    #[validate(length(
        min = 3,
        max = 255,
        message = "Username must be between 3-255 characters"
    ))]
    pub username: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

impl RegisterAdminRequest {
    /// Trims the username so the length rule applies to the stored value.
    pub fn normalized(mut self) -> Self {
        self.username = self.username.trim().to_string();
        self
    }
}

/// Admin login request payload
#[derive(Debug, Deserialize, Validate)]
pub struct AdminLoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Customer login request payload
#[derive(Debug, Deserialize, Validate)]
pub struct CustomerLoginRequest {
    #[serde(rename = "mobileNo")]
    #[validate(length(min = 1, message = "Mobile number is required"))]
    pub mobile_no: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// The authenticated principal, as seen by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub id: String,
    pub role: Role,
    #[serde(rename = "customerId", skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
}

/// Issued token plus the session it encodes. The token itself only travels in the cookie.
#[derive(Debug)]
pub struct LoginOutcome {
    pub token: String,
    /// Token lifetime, reused as the cookie's max age
    pub expires_in_seconds: u64,
    pub session: SessionInfo,
}

/// Public view of a freshly registered account.
#[derive(Debug, Serialize)]
pub struct RegisteredAccount {
    pub id: String,
    pub role: Role,
}
