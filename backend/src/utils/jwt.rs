//! JWT token utilities for session authentication.
//!
//! Provides token creation, validation, and claims access for admin and
//! customer sessions. Tokens travel inside the signed session cookie.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::auth::models::{Role, SessionInfo};
use crate::config::Config;
use crate::errors::ServiceError;

/// JWT Claims structure identifying the session principal
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// Admin or customer ID
    pub sub: String,
    /// Session role
    pub role: Role,
    /// Customer the session is scoped to (customer sessions only)
    #[serde(rename = "customerId", default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    /// Token expiration timestamp
    pub exp: usize,
    /// Token issued at timestamp
    pub iat: usize,
}

/// JWT token utility for creating and validating tokens
pub struct JwtUtils {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expires_in_seconds: u64,
}

impl JwtUtils {
    /// Create a new JwtUtils instance from the application config
    pub fn new(config: &Config) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        JwtUtils {
            encoding_key,
            decoding_key,
            validation,
            expires_in_seconds: config.jwt_expires_in_seconds,
        }
    }

    /// Token lifetime in seconds
    pub fn expires_in_seconds(&self) -> u64 {
        self.expires_in_seconds
    }

    /// Generate an admin session token
    pub fn generate_admin_token(&self, admin_id: String) -> Result<String, ServiceError> {
        self.generate_token(admin_id, Role::Admin, None)
    }

    /// Generate a customer session token scoped to that customer
    pub fn generate_customer_token(&self, customer_id: String) -> Result<String, ServiceError> {
        self.generate_token(customer_id.clone(), Role::Customer, Some(customer_id))
    }

    fn generate_token(
        &self,
        subject: String,
        role: Role,
        customer_id: Option<String>,
    ) -> Result<String, ServiceError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.expires_in_seconds as i64);

        let claims = Claims {
            sub: subject,
            role,
            customer_id,
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        self.encode_claims(&claims)
    }

    pub(crate) fn encode_claims(&self, claims: &Claims) -> Result<String, ServiceError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| ServiceError::internal_error(format!("Token generation failed: {}", e)))
    }

    /// Validate and decode a JWT token
    pub fn validate_token(&self, token: &str) -> Result<Claims, ServiceError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| ServiceError::unauthorized(format!("Token validation failed: {}", e)))?;

        // Customer tokens must carry their scope; admin tokens must not.
        match (claims.role, &claims.customer_id) {
            (Role::Customer, Some(_)) | (Role::Admin, None) => Ok(claims),
            _ => Err(ServiceError::unauthorized("Token scope is inconsistent")),
        }
    }
}

impl Claims {
    pub fn user_id(&self) -> &str {
        &self.sub
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn customer_id(&self) -> Option<&str> {
        self.customer_id.as_deref()
    }

    /// Check if user is admin
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Whether this session may act on data owned by `customer_id`.
    pub fn can_access_customer(&self, customer_id: &str) -> bool {
        match self.role {
            Role::Admin => true,
            Role::Customer => self.customer_id() == Some(customer_id),
        }
    }

    pub fn session_info(&self) -> SessionInfo {
        SessionInfo {
            id: self.sub.clone(),
            role: self.role,
            customer_id: self.customer_id.clone(),
        }
    }
}
