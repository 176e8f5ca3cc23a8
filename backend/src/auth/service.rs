//! Core business logic for the authentication system.

use crate::auth::models::*;
use crate::config::Config;
use crate::database::models::{CreateAdmin, CreateNewCustomer};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::admin_repository::AdminRepository;
use crate::repositories::customer_repository::CustomerRepository;
use crate::repositories::is_unique_violation;
use crate::services::customer_service::CustomerService;
use crate::utils::jwt::JwtUtils;
use crate::utils::new_id;
use crate::utils::password::{hash_password, verify_password};
use sqlx::SqlitePool;
use tracing::{info, warn};
use validator::Validate;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Authentication service for registration, login and token generation
pub struct AuthService<'a> {
    pool: &'a SqlitePool,
    config: &'a Config,
    jwt_utils: JwtUtils,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService instance
    pub fn new(pool: &'a SqlitePool, config: &'a Config) -> Self {
        AuthService {
            pool,
            config,
            jwt_utils: JwtUtils::new(config),
        }
    }

    /// Register a new administrator
    pub async fn register_admin(
        &self,
        request: RegisterAdminRequest,
    ) -> ServiceResult<RegisteredAccount> {
        let request = request.normalized();
        request.validate()?;

        let username = request.username.clone();
        let repo = AdminRepository::new(self.pool);

        if repo.username_exists(&username).await? {
            return Err(ServiceError::already_exists("Admin", &username));
        }

        let password_hash = hash_password(&request.password, self.config.bcrypt_cost).await?;

        let admin = repo
            .create_admin(CreateAdmin {
                id: new_id(),
                username: username.clone(),
                password_hash,
            })
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    ServiceError::already_exists("Admin", &username)
                } else {
                    ServiceError::from(e)
                }
            })?;

        info!("Admin registered: {}", admin.id);

        Ok(RegisteredAccount {
            id: admin.id,
            role: Role::Admin,
        })
    }

    /// Register a new customer (self-service)
    pub async fn register_customer(
        &self,
        request: CreateNewCustomer,
    ) -> ServiceResult<RegisteredAccount> {
        let customer = CustomerService::new(self.pool, self.config)
            .create_customer(request)
            .await?;

        Ok(RegisteredAccount {
            id: customer.id,
            role: Role::Customer,
        })
    }

    /// Authenticate an administrator and issue a session token
    pub async fn login_admin(&self, request: AdminLoginRequest) -> ServiceResult<LoginOutcome> {
        request.validate()?;

        let repo = AdminRepository::new(self.pool);
        let admin = repo
            .get_admin_by_username(request.username.trim())
            .await?
            .ok_or_else(|| {
                warn!("Admin login failed: unknown username");
                ServiceError::unauthorized(INVALID_CREDENTIALS)
            })?;

        if !verify_password(&request.password, &admin.password_hash).await? {
            warn!("Admin login failed: wrong password for {}", admin.id);
            return Err(ServiceError::unauthorized(INVALID_CREDENTIALS));
        }

        let token = self.jwt_utils.generate_admin_token(admin.id.clone())?;
        info!("Admin logged in: {}", admin.id);

        Ok(LoginOutcome {
            token,
            expires_in_seconds: self.jwt_utils.expires_in_seconds(),
            session: SessionInfo {
                id: admin.id,
                role: Role::Admin,
                customer_id: None,
            },
        })
    }

    /// Authenticate a customer and issue a session token scoped to them
    pub async fn login_customer(
        &self,
        request: CustomerLoginRequest,
    ) -> ServiceResult<LoginOutcome> {
        request.validate()?;

        let repo = CustomerRepository::new(self.pool);
        let customer = repo
            .get_customer_by_mobile_no(request.mobile_no.trim())
            .await?
            .ok_or_else(|| {
                warn!("Customer login failed: unknown mobile number");
                ServiceError::unauthorized(INVALID_CREDENTIALS)
            })?;

        if !verify_password(&request.password, &customer.password_hash).await? {
            warn!("Customer login failed: wrong password for {}", customer.id);
            return Err(ServiceError::unauthorized(INVALID_CREDENTIALS));
        }

        let token = self
            .jwt_utils
            .generate_customer_token(customer.id.clone())?;
        info!("Customer logged in: {}", customer.id);

        Ok(LoginOutcome {
            token,
            expires_in_seconds: self.jwt_utils.expires_in_seconds(),
            session: SessionInfo {
                id: customer.id.clone(),
                role: Role::Customer,
                customer_id: Some(customer.id),
            },
        })
    }
}
