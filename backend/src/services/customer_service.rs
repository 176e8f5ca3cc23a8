//! Customer business logic service.
//!
//! Handles customer registration and the customer list shown in the event
//! form's picker.

use crate::config::Config;
use crate::database::models::{CreateCustomer, CreateNewCustomer, Customer, CustomerRef};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::customer_repository::CustomerRepository;
use crate::repositories::is_unique_violation;
use crate::utils::jwt::Claims;
use crate::utils::new_id;
use crate::utils::password::hash_password;
use sqlx::SqlitePool;
use tracing::info;
use validator::Validate;

/// Service layer for customer operations.
pub struct CustomerService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
    config: &'a Config,
}

impl<'a> CustomerService<'a> {
    /// Creates a new CustomerService instance.
    pub fn new(pool: &'a SqlitePool, config: &'a Config) -> Self {
        Self { pool, config }
    }

    /// Registers a new customer.
    ///
    /// # Errors
    /// Returns `ServiceError` for:
    /// - Validation failures
    /// - A mobile number that is already registered
    pub async fn create_customer(&self, request: CreateNewCustomer) -> ServiceResult<Customer> {
        let request = request.normalized();
        request.validate()?;

        let repo = CustomerRepository::new(self.pool);
        let mobile_no = request.mobile_no.clone();

        if repo.mobile_no_exists(&mobile_no).await? {
            return Err(ServiceError::already_exists("Customer", &mobile_no));
        }

        let password_hash = hash_password(&request.password, self.config.bcrypt_cost).await?;

        let customer = repo
            .create_customer(CreateCustomer {
                id: new_id(),
                name: request.name,
                mobile_no: mobile_no.clone(),
                password_hash,
            })
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    ServiceError::already_exists("Customer", &mobile_no)
                } else {
                    ServiceError::from(e)
                }
            })?;

        info!("Customer registered: {}", customer.id);
        Ok(customer)
    }

    /// Retrieves a customer by ID, returning an error if not found.
    pub async fn get_customer_required(&self, id: &str) -> ServiceResult<Customer> {
        let repo = CustomerRepository::new(self.pool);
        let customer = repo
            .get_customer_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Customer", id))?;
        Ok(customer)
    }

    /// Lists the customers visible to the session: all for admins, only
    /// themselves for customers.
    pub async fn combo(&self, claims: &Claims) -> ServiceResult<Vec<CustomerRef>> {
        let repo = CustomerRepository::new(self.pool);
        let refs = if claims.is_admin() {
            repo.list_customer_refs(None).await?
        } else {
            repo.list_customer_refs(claims.customer_id()).await?
        };
        Ok(refs)
    }
}
