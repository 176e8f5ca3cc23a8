//! Database repository for customer records.
//!
//! Customers own events; other resources only ever see them through
//! [`CustomerRef`].

use crate::database::models::{CreateCustomer, Customer, CustomerRef};
use anyhow::Result;
use sqlx::SqlitePool;

/// Repository for customer database operations.
pub struct CustomerRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> CustomerRepository<'a> {
    /// Creates a new CustomerRepository instance.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a new customer in the database.
    pub async fn create_customer(&self, customer: CreateCustomer) -> Result<Customer> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (id, name, mobile_no, password_hash)
            VALUES (?, ?, ?, ?)
            RETURNING id, name, mobile_no, password_hash
            "#,
        )
        .bind(customer.id)
        .bind(customer.name)
        .bind(customer.mobile_no)
        .bind(customer.password_hash)
        .fetch_one(self.pool)
        .await?;

        Ok(customer)
    }

    /// Retrieves a customer by ID.
    pub async fn get_customer_by_id(&self, id: &str) -> Result<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            "SELECT id, name, mobile_no, password_hash FROM customers WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(customer)
    }

    /// Retrieves a customer by mobile number, the customer login identifier.
    pub async fn get_customer_by_mobile_no(&self, mobile_no: &str) -> Result<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, mobile_no, password_hash
            FROM customers WHERE mobile_no = ?
            "#,
        )
        .bind(mobile_no)
        .fetch_optional(self.pool)
        .await?;

        Ok(customer)
    }

    /// Checks if a mobile number is already registered.
    pub async fn mobile_no_exists(&self, mobile_no: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers WHERE mobile_no = ?")
            .bind(mobile_no)
            .fetch_one(self.pool)
            .await?;

        Ok(count > 0)
    }

    /// Lists customers for the event form's picker, optionally restricted to one customer.
    pub async fn list_customer_refs(&self, only_id: Option<&str>) -> Result<Vec<CustomerRef>> {
        let refs = match only_id {
            Some(id) => {
                sqlx::query_as::<_, CustomerRef>(
                    "SELECT id AS c_id, mobile_no FROM customers WHERE id = ?",
                )
                .bind(id)
                .fetch_all(self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, CustomerRef>(
                    "SELECT id AS c_id, mobile_no FROM customers ORDER BY mobile_no",
                )
                .fetch_all(self.pool)
                .await?
            }
        };

        Ok(refs)
    }
}
