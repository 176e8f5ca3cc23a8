//! Database repository for admin accounts.

use crate::database::models::{Admin, CreateAdmin};
use anyhow::Result;
use sqlx::SqlitePool;

/// Repository for admin database operations.
pub struct AdminRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> AdminRepository<'a> {
    /// Creates a new AdminRepository instance.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a new admin in the database.
    ///
    /// # Returns
    /// The newly created Admin with all fields populated
    pub async fn create_admin(&self, admin: CreateAdmin) -> Result<Admin> {
        let admin = sqlx::query_as::<_, Admin>(
            r#"
            INSERT INTO admins (id, username, password_hash)
            VALUES (?, ?, ?)
            RETURNING id, username, password_hash
            "#,
        )
        .bind(admin.id)
        .bind(admin.username)
        .bind(admin.password_hash)
        .fetch_one(self.pool)
        .await?;

        Ok(admin)
    }

    /// Retrieves an admin by username.
    ///
    /// # Returns
    /// `Some(Admin)` if found, `None` otherwise
    pub async fn get_admin_by_username(&self, username: &str) -> Result<Option<Admin>> {
        let admin = sqlx::query_as::<_, Admin>(
            "SELECT id, username, password_hash FROM admins WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(admin)
    }

    /// Checks if a username is already taken.
    pub async fn username_exists(&self, username: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admins WHERE username = ?")
            .bind(username)
            .fetch_one(self.pool)
            .await?;

        Ok(count > 0)
    }
}
