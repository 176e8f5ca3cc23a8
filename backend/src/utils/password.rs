//! Password hashing helpers shared by admin and customer accounts.
//!
//! bcrypt is CPU bound, so both helpers run on tokio's blocking pool.

use crate::errors::{ServiceError, ServiceResult};
use bcrypt::{hash, verify};
use tokio::task;

/// Hashes a password before storing it in the database.
///
/// # Arguments
/// * `password` - Plain text password to hash
/// * `cost` - bcrypt work factor
///
/// # Errors
/// Returns `ServiceError` if hashing fails
pub async fn hash_password(password: &str, cost: u32) -> ServiceResult<String> {
    let password = password.to_owned();
    task::spawn_blocking(move || hash(password, cost))
        .await
        .map_err(|e| ServiceError::internal_error(format!("Password hashing task failed: {}", e)))?
        .map_err(|e| ServiceError::internal_error(format!("Password hashing failed: {}", e)))
}

/// Verifies a password against the stored hash.
///
/// # Returns
/// `true` if password matches hash, `false` otherwise
pub async fn verify_password(password: &str, hash: &str) -> ServiceResult<bool> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    task::spawn_blocking(move || verify(password, &hash))
        .await
        .map_err(|e| {
            ServiceError::internal_error(format!("Password verification task failed: {}", e))
        })?
        .map_err(|e| ServiceError::internal_error(format!("Password verification failed: {}", e)))
}
