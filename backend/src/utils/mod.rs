//! Collection of general utility functions.
//!
//! Small, reusable helpers that do not belong to a single domain module:
//! session tokens, password hashing and identifier generation.

use uuid::Uuid;

pub mod jwt;
pub mod password;

/// Generates a new time-ordered identifier for a database row.
pub fn new_id() -> String {
    Uuid::now_v7().to_string()
}
