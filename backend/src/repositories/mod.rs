//! Database repositories, one per table.
//!
//! Repositories borrow the shared pool, run plain SQL and return
//! `anyhow::Result`; business rules live in `crate::services`.

pub mod admin_repository;
pub mod customer_repository;
pub mod event_repository;

/// Returns `true` when the error comes from a UNIQUE constraint violation.
pub fn is_unique_violation(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .is_some_and(|db_error| db_error.is_unique_violation())
}
