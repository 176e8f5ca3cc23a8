//! Module for customer management API endpoints.
//!
//! This module handles admin-side customer creation and the customer list
//! used by the event form.

pub mod handlers;
pub mod routes;
