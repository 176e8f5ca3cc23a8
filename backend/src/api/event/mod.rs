//! Module for event booking API endpoints.
//!
//! This module handles creating, listing, retrieving and deleting events.

pub mod handlers;
pub mod routes;
