//! Module for core business logic services.
//!
//! Services validate requests, enforce ownership rules for the session, and
//! orchestrate the repositories.

pub mod customer_service;
pub mod event_service;
