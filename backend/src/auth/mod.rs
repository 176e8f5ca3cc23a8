//! Authentication module for admin and customer sessions.
//!
//! This module provides the public interface for registration, login,
//! session cookies, and the middleware that guards protected routes.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
