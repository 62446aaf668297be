//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params, etc.)
//! 2. Performs business logic (database queries, validation)
//! 3. Returns HTTP response (JSON, status code)

/// Registration, login, and logout endpoints
pub mod auth;
/// Business CRUD endpoints
pub mod business;
/// Service health endpoint
pub mod health;
/// Review endpoints, scoped to a business
pub mod reviews;
/// Business name search endpoint
pub mod search;
