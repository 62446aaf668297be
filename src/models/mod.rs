//! Data models representing database entities.
//!
//! This module contains all data structures that map to database tables.

/// Revoked token model
pub mod blacklist_token;
/// Business listing model
pub mod business;
/// Business review model
pub mod review;
/// User account model
pub mod user;
