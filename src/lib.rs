//! Business Directory API library.
//!
//! A REST API server for a business directory: user accounts with bearer
//! token sessions, CRUD over business listings with ownership checks,
//! substring search, and per-business reviews.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx (async queries)
//! - **Authentication**: HS256 JWTs with a revocation blacklist
//! - **Passwords**: Argon2id hashes
//! - **Format**: JSON requests/responses
//!
//! The crate root exposes [`AppState`] and [`build_router`] so the binary
//! and the integration tests construct the exact same application.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod validate;

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{config::Config, db::DbPool};

/// Shared application state handed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub pool: DbPool,

    /// Loaded configuration (JWT secret, token lifetime, ...)
    pub config: Config,
}

/// Build the full application router.
///
/// # Route Groups
///
/// - **Public**: health check, register, login, business reads, search,
///   review listing
/// - **Authenticated**: logout, business mutations, review creation —
///   all behind the bearer token middleware
///
/// Layers applied to everything: request tracing and permissive CORS,
/// matching a browser-facing JSON API.
pub fn build_router(state: AppState) -> Router {
    // Routes behind the bearer token middleware
    let authenticated_routes = Router::new()
        .route("/api/v1/logout", post(handlers::auth::logout))
        .route("/api/v1/business", post(handlers::business::create_business))
        .route(
            "/api/v1/business/{id}",
            put(handlers::business::update_business),
        )
        .route(
            "/api/v1/business/{id}",
            delete(handlers::business::delete_business),
        )
        .route(
            "/api/v1/business/{id}/reviews",
            post(handlers::reviews::create_review),
        )
        // Apply authentication middleware to all routes in this group
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::auth_middleware,
        ));

    Router::new()
        // Public routes (no authentication required)
        .route("/health", get(handlers::health::health_check))
        .route("/api/v1/register", post(handlers::auth::register))
        .route("/api/v1/login", post(handlers::auth::login))
        .route("/api/v1/business", get(handlers::business::list_businesses))
        .route("/api/v1/business/{id}", get(handlers::business::get_business))
        .route("/api/v1/search", get(handlers::search::search_businesses))
        .route(
            "/api/v1/business/{id}/reviews",
            get(handlers::reviews::list_reviews),
        )
        // Merge authenticated routes
        .merge(authenticated_routes)
        // Add tracing middleware for observability
        .layer(TraceLayer::new_for_http())
        // Browser clients hit this API cross-origin
        .layer(CorsLayer::permissive())
        // Share state with all handlers via State extraction
        .with_state(state)
}
