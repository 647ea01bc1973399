//! Route Assembly
//! Mission: Wire public, protected, and auth endpoints into one router

use crate::auth::{api as auth_api, auth_middleware, AuthState, JwtHandler};
use crate::catalog::{api as catalog_api, CatalogState};
use axum::{
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the application router.
///
/// Three groups, merged: the public surface (health, book browsing, login),
/// user management and catalog mutations behind the auth gate. The same
/// `JwtHandler` drives token issuance (login) and verification (gate).
pub fn create_router(
    auth_state: AuthState,
    catalog_state: CatalogState,
    jwt_handler: Arc<JwtHandler>,
) -> Router {
    // Login issues tokens; it is itself public
    let auth_router = Router::new()
        .route("/auth/login", post(auth_api::login))
        .with_state(auth_state.clone());

    // Protected user management routes
    let user_routes = Router::new()
        .route("/users", post(auth_api::create_user))
        .route("/users/:id/password", put(auth_api::change_password))
        .route("/users/:id", delete(auth_api::delete_user))
        .route_layer(middleware::from_fn_with_state(
            jwt_handler.clone(),
            auth_middleware,
        ))
        .with_state(auth_state);

    // Protected catalog mutation routes
    let book_routes = Router::new()
        .route("/books", post(catalog_api::create_book))
        .route(
            "/books/:id",
            put(catalog_api::update_book).delete(catalog_api::delete_book),
        )
        .route_layer(middleware::from_fn_with_state(
            jwt_handler,
            auth_middleware,
        ))
        .with_state(catalog_state.clone());

    // Public routes (health check + book browsing)
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/books", get(catalog_api::list_books))
        .route("/books/search", get(catalog_api::search_books))
        .with_state(catalog_state);

    Router::new()
        .merge(public_routes)
        .merge(user_routes)
        .merge(book_routes)
        .merge(auth_router)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Health check endpoint
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
