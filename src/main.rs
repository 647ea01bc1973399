//! Bookshelf - Catalog Management Backend
//! Mission: Book catalog CRUD behind JWT bearer authentication

use anyhow::{Context, Result};
use bookshelf_backend::{
    auth::{AuthState, JwtHandler, UserStore},
    catalog::{BookStore, CatalogState},
    config::Config,
    routes::create_router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    // Fails fast on a missing signing secret - there is no safe default
    let config = Config::from_env()?;

    info!("📚 Bookshelf backend starting");

    let user_store = Arc::new(UserStore::new(&config.database_path, config.bcrypt_cost)?);
    let book_store = Arc::new(BookStore::new(&config.database_path)?);
    let jwt_handler = Arc::new(JwtHandler::new(
        config.jwt_secret.clone(),
        config.token_ttl_hours,
    ));

    let auth_state = AuthState::new(user_store, jwt_handler.clone());
    let catalog_state = CatalogState::new(book_store);

    let app = create_router(auth_state, catalog_state, jwt_handler);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("🎯 API server listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Initialize tracing with env-filter support
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookshelf_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
