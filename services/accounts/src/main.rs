use std::sync::Arc;

use accounts::{
    repositories::PgUserStore, routes, service::AccountService, settings::Settings,
    state::AppState,
};
use anyhow::Result;
use common::database::{DatabaseConfig, health_check, init_pool};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting accounts service");

    let settings = Settings::from_env()?;

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    let user_store = PgUserStore::new(pool);
    user_store.migrate().await?;

    let account_service =
        AccountService::with_defaults(Arc::new(user_store), settings.gravatar.clone());
    let app = routes::create_router(AppState::new(account_service));

    let bind_address = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Accounts service listening on {}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
