// src/main.rs

use std::{sync::Arc, time::Duration};

use content_cleaner::{
    config::Config,
    repository::{MemoryStore, PgStore, UserStore},
    routes,
    state::{AppState, SharedContentStore, SharedUserStore},
    utils::{hash::hash_password, jwt::ADMIN_ROLE},
};
use dotenvy::dotenv;
use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file (if present)
    dotenv().ok();

    let config = Config::from_env()?;

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    let (content, users): (SharedContentStore, SharedUserStore) = match &config.database_url {
        Some(database_url) => {
            let pool = connect_with_retry(database_url).await?;

            tracing::info!("Running migrations...");
            sqlx::migrate!("./migrations").run(&pool).await?;
            tracing::info!("Migrations applied successfully.");

            let store = Arc::new(PgStore::new(pool));
            let content: SharedContentStore = store.clone();
            let users: SharedUserStore = store;
            (content, users)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using the in-memory store; data is lost on exit");
            let store = Arc::new(MemoryStore::with_defaults());
            let content: SharedContentStore = store.clone();
            let users: SharedUserStore = store;
            (content, users)
        }
    };

    if let Err(e) = seed_admin_user(users.as_ref(), &config).await {
        tracing::error!("Failed to seed admin user: {}", e);
    }

    tracing::info!(
        "Attribute stripping policy: {}",
        config.attribute_policy
    );

    let addr = config.listen_addr;
    let state = AppState::new(content, users, config);
    let app = routes::create_router(state);

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn connect_with_retry(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let mut retry_count = 0;
    loop {
        match PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(database_url)
            .await
        {
            Ok(pool) => {
                tracing::info!("Database connected...");
                return Ok(pool);
            }
            Err(e) if retry_count < 5 => {
                retry_count += 1;
                tracing::warn!(
                    "Database not ready ({}), retrying in 2s... (Attempt {})",
                    e,
                    retry_count
                );
                tokio::time::sleep(Duration::from_secs(2)).await;
            }
            Err(e) => return Err(e),
        }
    }
}

async fn seed_admin_user(
    users: &dyn UserStore,
    config: &Config,
) -> Result<(), content_cleaner::error::AppError> {
    if let (Some(username), Some(password)) = (&config.admin_username, &config.admin_password) {
        if users.find_user_by_username(username).await?.is_none() {
            tracing::info!("Seeding admin user: {}", username);
            let hashed_password = hash_password(password)?;
            users
                .create_user(username, &hashed_password, ADMIN_ROLE)
                .await?;
            tracing::info!("Admin user created successfully.");
        }
    }
    Ok(())
}
