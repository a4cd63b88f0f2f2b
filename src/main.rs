use rusty_library_app::{
    adapters::{memory::InMemoryStore, postgres::PostgresStore},
    api::{handlers::AppState, router::create_router},
    application::ServiceDependencies,
    config::Config,
    ports::UnitOfWork,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rusty_library_app=debug,tower_http=debug,axum=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Initialize store
    let store: Arc<dyn UnitOfWork> = match &config.database_url {
        Some(database_url) => {
            tracing::info!("Connecting to database");

            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(database_url)
                .await?;

            sqlx::migrate!("./migrations").run(&pool).await?;

            Arc::new(PostgresStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL is not set, using in-memory store");
            Arc::new(InMemoryStore::new())
        }
    };

    // Create application state
    let app_state = Arc::new(AppState {
        service_deps: ServiceDependencies { store },
    });

    // Create router
    let app = create_router(app_state);

    // Start server
    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
