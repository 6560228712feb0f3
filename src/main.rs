//! Student API server: reads settings from the environment (and `.env`), prepares the
//! store, and serves the API.

use std::sync::Arc;
use student_api::{
    app, ensure_database_exists, ensure_students_table, AppState, Backend, MemoryStudentStore, PgStudentStore,
    Settings, StudentStore,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("student_api=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let store: Arc<dyn StudentStore> = match &settings.backend {
        Backend::Postgres(database_url) => {
            ensure_database_exists(database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(settings.max_connections)
                .connect(database_url)
                .await?;
            ensure_students_table(&pool).await?;
            tracing::info!(max_connections = settings.max_connections, "using postgres store");
            Arc::new(PgStudentStore::new(pool))
        }
        Backend::Memory => {
            tracing::info!("using in-memory store");
            Arc::new(MemoryStudentStore::new())
        }
    };

    let state = AppState { store };
    let router = app(state, settings.body_limit_bytes);

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
