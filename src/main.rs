//! Student CRUD server. Reads settings from the environment (and `.env`), prepares the
//! store, and serves the student routes.

use student_crud::{
    app, ensure_database_exists, ensure_student_table, AppState, MemoryStudentStore, PgStudentStore, Settings,
    StoreKind, StudentStore,
};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("student_crud=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;

    let store: Arc<dyn StudentStore> = match settings.store {
        StoreKind::Postgres => {
            ensure_database_exists(&settings.database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(settings.max_connections)
                .connect(&settings.database_url)
                .await?;
            ensure_student_table(&pool).await?;
            Arc::new(PgStudentStore::new(pool))
        }
        StoreKind::Memory => {
            tracing::warn!("using in-memory store; records are lost on restart");
            Arc::new(MemoryStudentStore::new())
        }
    };

    let router = app(AppState::new(store));
    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
