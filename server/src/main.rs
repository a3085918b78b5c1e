//! Course catalog server: reads configuration from the environment, opens the course store,
//! and serves the course views until Ctrl-C / SIGTERM.
//!
//! Run from repo root: `cargo run -p course-catalog-server`

use course_catalog::{
    app, ensure_collection, ensure_database_exists, AppState, CourseStore, MemoryCourseStore, PgCourseStore,
    ServiceConfig, StoreBackend,
};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("course_catalog=info,course_catalog_server=info,tower_http=info")
            }),
        )
        .init();

    let config = ServiceConfig::from_env()?;

    // Keep the concrete Postgres handle so the pool can be closed on shutdown.
    let mut pg_store: Option<Arc<PgCourseStore>> = None;
    let store: Arc<dyn CourseStore> = match &config.backend {
        StoreBackend::Postgres {
            database_url,
            max_connections,
            schema,
            collection,
        } => {
            ensure_database_exists(database_url, config.store_timeout).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(*max_connections)
                .acquire_timeout(config.store_timeout)
                .connect(database_url)
                .await?;
            ensure_collection(&pool, schema, collection).await?;
            let store = Arc::new(PgCourseStore::new(pool, schema, collection, config.store_timeout));
            let decoded = store.audit().await?;
            tracing::info!("reading courses from {} ({} documents)", store.table(), decoded);
            pg_store = Some(store.clone());
            store as Arc<dyn CourseStore>
        }
        StoreBackend::Memory { fixture } => {
            let store = match fixture {
                Some(path) => MemoryCourseStore::from_fixture(path).await?,
                None => MemoryCourseStore::default(),
            };
            tracing::info!("serving {} courses from memory", store.len());
            Arc::new(store)
        }
    };

    let router = app(AppState::new(store), &config.programs);
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(store) = pg_store {
        store.close().await;
    }
    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
