use anyhow::Result;
use bookmarks_api::{
    config::AppConfig, db, routes::routes, sanitize::MarkupEscaper,
    services::bookmark_repository::SqliteBookmarkRepository, state::AppState,
};
use std::{io::ErrorKind, sync::Arc};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // --- Logging setup ---
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // --- Parse config + migrate flag ---
    let (cfg, migrate) = AppConfig::from_env_and_args()?;

    tracing::info!("Starting bookmarks-api with config: {:?}", cfg);

    // --- Initialize SQLite connection ---
    let pool = db::connect(&cfg.database_url).await?;
    db::run_migrations(&pool).await?;

    // --- Handle migration mode ---
    if migrate {
        tracing::info!("Database migration complete.");
        return Ok(()); // exit after migration
    }

    // --- Initialize core state ---
    let repository = SqliteBookmarkRepository::new(Arc::new(pool));
    let state = AppState::new(
        Arc::new(repository),
        Arc::new(MarkupEscaper),
        cfg.api_token.clone(),
    );

    // --- Build router ---
    let app = routes::app(state);

    // --- Start server ---
    let addr = cfg.addr();
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err)
            if err.kind() == ErrorKind::PermissionDenied
                && matches!(cfg.host.as_str(), "0.0.0.0" | "::") =>
        {
            let fallback_addr = format!("127.0.0.1:{}", cfg.port);
            tracing::warn!(
                "Permission denied binding to {} ({}). Falling back to {}",
                addr,
                err,
                fallback_addr
            );
            TcpListener::bind(&fallback_addr).await?
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!("Server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, draining connections");
}
