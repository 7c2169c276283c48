use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mealwise::api::{create_router, AppState};
use mealwise::config::Config;
use mealwise::db::{Database, LibSqlBackend};
use mealwise::llm::LlmProvider;

#[derive(Parser)]
#[command(name = "mealwise")]
#[command(about = "Self-hostable meal planner with LLM-generated recipes")]
struct Args {
    /// Bind address, overrides MEALWISE_HOST
    #[arg(long)]
    host: Option<String>,

    /// Listen port, overrides MEALWISE_PORT
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mealwise=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    tracing::info!("Initializing database at {}...", config.database.url);
    let raw_db = Database::new(&config.database).await?;
    let db = Arc::new(LibSqlBackend::new(raw_db));

    tracing::info!("Using LLM model: {}", config.llm.model);
    let llm = LlmProvider::new(&config.llm);
    if llm.server_api_key().is_none() {
        tracing::warn!(
            "OPENROUTER_API_KEY is not set - clients must supply their own key in settings"
        );
    }

    let state = AppState::new(config.clone(), db, llm);
    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Mealwise starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/api/v1/health", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", error);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("Failed to install SIGTERM handler: {}", error);
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

    tracing::info!("Shutdown signal received");
}
