use std::net::SocketAddr;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use diabetes_ml_service::{config::Config, context::ServiceContext, create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    init_tracing();

    // Load configuration
    let config = Config::from_env();

    tracing::info!("Diabetes Prediction ML Service starting...");
    tracing::info!(
        "Model: {} ({}), risk scheme: {}",
        config.model_type,
        config.model_version,
        config.risk_scheme
    );
    tracing::info!("CORS origins: {}", config.cors_origins().join(", "));

    // Load artifacts once; a failed load leaves the service up but unhealthy
    let context = ServiceContext::load(&config);
    if let Some(model) = context.model() {
        tracing::info!(
            "Loaded {} trained {}",
            context.metadata().model_name,
            context.metadata().training_date
        );
        tracing::debug!(kind = model.kind(), calibrated = model.calibrated());
    }

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", config.host, config.port))?;

    // Build router
    let app = create_router(AppState::new(context, config));

    // Start server
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("🚀 Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "diabetes_ml_service=debug,tower_http=debug".into());

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
