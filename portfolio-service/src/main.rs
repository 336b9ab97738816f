use portfolio_service::config::PortfolioConfig;
use portfolio_service::services::init_metrics;
use portfolio_service::Application;
use service_core::error::AppError;
use service_core::observability::init_tracing;
use tokio::signal;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Missing MONGO_URI ends the process here
    let config = PortfolioConfig::load()?;

    init_tracing(
        "portfolio-service",
        &config.common.log_level,
        config.common.otlp_endpoint.as_deref(),
    );
    init_metrics()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        port = config.common.http_port,
        "Starting portfolio service"
    );

    let app = Application::build(config).await?;
    tracing::info!("Connected to MongoDB");

    app.run_with_graceful_shutdown(shutdown_signal()).await?;

    tracing::info!("Service shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
