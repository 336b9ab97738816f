//! Router construction and server lifecycle.

use crate::config::{PortfolioConfig, BASE_PATH};
use crate::handlers;
use crate::services::{MongoDb, PortfolioStore};
use crate::ApiDoc;
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware,
    security_headers::security_headers_middleware,
    tracing::{http_request_span, request_id_middleware},
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Shared application state. The store handle is the only shared resource;
/// the driver behind it owns pooling.
#[derive(Clone)]
pub struct AppState {
    pub config: PortfolioConfig,
    pub store: Arc<dyn PortfolioStore>,
}

pub fn build_router(state: AppState) -> Router {
    let portfolio_routes = Router::new()
        .route("/portfolios/seed", post(handlers::seed_portfolios))
        .route("/portfolios/:id", get(handlers::get_portfolio_by_id));

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics))
        .nest(BASE_PATH, portfolio_routes)
        .merge(SwaggerUi::new("/swagger").url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
        .with_state(state)
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(http_request_span::<axum::body::Body>))
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
    db: MongoDb,
}

impl Application {
    /// Connects to MongoDB and binds the HTTP listener. Port 0 picks a free
    /// port, which `port()` then reports.
    pub async fn build(config: PortfolioConfig) -> Result<Self, AppError> {
        let db = MongoDb::connect(
            &config.mongodb.uri,
            &config.mongodb.database,
            &config.mongodb.collection,
        )
        .await
        .map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            e
        })?;

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.http_port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        let state = AppState {
            config,
            store: Arc::new(db.clone()),
        };
        let router = build_router(state);

        Ok(Self {
            port,
            listener,
            router,
            db,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn db(&self) -> &MongoDb {
        &self.db
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router).await
    }

    /// Serves until `signal` resolves, drains in-flight requests, then closes
    /// the MongoDB client.
    pub async fn run_with_graceful_shutdown<F>(self, signal: F) -> Result<(), AppError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tracing::info!(port = self.port, "Listening");
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(signal)
            .await?;

        self.db.shutdown().await;
        Ok(())
    }
}
