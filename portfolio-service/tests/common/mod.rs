#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use portfolio_service::config::{MongoConfig, PortfolioConfig, SeedConfig};
use portfolio_service::services::{InMemoryPortfolioStore, MongoDb};
use portfolio_service::{build_router, AppState, Application};
use service_core::config::Config as CoreConfig;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tower::util::ServiceExt;
use uuid::Uuid;

pub const SEED_ID: &str = "507f1f77bcf86cd799439011";

pub const SEED_FILE: &str = r#"[
  {
    "_id": { "$oid": "507f1f77bcf86cd799439011" },
    "createdDate": { "$date": "2021-01-01T00:00:00Z" },
    "name": "A"
  }
]"#;

pub fn test_config(seed_path: &Path) -> PortfolioConfig {
    PortfolioConfig {
        common: CoreConfig {
            http_port: 0,
            log_level: "debug".to_string(),
            otlp_endpoint: None,
        },
        mongodb: MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: format!("portfolio_test_{}", Uuid::new_v4().simple()),
            collection: "portfolio".to_string(),
        },
        seed: SeedConfig {
            file_path: seed_path.to_path_buf(),
        },
    }
}

pub fn seed_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create seed file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write seed file");
    file
}

/// Router over an in-memory store, for tests that do not need MongoDB.
pub fn in_memory_app(seed_path: &Path) -> (Router, Arc<InMemoryPortfolioStore>) {
    let store = Arc::new(InMemoryPortfolioStore::new());
    let state = AppState {
        config: test_config(seed_path),
        store: store.clone(),
    };
    (build_router(state), store)
}

pub async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, body)
}

/// Full server against a real MongoDB at `MONGO_URI` (default localhost).
pub struct TestApp {
    pub address: String,
    pub db: MongoDb,
    pub seed_path: PathBuf,
    _seed_file: NamedTempFile,
}

impl TestApp {
    pub async fn spawn(seed_contents: &str) -> Self {
        let seed = seed_file(seed_contents);
        let mut config = test_config(seed.path());
        if let Ok(uri) = std::env::var("MONGO_URI") {
            config.mongodb.uri = uri;
        }

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let db = app.db().clone();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        let client = reqwest::Client::new();
        for _ in 0..50 {
            if client.get(&address).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            db,
            seed_path: seed.path().to_path_buf(),
            _seed_file: seed,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn cleanup(&self) {
        let _ = self.db.database().drop(None).await;
    }
}
