use crate::services::store::{missing_document, PortfolioStore};
use async_trait::async_trait;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client as MongoClient, Collection, Database,
};
use service_core::error::AppError;

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
    collection: String,
}

impl MongoDb {
    /// Builds a client pinned to Stable API v1 and pings the deployment.
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self, AppError> {
        if uri.trim().is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "MongoDB connection string is empty"
            )));
        }

        tracing::info!(database = %database, "Connecting to MongoDB");
        let mut options = ClientOptions::parse(uri).await.map_err(|e| {
            tracing::error!("Failed to parse MongoDB connection string: {}", e);
            AppError::from(e)
        })?;
        options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());

        let client = MongoClient::with_options(options)?;
        let db = client.database(database);
        let store = Self {
            client,
            db,
            collection: collection.to_string(),
        };

        store.health_check().await?;
        tracing::info!(
            database = %database,
            collection = %collection,
            "Successfully connected to MongoDB"
        );
        Ok(store)
    }

    pub fn portfolios(&self) -> Collection<Document> {
        self.db.collection(&self.collection)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Closes the client once outstanding sessions and cursors are dropped.
    pub async fn shutdown(self) {
        tracing::info!("Closing MongoDB client");
        self.client.shutdown().await;
    }
}

#[async_trait]
impl PortfolioStore for MongoDb {
    async fn find_by_id(&self, id: ObjectId) -> Result<Document, AppError> {
        self.portfolios()
            .find_one(doc! { "_id": id }, None)
            .await
            .map_err(|e| {
                tracing::error!(id = %id, "Portfolio lookup failed: {}", e);
                AppError::from(e)
            })?
            .ok_or_else(|| missing_document(&id))
    }

    async fn insert_many(&self, documents: Vec<Document>) -> Result<u64, AppError> {
        let result = self
            .portfolios()
            .insert_many(documents, None)
            .await
            .map_err(|e| {
                tracing::error!("Portfolio batch insert failed: {}", e);
                AppError::from(e)
            })?;
        Ok(result.inserted_ids.len() as u64)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }
}
