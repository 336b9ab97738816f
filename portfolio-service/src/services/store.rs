use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use service_core::error::AppError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::models::ID_FIELD;

/// Persistence seam for portfolio documents.
///
/// Handlers receive this as `Arc<dyn PortfolioStore>`; the MongoDB handle and
/// the in-memory store are interchangeable behind it.
#[async_trait]
pub trait PortfolioStore: Send + Sync {
    /// Returns the document whose `_id` equals `id`. A missing document is an
    /// error, indistinguishable to callers from a failed query.
    async fn find_by_id(&self, id: ObjectId) -> Result<Document, AppError>;

    /// Inserts the batch in order, stopping at the first failure. Documents
    /// written before the failure stay written.
    async fn insert_many(&self, documents: Vec<Document>) -> Result<u64, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}

pub(crate) fn missing_document(id: &ObjectId) -> AppError {
    AppError::DatabaseError(anyhow::anyhow!("no document found with _id {}", id))
}

/// Store kept in process memory. Only tests use it in place of MongoDB.
#[derive(Default)]
pub struct InMemoryPortfolioStore {
    documents: Mutex<Vec<Document>>,
    lookup_count: AtomicU64,
}

impl InMemoryPortfolioStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documents(documents: Vec<Document>) -> Self {
        Self {
            documents: Mutex::new(documents),
            lookup_count: AtomicU64::new(0),
        }
    }

    /// Number of `find_by_id` calls served so far.
    pub fn lookup_count(&self) -> u64 {
        self.lookup_count.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.lock().map(|docs| docs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Document>>, AppError> {
        self.documents
            .lock()
            .map_err(|_| AppError::InternalError(anyhow::anyhow!("portfolio store lock poisoned")))
    }
}

#[async_trait]
impl PortfolioStore for InMemoryPortfolioStore {
    async fn find_by_id(&self, id: ObjectId) -> Result<Document, AppError> {
        self.lookup_count.fetch_add(1, Ordering::SeqCst);
        let target = Bson::ObjectId(id);

        self.lock()?
            .iter()
            .find(|doc| doc.get(ID_FIELD) == Some(&target))
            .cloned()
            .ok_or_else(|| missing_document(&id))
    }

    async fn insert_many(&self, documents: Vec<Document>) -> Result<u64, AppError> {
        if documents.is_empty() {
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "no documents provided to insert_many"
            )));
        }

        let mut stored = self.lock()?;
        let mut inserted = 0;
        for mut document in documents {
            let id = match document.get(ID_FIELD) {
                Some(id) => id.clone(),
                None => {
                    let id = Bson::ObjectId(ObjectId::new());
                    document.insert(ID_FIELD, id.clone());
                    id
                }
            };

            if stored.iter().any(|doc| doc.get(ID_FIELD) == Some(&id)) {
                return Err(AppError::DatabaseError(anyhow::anyhow!(
                    "E11000 duplicate key error index: _id_ dup key: {{ _id: {} }}",
                    id
                )));
            }

            stored.push(document);
            inserted += 1;
        }

        Ok(inserted)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    fn oid(hex: &str) -> ObjectId {
        ObjectId::parse_str(hex).unwrap()
    }

    #[tokio::test]
    async fn finds_inserted_document() {
        let store = InMemoryPortfolioStore::new();
        let id = oid("507f1f77bcf86cd799439011");
        store
            .insert_many(vec![doc! { "_id": id, "name": "A" }])
            .await
            .unwrap();

        let found = store.find_by_id(id).await.unwrap();
        assert_eq!(found.get_str("name").unwrap(), "A");
        assert_eq!(store.lookup_count(), 1);
    }

    #[tokio::test]
    async fn missing_document_is_database_error() {
        let store = InMemoryPortfolioStore::new();
        let err = store
            .find_by_id(oid("507f1f77bcf86cd799439011"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DatabaseError(_)));
    }

    #[tokio::test]
    async fn assigns_identifier_when_absent() {
        let store = InMemoryPortfolioStore::new();
        store.insert_many(vec![doc! { "name": "B" }]).await.unwrap();
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn duplicate_stops_batch_but_keeps_earlier_inserts() {
        let store = InMemoryPortfolioStore::new();
        let first = oid("507f1f77bcf86cd799439011");
        let second = oid("507f1f77bcf86cd799439012");

        let err = store
            .insert_many(vec![
                doc! { "_id": first },
                doc! { "_id": first },
                doc! { "_id": second },
            ])
            .await
            .unwrap_err();

        assert!(err.to_string().contains("duplicate key"));
        assert_eq!(store.len(), 1);
        assert!(store.find_by_id(second).await.is_err());
    }

    #[tokio::test]
    async fn empty_batch_is_rejected() {
        let store = InMemoryPortfolioStore::new();
        assert!(store.insert_many(Vec::new()).await.is_err());
    }
}
