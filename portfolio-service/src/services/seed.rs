//! Seed pipeline: read the seed file, unwrap `$oid`/`$date` wrappers, and
//! hand the batch to the store.
//!
//! The whole file is normalized before anything is inserted, so a bad
//! identifier anywhere in the file leaves the collection untouched.

use crate::models::{CREATED_DATE_FIELD, ID_FIELD};
use mongodb::bson::{oid::ObjectId, Bson, Document};
use serde_json::{Map, Value};
use service_core::error::AppError;
use std::path::Path;
use thiserror::Error;

const OID_KEY: &str = "$oid";
const DATE_KEY: &str = "$date";

pub type RawDocument = Map<String, Value>;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("{0}")]
    Read(#[from] std::io::Error),

    #[error("{0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid ObjectID")]
    InvalidObjectId,
}

impl From<SeedError> for AppError {
    fn from(err: SeedError) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

pub async fn read_seed_file(path: &Path) -> Result<Vec<RawDocument>, SeedError> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        tracing::error!(file = %path.display(), "Failed to read seed file: {}", e);
        e
    })?;
    parse_seed(&bytes)
}

/// The file must hold a JSON array whose elements are all objects.
pub fn parse_seed(bytes: &[u8]) -> Result<Vec<RawDocument>, SeedError> {
    Ok(serde_json::from_slice(bytes)?)
}

pub fn normalize(raw: Vec<RawDocument>) -> Result<Vec<Document>, SeedError> {
    raw.into_iter().map(normalize_document).collect()
}

/// `_id: {"$oid": hex}` becomes a native ObjectId and
/// `createdDate: {"$date": v}` becomes `v` as-is. Other fields pass through.
pub fn normalize_document(mut raw: RawDocument) -> Result<Document, SeedError> {
    let object_id = match raw.get(ID_FIELD).and_then(|v| wrapped(v, OID_KEY)) {
        Some(Value::String(hex)) => {
            Some(ObjectId::parse_str(hex).map_err(|_| SeedError::InvalidObjectId)?)
        }
        Some(_) => return Err(SeedError::InvalidObjectId),
        None => None,
    };

    if let Some(date) = raw
        .get(CREATED_DATE_FIELD)
        .and_then(|v| wrapped(v, DATE_KEY))
        .cloned()
    {
        raw.insert(CREATED_DATE_FIELD.to_string(), date);
    }

    let mut document = Document::new();
    for (key, value) in raw {
        let value = match object_id {
            Some(oid) if key == ID_FIELD => Bson::ObjectId(oid),
            _ => to_bson(value),
        };
        document.insert(key, value);
    }
    Ok(document)
}

/// Literal JSON to BSON conversion. Objects stay documents even when their
/// keys look like extended JSON (`$date`, `$oid`, `$numberLong`), and
/// integers beyond `i64` become doubles.
fn to_bson(value: Value) -> Bson {
    match value {
        Value::Null => Bson::Null,
        Value::Bool(b) => Bson::Boolean(b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Bson::Int64(i),
            None => Bson::Double(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => Bson::String(s),
        Value::Array(items) => Bson::Array(items.into_iter().map(to_bson).collect()),
        Value::Object(map) => Bson::Document(
            map.into_iter()
                .map(|(key, value)| (key, to_bson(value)))
                .collect(),
        ),
    }
}

/// Inner value of a single-key wrapper object such as `{"$oid": ...}`.
fn wrapped<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value
        .as_object()?
        .get(key)
        .filter(|inner| !inner.is_null())
}
