//! Portfolio documents are schema-less: the service stores and returns
//! whatever fields the seed file carried. Only `_id` and `createdDate` have
//! meaning, and only while seeding.

use mongodb::bson::{Bson, Document};
use serde_json::{Map, Value};

pub const ID_FIELD: &str = "_id";
pub const CREATED_DATE_FIELD: &str = "createdDate";

/// Converts a stored document into plain JSON for HTTP responses.
///
/// ObjectIds render as their 24-character hex string and datetimes as
/// RFC 3339 strings; everything else uses relaxed extended JSON.
pub fn render_document(document: Document) -> Value {
    Value::Object(render_fields(document))
}

fn render_fields(document: Document) -> Map<String, Value> {
    document
        .into_iter()
        .map(|(key, value)| (key, render_value(value)))
        .collect()
}

fn render_value(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => match dt.try_to_rfc3339_string() {
            Ok(s) => Value::String(s),
            Err(_) => Value::from(dt.timestamp_millis()),
        },
        Bson::Document(doc) => Value::Object(render_fields(doc)),
        Bson::Array(items) => Value::Array(items.into_iter().map(render_value).collect()),
        other => other.into_relaxed_extjson(),
    }
}
