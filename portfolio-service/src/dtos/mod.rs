use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

pub const SEED_SUCCESS_MESSAGE: &str = "Data successfully seeded into MongoDB";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "OK")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Envelope returned by the lookup endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PortfolioResponse {
    #[schema(example = "OK")]
    pub msg: String,
    #[schema(value_type = Object)]
    pub data: Value,
}

impl PortfolioResponse {
    pub fn ok(data: Value) -> Self {
        Self {
            msg: "OK".to_string(),
            data,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Invalid ObjectID")]
    pub error: String,
}
