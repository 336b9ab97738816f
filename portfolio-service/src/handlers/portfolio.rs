use crate::dtos::{ErrorResponse, PortfolioResponse};
use crate::models::render_document;
use crate::services::record_lookup;
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;

/// Get portfolio by ID
///
/// A well-formed identifier with no matching document yields 500, the same
/// as a failed query.
#[utoipa::path(
    get,
    path = "/ms-portfolio-bs/v1/portfolios/{id}",
    params(
        ("id" = String, Path, description = "Portfolio ObjectId as 24 hex characters")
    ),
    responses(
        (status = 200, description = "Portfolio found", body = PortfolioResponse),
        (status = 400, description = "Malformed identifier", body = ErrorResponse),
        (status = 500, description = "Lookup failed or no such portfolio", body = ErrorResponse)
    ),
    tag = "portfolio"
)]
pub async fn get_portfolio_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PortfolioResponse>, AppError> {
    let object_id = ObjectId::parse_str(&id).map_err(|e| {
        record_lookup("invalid_id");
        AppError::from(e)
    })?;

    let document = state.store.find_by_id(object_id).await.map_err(|e| {
        record_lookup("error");
        e
    })?;

    record_lookup("found");
    Ok(Json(PortfolioResponse::ok(render_document(document))))
}
