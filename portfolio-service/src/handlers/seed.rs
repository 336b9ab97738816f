use crate::dtos::{ErrorResponse, MessageResponse, SEED_SUCCESS_MESSAGE};
use crate::services::{record_seeded, seed};
use crate::startup::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;

/// Seed data into MongoDB
///
/// Not idempotent: seeding a file with fixed identifiers twice fails on the
/// second run with a duplicate key error.
#[utoipa::path(
    post,
    path = "/ms-portfolio-bs/v1/portfolios/seed",
    responses(
        (status = 200, description = "Seed file inserted", body = MessageResponse),
        (status = 500, description = "Seed file unreadable, malformed or rejected by the store", body = ErrorResponse)
    ),
    tag = "portfolio"
)]
pub async fn seed_portfolios(
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    let path = &state.config.seed.file_path;
    tracing::info!(file = %path.display(), "Seeding portfolios");

    let raw = seed::read_seed_file(path).await?;
    let documents = seed::normalize(raw)?;
    let inserted = state.store.insert_many(documents).await?;

    record_seeded(inserted);
    tracing::info!(inserted, "Portfolio seed complete");

    Ok(Json(MessageResponse::new(SEED_SUCCESS_MESSAGE)))
}
