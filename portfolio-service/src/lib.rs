pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

use utoipa::OpenApi;

pub use startup::{build_router, AppState, Application};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "MS Portfolio BS API",
        description = "This is a simple API for managing portfolios",
        version = "1.0"
    ),
    paths(
        handlers::health::root,
        handlers::portfolio::get_portfolio_by_id,
        handlers::seed::seed_portfolios,
    ),
    components(
        schemas(
            dtos::MessageResponse,
            dtos::PortfolioResponse,
            dtos::ErrorResponse,
        )
    ),
    tags(
        (name = "portfolio", description = "Portfolio lookup and seeding"),
        (name = "Observability", description = "Service liveness"),
    )
)]
pub struct ApiDoc;
