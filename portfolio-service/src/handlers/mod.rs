pub mod health;
pub mod metrics;
pub mod portfolio;
pub mod seed;

pub use health::{health_check, root};
pub use metrics::metrics;
pub use portfolio::get_portfolio_by_id;
pub use seed::seed_portfolios;
