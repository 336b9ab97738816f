pub mod database;
pub mod metrics;
pub mod seed;
pub mod store;

pub use database::MongoDb;
pub use metrics::{get_metrics, init_metrics, record_lookup, record_seeded};
pub use seed::SeedError;
pub use store::{InMemoryPortfolioStore, PortfolioStore};
