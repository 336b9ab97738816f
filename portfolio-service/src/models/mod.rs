pub mod portfolio;

pub use portfolio::{render_document, CREATED_DATE_FIELD, ID_FIELD};
