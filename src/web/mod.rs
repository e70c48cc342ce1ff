//! Web server module
//!
//! Exposes the catalog and the ingestion trigger over HTTP.

mod error;
mod handlers;
mod routes;
mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
