//! User catalog
//!
//! Holds the user records, the store they live in, and the read-side
//! facade used by the web layer.

mod service;
mod store;
mod user;

pub use service::{Catalog, CatalogStatus};
pub use store::{MemoryStore, UserStore};
pub use user::{SourceUser, User};
