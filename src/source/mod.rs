//! External user sources
//!
//! A source hands out pages of external user records. The HTTP source talks
//! to a DummyJSON-compatible API.

mod dummyjson;
mod traits;

pub use dummyjson::HttpUserSource;
pub use traits::{SourcePage, UserSource};
