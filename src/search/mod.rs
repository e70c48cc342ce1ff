//! Search resolution module
//!
//! Builds structured predicates from classified queries and runs them
//! against the record store.

mod builder;
mod executor;
mod predicate;

pub use builder::{PredicateBuilder, SearchPlan};
pub use executor::Search;
pub use predicate::{Field, Normalizer, Predicate, Value, SSN_SEPARATOR};
