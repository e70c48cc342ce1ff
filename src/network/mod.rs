//! HTTP networking module
//!
//! Provides HTTP client functionality for fetching pages from the user source.

mod client;

pub use client::{HttpClient, HttpResponse};
