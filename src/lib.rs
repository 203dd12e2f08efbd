pub mod config;
pub mod error;

// Catalog store and similarity ranking
pub mod catalog;
pub mod indexer;

// Presentation
pub mod api;
pub mod cli;
pub mod view;
pub mod web;

// Utilities
pub mod utils;

// Re-exports
pub use catalog::{Catalog, Recipe};
pub use config::Settings;
pub use error::{Error, Result};
pub use indexer::{rank, SimilarityRanker};
