//! news-classifier domain crate
//!
//! This crate contains the core domain logic following hexagonal architecture:
//! - `model`: Articles, classifications and similarity verdicts
//! - `taxonomy`: Versioned category/type label table
//! - `ports`: Trait definitions for the remote generation endpoint
//! - `prompt`: Prompt construction and response parsing
//! - `usecases`: The article classifier itself

pub mod model;
pub mod ports;
pub mod prompt;
pub mod taxonomy;
pub mod usecases;

pub use model::*;
pub use ports::*;
pub use taxonomy::{ArticleType, Category, TAXONOMY_VERSION, taxonomy_fingerprint};
