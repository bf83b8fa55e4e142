//! Application use cases / business logic

pub mod classifier;

pub use classifier::{ArticleClassifier, ClassifierState, DEFAULT_MODEL};
