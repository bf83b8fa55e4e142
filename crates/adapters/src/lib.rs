//! news-classifier adapters crate
//!
//! This crate contains infrastructure adapters implementing the domain ports:
//! - `llm`: Generation clients (Gemini over HTTP, scripted stub)

pub mod llm;
