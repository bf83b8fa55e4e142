//! Port definitions (traits) for external dependencies
//!
//! The only external system is the hosted generation endpoint. Adapters
//! implement [`GenerationClient`] to reach it.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Output shape requested from the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    #[default]
    Text,
    /// Ask the endpoint to prefer JSON-shaped output
    Json,
}

/// A single generation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Model identifier
    pub model: String,
    /// Full prompt text
    pub prompt: String,
    pub response_format: ResponseFormat,
}

impl GenerationRequest {
    pub fn text(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            response_format: ResponseFormat::Text,
        }
    }

    pub fn json(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            response_format: ResponseFormat::Json,
        }
    }
}

/// Text payload returned by the endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationResponse {
    /// `None` when the endpoint produced no candidate text
    pub text: Option<String>,
}

impl GenerationResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    pub fn empty() -> Self {
        Self { text: None }
    }
}

/// Error type for generation calls
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    #[error("API returned {status}")]
    Api { status: u16, body: String },
    #[error("Rate limited")]
    RateLimited,
    #[error("Timeout")]
    Timeout,
    #[error("Network error: {0}")]
    Network(String),
    #[error("Invalid response format: {0}")]
    InvalidFormat(String),
}

impl GenerationError {
    /// Response body attached to the error, if the endpoint sent one
    pub fn detail(&self) -> Option<&str> {
        match self {
            GenerationError::Api { body, .. } if !body.is_empty() => Some(body),
            _ => None,
        }
    }
}

/// Port for the hosted generation endpoint
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Perform exactly one generation round trip
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError>;
}

#[async_trait]
impl<'a, T: GenerationClient + ?Sized> GenerationClient for &'a T {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        (**self).generate(request).await
    }
}

#[async_trait]
impl<T: GenerationClient + ?Sized> GenerationClient for Box<T> {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        (**self).generate(request).await
    }
}

#[async_trait]
impl<T: GenerationClient + ?Sized> GenerationClient for Arc<T> {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        (**self).generate(request).await
    }
}

/// Error type for classifier operations
///
/// The collapsing operations on the classifier turn every variant into a
/// "no answer" value; the `try_*` operations surface them.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Classifier disabled: {0}")]
    Disabled(String),
    #[error("Empty response from model")]
    EmptyResponse,
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String, raw: String },
    #[error("Transport error: {0}")]
    Transport(#[from] GenerationError),
}
