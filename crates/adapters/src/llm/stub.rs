//! Scripted generation client for testing and offline mode

use async_trait::async_trait;
use news_classifier_domain::{
    GenerationClient, GenerationError, GenerationRequest, GenerationResponse,
};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Stub client that replays configured responses and records every request
///
/// Scripted results are consumed in order; once exhausted the fallback result
/// is returned for every further call.
pub struct StubGenerationClient {
    scripted: Mutex<VecDeque<Result<GenerationResponse, GenerationError>>>,
    fallback: Result<GenerationResponse, GenerationError>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl StubGenerationClient {
    fn from_parts(
        scripted: Vec<Result<GenerationResponse, GenerationError>>,
        fallback: Result<GenerationResponse, GenerationError>,
    ) -> Self {
        Self {
            scripted: Mutex::new(scripted.into()),
            fallback,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always reply with `text`
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::from_parts(vec![], Ok(GenerationResponse::text(text)))
    }

    /// Always reply with no text
    pub fn empty() -> Self {
        Self::from_parts(vec![], Ok(GenerationResponse::empty()))
    }

    /// Always fail with `error`
    pub fn with_error(error: GenerationError) -> Self {
        Self::from_parts(vec![], Err(error))
    }

    /// Reply with each result in turn, then with no text
    pub fn sequence(results: Vec<Result<GenerationResponse, GenerationError>>) -> Self {
        Self::from_parts(results, Ok(GenerationResponse::empty()))
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl Default for StubGenerationClient {
    fn default() -> Self {
        Self::empty()
    }
}

#[async_trait]
impl GenerationClient for StubGenerationClient {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        let next = self
            .scripted
            .lock()
            .map_err(|e| GenerationError::Network(e.to_string()))?
            .pop_front();

        next.unwrap_or_else(|| self.fallback.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use news_classifier_domain::usecases::{ArticleClassifier, DEFAULT_MODEL};
    use news_classifier_domain::ResponseFormat;

    #[tokio::test]
    async fn test_records_requests() {
        let stub = StubGenerationClient::with_text("NEW");

        stub.generate(GenerationRequest::json("m", "first"))
            .await
            .unwrap();
        stub.generate(GenerationRequest::text("m", "second"))
            .await
            .unwrap();

        let requests = stub.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].prompt, "first");
        assert_eq!(requests[0].response_format, ResponseFormat::Json);
        assert_eq!(requests[1].prompt, "second");
    }

    #[tokio::test]
    async fn test_sequence_then_empty() {
        let stub = StubGenerationClient::sequence(vec![
            Ok(GenerationResponse::text("one")),
            Err(GenerationError::Timeout),
        ]);

        let first = stub.generate(GenerationRequest::text("m", "p")).await;
        let second = stub.generate(GenerationRequest::text("m", "p")).await;
        let third = stub.generate(GenerationRequest::text("m", "p")).await;

        assert_eq!(first.unwrap().text.as_deref(), Some("one"));
        assert!(matches!(second, Err(GenerationError::Timeout)));
        assert_eq!(third.unwrap(), GenerationResponse::empty());
    }

    #[tokio::test]
    async fn test_history_window_through_classifier() {
        let stub = StubGenerationClient::with_text("NEW");
        let classifier = ArticleClassifier::ready(&stub, DEFAULT_MODEL);
        let history: Vec<String> = (1..=25).map(|i| format!("Title: story #{}", i)).collect();

        let verdict = classifier.check_similarity("Fresh story", &history).await;
        assert!(!verdict.is_duplicate);

        let prompt = &stub.requests()[0].prompt;
        assert!(!prompt.contains("Title: story #5\n"));
        assert!(prompt.contains("Title: story #6\n"));
        assert!(prompt.contains("Title: story #25\n"));
    }

    #[tokio::test]
    async fn test_hallucinated_match_is_returned_verbatim() {
        let stub = StubGenerationClient::with_text("  A title nobody supplied \n");
        let classifier = ArticleClassifier::ready(&stub, DEFAULT_MODEL);

        let verdict = classifier
            .check_similarity("Fresh story", &["Title: something else"])
            .await;

        assert_eq!(
            verdict.into_pair(),
            (true, Some("A title nobody supplied".to_string()))
        );
    }

    #[tokio::test]
    async fn test_transport_error_through_classifier() {
        let stub = StubGenerationClient::with_error(GenerationError::Api {
            status: 503,
            body: "model overloaded".to_string(),
        });
        let classifier = ArticleClassifier::ready(&stub, DEFAULT_MODEL);

        assert_eq!(classifier.classify("t", "c").await, None);
        assert!(
            !classifier
                .check_similarity("t", &["Title: x"])
                .await
                .is_duplicate
        );
        assert_eq!(stub.requests().len(), 2);
    }
}
