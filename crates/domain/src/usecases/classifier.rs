//! Article classification and duplicate detection use case

use crate::{
    model::{Article, Classification, SimilarityVerdict},
    ports::{ClassifierError, GenerationClient, GenerationRequest, GenerationResponse},
    prompt::{
        HISTORY_WINDOW, build_classification_prompt, build_similarity_prompt,
        parse_classification, parse_similarity, recent_window,
    },
};

/// Model used when the configuration does not name one
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Whether the classifier can reach the model
pub enum ClassifierState<G> {
    Ready { client: G, model: String },
    /// No credential was available at construction
    Unavailable { reason: String },
}

/// Classifies articles and checks them for duplicates via a hosted model
///
/// Holds no state between calls. Every operation makes at most one round
/// trip and never retries.
pub struct ArticleClassifier<G> {
    state: ClassifierState<G>,
}

impl<G: GenerationClient> ArticleClassifier<G> {
    pub fn new(state: ClassifierState<G>) -> Self {
        if let ClassifierState::Unavailable { reason } = &state {
            tracing::warn!(
                reason = %reason,
                "Classifier disabled, all operations will return no result"
            );
        }
        Self { state }
    }

    pub fn ready(client: G, model: impl Into<String>) -> Self {
        Self::new(ClassifierState::Ready {
            client,
            model: model.into(),
        })
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::new(ClassifierState::Unavailable {
            reason: reason.into(),
        })
    }

    pub fn is_available(&self) -> bool {
        matches!(self.state, ClassifierState::Ready { .. })
    }

    pub fn state(&self) -> &ClassifierState<G> {
        &self.state
    }

    /// Model identifier, if ready
    pub fn model(&self) -> Option<&str> {
        match &self.state {
            ClassifierState::Ready { model, .. } => Some(model.as_str()),
            ClassifierState::Unavailable { .. } => None,
        }
    }

    fn ready_parts(&self) -> Result<(&G, &str), ClassifierError> {
        match &self.state {
            ClassifierState::Ready { client, model } => Ok((client, model.as_str())),
            ClassifierState::Unavailable { reason } => {
                Err(ClassifierError::Disabled(reason.clone()))
            }
        }
    }

    /// Classify an article, surfacing why no classification was produced
    pub async fn try_classify(&self, article: &Article) -> Result<Classification, ClassifierError> {
        let (client, model) = self.ready_parts()?;

        let prompt = build_classification_prompt(article);
        let response = client.generate(GenerationRequest::json(model, prompt)).await?;
        let text = response_text(response)?;

        parse_classification(&text)
    }

    /// Classify an article; any failure yields `None`
    pub async fn classify(&self, title: &str, content: &str) -> Option<Classification> {
        let article = Article::new(title, content);

        match self.try_classify(&article).await {
            Ok(classification) => {
                tracing::debug!(
                    title = %title,
                    category = ?classification.category_label(),
                    kind = ?classification.kind_label(),
                    "Article classified"
                );
                Some(classification)
            }
            Err(e) => {
                log_failure("classification", &e);
                None
            }
        }
    }

    /// Check `new_title` against the most recent history entries,
    /// surfacing why no verdict was produced
    pub async fn try_check_similarity<S: AsRef<str>>(
        &self,
        new_title: &str,
        history: &[S],
    ) -> Result<SimilarityVerdict, ClassifierError> {
        let (client, model) = self.ready_parts()?;

        if history.is_empty() {
            return Ok(SimilarityVerdict::new_article());
        }

        let recent = recent_window(history, HISTORY_WINDOW);
        let prompt = build_similarity_prompt(new_title, recent);
        let response = client.generate(GenerationRequest::text(model, prompt)).await?;
        let text = response_text(response)?;

        Ok(parse_similarity(&text))
    }

    /// Check `new_title` for duplicates; any failure yields a non-duplicate
    /// verdict
    pub async fn check_similarity<S: AsRef<str>>(
        &self,
        new_title: &str,
        history: &[S],
    ) -> SimilarityVerdict {
        match self.try_check_similarity(new_title, history).await {
            Ok(verdict) => {
                if let Some(matched) = &verdict.matched_title {
                    tracing::info!(title = %new_title, matched = %matched, "Duplicate article detected");
                }
                verdict
            }
            Err(e) => {
                log_failure("similarity check", &e);
                SimilarityVerdict::new_article()
            }
        }
    }
}

fn response_text(response: GenerationResponse) -> Result<String, ClassifierError> {
    match response.text {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(ClassifierError::EmptyResponse),
    }
}

fn log_failure(operation: &str, error: &ClassifierError) {
    match error {
        ClassifierError::Disabled(_) => {
            tracing::debug!(operation, "Skipped, classifier disabled");
        }
        ClassifierError::EmptyResponse => {
            tracing::warn!(operation, "Empty response from model");
        }
        ClassifierError::MalformedResponse { message, raw } => {
            tracing::error!(operation, error = %message, raw = %raw, "Malformed model response");
        }
        ClassifierError::Transport(e) => match e.detail() {
            Some(detail) => {
                tracing::error!(operation, error = %e, details = %detail, "Model call failed");
            }
            None => {
                tracing::error!(operation, error = %e, "Model call failed");
            }
        },
    }
}
