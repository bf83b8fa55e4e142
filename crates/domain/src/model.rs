//! Domain models and value objects

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::taxonomy::{ArticleType, Category};

/// A news article submitted for classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Headline
    pub title: String,
    /// Body text (only a leading excerpt is sent to the model)
    pub content: String,
}

impl Article {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// JSON object returned by the model for one article
///
/// The object is kept exactly as the model produced it, including any keys
/// beyond `category` and `type`. Use [`Classification::category`] and
/// [`Classification::article_type`] for typed views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Classification(Map<String, Value>);

impl Classification {
    pub fn new(category: impl Into<String>, kind: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("category".to_string(), Value::String(category.into()));
        fields.insert("type".to_string(), Value::String(kind.into()));
        Self(fields)
    }

    /// Classification callers fall back to when the model gave no answer
    pub fn fallback() -> Self {
        Self::new(Category::Other.label(), ArticleType::Other.label())
    }

    /// Raw `category` label, when it is a string
    pub fn category_label(&self) -> Option<&str> {
        self.0.get("category").and_then(Value::as_str)
    }

    /// Raw `type` label, when it is a string
    pub fn kind_label(&self) -> Option<&str> {
        self.0.get("type").and_then(Value::as_str)
    }

    /// Resolve the category label against the taxonomy
    pub fn category(&self) -> Option<Category> {
        self.category_label().and_then(Category::from_label)
    }

    /// Resolve the type label against the taxonomy
    pub fn article_type(&self) -> Option<ArticleType> {
        self.kind_label().and_then(ArticleType::from_label)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Classification {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Outcome of a duplicate check against recent history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarityVerdict {
    pub is_duplicate: bool,
    /// Title the model reported as matching. Not checked against the history
    /// that was supplied.
    pub matched_title: Option<String>,
}

impl SimilarityVerdict {
    /// The article covers a new event
    pub fn new_article() -> Self {
        Self {
            is_duplicate: false,
            matched_title: None,
        }
    }

    /// The article duplicates the given title
    pub fn duplicate(matched_title: impl Into<String>) -> Self {
        Self {
            is_duplicate: true,
            matched_title: Some(matched_title.into()),
        }
    }

    pub fn into_pair(self) -> (bool, Option<String>) {
        (self.is_duplicate, self.matched_title)
    }
}

impl Default for SimilarityVerdict {
    fn default() -> Self {
        Self::new_article()
    }
}
