//! Category and type taxonomy
//!
//! The label table is embedded verbatim in the classification prompt. Bump
//! [`TAXONOMY_VERSION`] whenever an entry changes.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

pub const TAXONOMY_VERSION: &str = "1";

/// One row of the taxonomy table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelDef {
    /// Stable English key
    pub key: &'static str,
    /// Label the model is asked to emit
    pub label: &'static str,
    /// English display name
    pub english: &'static str,
    /// Selection rule shown to the model
    pub rule: &'static str,
}

impl LabelDef {
    fn matches(&self, value: &str) -> bool {
        let value = value.trim();
        value == self.label
            || value.eq_ignore_ascii_case(self.key)
            || value.eq_ignore_ascii_case(self.english)
    }
}

pub const CATEGORIES: &[LabelDef] = &[
    LabelDef {
        key: "culture",
        label: "문화",
        english: "Culture",
        rule: "Arts, content, heritage, religion, publishing, copyright.",
    },
    LabelDef {
        key: "sports",
        label: "체육",
        english: "Sports",
        rule: "Sports policy, events, athletes, facilities.",
    },
    LabelDef {
        key: "tourism",
        label: "관광",
        english: "Tourism",
        rule: "Tourism policy, travel, festivals, accommodation.",
    },
    LabelDef {
        key: "other",
        label: "기타",
        english: "Other",
        rule: "General or unrelated.",
    },
];

pub const TYPES: &[LabelDef] = &[
    LabelDef {
        key: "political",
        label: "정쟁",
        english: "Political",
        rule: "Criticism of government/minister, inspection issues, political conflict.",
    },
    LabelDef {
        key: "policy",
        label: "정책",
        english: "Policy",
        rule: "**MUST involve government budget, new laws, official system changes, or massive support programs.** Simple MOU signing or future plans without concrete details are NOT policy.",
    },
    LabelDef {
        key: "promotion",
        label: "홍보",
        english: "Promotion",
        rule: "**Simple events, festivals, awards, openings, marketing, or achievements.** ex) \"Festival held\", \"Award winner\", \"Concert opens\".",
    },
    LabelDef {
        key: "society",
        label: "사회",
        english: "Society",
        rule: "Social issues, accidents, complaints, general news affecting the public.",
    },
    LabelDef {
        key: "other",
        label: "기타",
        english: "Other",
        rule: "Unclear.",
    },
];

/// Topical category of an article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Culture,
    Sports,
    Tourism,
    Other,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Culture,
        Category::Sports,
        Category::Tourism,
        Category::Other,
    ];

    pub fn definition(self) -> &'static LabelDef {
        &CATEGORIES[self as usize]
    }

    pub fn key(self) -> &'static str {
        self.definition().key
    }

    pub fn label(self) -> &'static str {
        self.definition().label
    }

    /// Accepts the model label, the key, or the English name
    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.definition().matches(value))
    }
}

/// Editorial-intent type of an article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleType {
    Political,
    Policy,
    Promotion,
    Society,
    Other,
}

impl ArticleType {
    pub const ALL: [ArticleType; 5] = [
        ArticleType::Political,
        ArticleType::Policy,
        ArticleType::Promotion,
        ArticleType::Society,
        ArticleType::Other,
    ];

    pub fn definition(self) -> &'static LabelDef {
        &TYPES[self as usize]
    }

    pub fn key(self) -> &'static str {
        self.definition().key
    }

    pub fn label(self) -> &'static str {
        self.definition().label
    }

    /// Accepts the model label, the key, or the English name
    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.definition().matches(value))
    }
}

/// Deterministic SHA-256 digest of the taxonomy table
pub fn taxonomy_fingerprint() -> String {
    let mut hasher = Sha256::new();
    hasher.update(TAXONOMY_VERSION.as_bytes());
    for (section, defs) in [("category", CATEGORIES), ("type", TYPES)] {
        hasher.update(section.as_bytes());
        for def in defs {
            hasher.update(def.key.as_bytes());
            hasher.update(def.label.as_bytes());
            hasher.update(def.english.as_bytes());
            hasher.update(def.rule.as_bytes());
        }
    }
    format!("{:x}", hasher.finalize())
}
