use serde::{Deserialize, Serialize};

/// Body accepted by both `translate` and `judge`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TextRequest {
    pub text: String,
}

impl TextRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TranslationResponse {
    #[serde(default)]
    pub original_text: String,

    #[serde(default)]
    pub wizard_texts: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct JudgementResponse {
    #[serde(default)]
    pub text: String,

    /// 1..=10 as scored by the backend.
    #[serde(default)]
    pub score: i64,

    #[serde(default)]
    pub feedback: String,

    #[serde(default)]
    pub suggestions: Vec<String>,
}
