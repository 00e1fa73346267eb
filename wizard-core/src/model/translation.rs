use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct TranslationState {
    #[serde(default)]
    pub original: String,

    /// Candidates in the order the backend ranked them.
    #[serde(default)]
    pub translations: Vec<String>,

    #[serde(default)]
    pub selected_translation: Option<String>,
}

impl TranslationState {
    /// Fresh state for a new set of candidates; the first one is selected.
    pub fn with_translations(original: String, translations: Vec<String>) -> Self {
        let selected_translation = translations.first().cloned();
        Self {
            original,
            translations,
            selected_translation,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.original.is_empty() && self.translations.is_empty()
    }
}
