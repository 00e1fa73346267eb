use tracing::debug;

use crate::model::translation::TranslationState;
use crate::services::observable::{Observable, Subscription};

/// Holds the last translation and the user's pick among its candidates.
///
/// Views only ever get a subscription or a snapshot; all writes go through
/// the three operations below.
#[derive(Debug, Clone)]
pub struct TranslationStore {
    state: Observable<TranslationState>,
}

impl Default for TranslationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TranslationStore {
    pub fn new() -> Self {
        Self {
            state: Observable::new(TranslationState::default()),
        }
    }

    pub fn subscribe(&self, callback: impl Fn(&TranslationState) + 'static) -> Subscription {
        self.state.subscribe(callback)
    }

    pub fn get(&self) -> TranslationState {
        self.state.get()
    }

    /// Read the current state without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&TranslationState) -> R) -> R {
        self.state.with(f)
    }

    /// Replace everything; the first candidate becomes the selection.
    pub fn set_translations(&self, original: impl Into<String>, translations: Vec<String>) {
        let next = TranslationState::with_translations(original.into(), translations);
        debug!(candidates = next.translations.len(), "store: set translations");
        self.state.set(next);
    }

    /// Out-of-range indices clear the selection instead of failing.
    pub fn select_translation(&self, index: usize) {
        self.state.update(|s| {
            s.selected_translation = s.translations.get(index).cloned();
        });
    }

    pub fn reset(&self) {
        debug!("store: reset");
        self.state.set(TranslationState::default());
    }
}
