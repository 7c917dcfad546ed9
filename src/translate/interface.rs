use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const TRANSLATION_UNAVAILABLE: &str = "Translation unavailable";
pub const TRANSLATION_ERROR: &str = "Error occurred!";

/// One translation invocation, built fresh from the widget state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
    pub source_language: String,
    pub target_language: String,
}

/// What ends up in the output pane after a translation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationOutcome {
    Translated(String),
    /// The service answered but carried no translated text.
    Unavailable,
    Failed,
}

impl TranslationOutcome {
    pub fn display_text(&self) -> &str {
        match self {
            TranslationOutcome::Translated(text) => text,
            TranslationOutcome::Unavailable => TRANSLATION_UNAVAILABLE,
            TranslationOutcome::Failed => TRANSLATION_ERROR,
        }
    }
}

impl From<Option<String>> for TranslationOutcome {
    fn from(translated: Option<String>) -> Self {
        match translated {
            Some(text) => TranslationOutcome::Translated(text),
            None => TranslationOutcome::Unavailable,
        }
    }
}

/// Remote translation service.
#[async_trait]
pub trait TranslateInterface: Send + Sync {
    /// Translate `request.text`.
    ///
    /// Returns `Ok(None)` for a well-formed answer without translated text,
    /// and an error for transport failures or unreadable bodies.
    async fn translate(&self, request: &TranslationRequest) -> Result<Option<String>>;
}
