use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Request body understood by the speech service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechRequest {
    pub text: String,
    pub language: String,
}

/// Reply from the speech service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechResponse {
    #[serde(default)]
    pub audio_path: Option<String>,
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Speech synthesis engine.
#[async_trait]
pub trait SpeechInterface: Send + Sync {
    /// Start speaking `text` in the language identified by the BCP 47 tag `language`.
    ///
    /// Returns once the engine accepted the utterance; playback is not awaited.
    async fn speak(&self, text: &str, language: &str) -> Result<(), anyhow::Error>;
}

/// Engine used when speech is switched off.
pub struct SilentSpeech;

#[async_trait]
impl SpeechInterface for SilentSpeech {
    async fn speak(&self, text: &str, language: &str) -> Result<(), anyhow::Error> {
        tracing::debug!("Speech disabled, dropping {} chars in {}", text.chars().count(), language);
        Ok(())
    }
}
