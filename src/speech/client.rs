use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error};

use super::interface::{SpeechInterface, SpeechRequest, SpeechResponse};

/// Speech client that hands utterances to an HTTP speech service.
#[derive(Debug, Clone)]
pub struct HttpSpeech {
    client: Client,
    base_url: String,
}

impl HttpSpeech {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl SpeechInterface for HttpSpeech {
    async fn speak(&self, text: &str, language: &str) -> Result<(), anyhow::Error> {
        let url = format!("{}/tts/synthesize", self.base_url.trim_end_matches('/'));
        let request = SpeechRequest {
            text: text.to_string(),
            language: language.to_string(),
        };

        debug!("Sending speech request: language={}, chars={}", language, text.chars().count());

        let response: SpeechResponse = self.client.post(&url).json(&request).send().await?.json().await?;
        if response.success {
            debug!("Speech service accepted utterance: {:?}", response.audio_path);
            Ok(())
        } else {
            let error_msg = response.error.unwrap_or_else(|| "Unknown error".to_string());
            error!("Speech synthesis failed: {}", error_msg);
            Err(anyhow::anyhow!("Speech synthesis failed: {}", error_msg))
        }
    }
}
