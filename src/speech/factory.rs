use std::sync::Arc;
use tracing::info;

use super::client::HttpSpeech;
use super::command::CommandSpeech;
use super::interface::{SilentSpeech, SpeechInterface};
use crate::config::{SpeechConfig, SpeechEngine};

/// Factory for speech engines.
pub struct SpeechFactory;

impl SpeechFactory {
    pub fn create_speech(config: &SpeechConfig) -> Arc<dyn SpeechInterface> {
        info!("Initializing speech engine: {:?}", config.engine);

        match config.engine {
            SpeechEngine::Command => Arc::new(CommandSpeech::new(config.command.clone())),
            SpeechEngine::Http => Arc::new(HttpSpeech::new(config.base_url.clone())),
            SpeechEngine::None => Arc::new(SilentSpeech),
        }
    }
}
