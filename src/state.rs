use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::clipboard::{ClipboardFactory, ClipboardInterface};
use crate::config::Config;
use crate::language::LanguageCatalog;
use crate::speech::{SpeechFactory, SpeechInterface};
use crate::translate::{MyMemoryClient, TranslateInterface};
use crate::widget::WidgetController;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub controller: WidgetController,
    /// Connected pages, client uid -> connection time.
    pub clients: Arc<DashMap<String, DateTime<Utc>>>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let catalog = Arc::new(LanguageCatalog::from_config(&config.translator_config)?);
        let translator = Arc::new(MyMemoryClient::from_config(&config.translator_config));
        let clipboard = ClipboardFactory::create_clipboard(&config.clipboard_config);
        let speech = SpeechFactory::create_speech(&config.speech_config);

        Ok(Self::with_collaborators(config, catalog, translator, clipboard, speech))
    }

    pub fn with_collaborators(
        config: Config,
        catalog: Arc<LanguageCatalog>,
        translator: Arc<dyn TranslateInterface>,
        clipboard: Arc<dyn ClipboardInterface>,
        speech: Arc<dyn SpeechInterface>,
    ) -> Self {
        let feedback_delay = Duration::from_millis(config.clipboard_config.feedback_ms);
        let controller = WidgetController::new(catalog, translator, clipboard, speech, feedback_delay);

        Self {
            config: Arc::new(config),
            controller,
            clients: Arc::new(DashMap::new()),
            started_at: Utc::now(),
        }
    }

    pub fn generate_client_uid(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
