//! In-memory collaborators for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;

use crate::clipboard::ClipboardInterface;
use crate::config::Config;
use crate::error::{Result, WidgetError};
use crate::language::LanguageCatalog;
use crate::speech::SpeechInterface;
use crate::translate::{TranslateInterface, TranslationRequest};
use crate::state::AppState;
use crate::widget::WidgetController;

pub enum Reply {
    Text(&'static str),
    Missing,
    Fail,
    Gated(oneshot::Receiver<Option<String>>),
}

/// Answers by source text; unknown texts fail like a dropped connection.
#[derive(Default)]
pub struct FakeTranslator {
    replies: Mutex<HashMap<String, Reply>>,
    calls: Mutex<Vec<TranslationRequest>>,
}

impl FakeTranslator {
    pub fn reply(&self, text: &str, reply: Reply) {
        self.replies.lock().unwrap().insert(text.to_string(), reply);
    }

    pub fn calls(&self) -> Vec<TranslationRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TranslateInterface for FakeTranslator {
    async fn translate(&self, request: &TranslationRequest) -> Result<Option<String>> {
        self.calls.lock().unwrap().push(request.clone());
        let reply = self.replies.lock().unwrap().remove(&request.text);
        match reply {
            Some(Reply::Text(text)) => Ok(Some(text.to_string())),
            Some(Reply::Missing) => Ok(None),
            Some(Reply::Gated(gate)) => Ok(gate.await.unwrap_or(None)),
            Some(Reply::Fail) | None => {
                Err(WidgetError::MalformedResponse("connection reset".to_string()))
            }
        }
    }
}

#[derive(Default)]
pub struct FakeClipboard {
    pub fail: bool,
    pub writes: Mutex<Vec<String>>,
}

#[async_trait]
impl ClipboardInterface for FakeClipboard {
    async fn write_text(&self, text: &str) -> std::result::Result<(), anyhow::Error> {
        if self.fail {
            anyhow::bail!("permission denied");
        }
        self.writes.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeSpeech {
    pub utterances: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl SpeechInterface for FakeSpeech {
    async fn speak(&self, text: &str, language: &str) -> std::result::Result<(), anyhow::Error> {
        self.utterances.lock().unwrap().push((text.to_string(), language.to_string()));
        Ok(())
    }
}

pub struct Harness {
    pub controller: WidgetController,
    pub translator: Arc<FakeTranslator>,
    pub clipboard: Arc<FakeClipboard>,
    pub speech: Arc<FakeSpeech>,
}

pub fn harness_with(clipboard: FakeClipboard) -> Harness {
    let translator = Arc::new(FakeTranslator::default());
    let clipboard = Arc::new(clipboard);
    let speech = Arc::new(FakeSpeech::default());
    let controller = WidgetController::new(
        Arc::new(LanguageCatalog::builtin()),
        translator.clone(),
        clipboard.clone(),
        speech.clone(),
        Duration::from_millis(1000),
    );
    Harness {
        controller,
        translator,
        clipboard,
        speech,
    }
}

pub fn harness() -> Harness {
    harness_with(FakeClipboard::default())
}

pub struct AppHarness {
    pub state: AppState,
    pub translator: Arc<FakeTranslator>,
    pub clipboard: Arc<FakeClipboard>,
    pub speech: Arc<FakeSpeech>,
}

pub fn app_harness() -> AppHarness {
    let translator = Arc::new(FakeTranslator::default());
    let clipboard = Arc::new(FakeClipboard::default());
    let speech = Arc::new(FakeSpeech::default());
    let state = AppState::with_collaborators(
        Config::default(),
        Arc::new(LanguageCatalog::builtin()),
        translator.clone(),
        clipboard.clone(),
        speech.clone(),
    );
    AppHarness {
        state,
        translator,
        clipboard,
        speech,
    }
}
