use async_trait::async_trait;
use cli_clipboard::{ClipboardContext, ClipboardProvider};
use tracing::debug;

use super::interface::ClipboardInterface;
use crate::error::WidgetError;

/// The desktop clipboard of the session the server runs in.
#[derive(Debug, Clone, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ClipboardInterface for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<(), anyhow::Error> {
        let contents = text.to_string();
        let len = contents.len();

        tokio::task::spawn_blocking(move || {
            ClipboardContext::new()
                .and_then(|mut ctx| ctx.set_contents(contents))
                .map_err(|e| WidgetError::Clipboard(e.to_string()))
        })
        .await??;

        debug!("Copied {} bytes to clipboard", len);
        Ok(())
    }
}
