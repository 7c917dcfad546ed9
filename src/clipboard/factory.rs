use std::sync::Arc;
use tracing::info;

use super::command::CommandClipboard;
use super::interface::ClipboardInterface;
use super::system::SystemClipboard;
use crate::config::ClipboardConfig;

/// Factory for clipboard backends.
pub struct ClipboardFactory;

impl ClipboardFactory {
    /// A configured command wins; otherwise the desktop clipboard is used.
    pub fn create_clipboard(config: &ClipboardConfig) -> Arc<dyn ClipboardInterface> {
        match config.command.as_deref() {
            Some([program, args @ ..]) => {
                info!("Clipboard program: {} {:?}", program, args);
                Arc::new(CommandClipboard::new(program.clone(), args.to_vec()))
            }
            _ => {
                info!("Clipboard: system");
                Arc::new(SystemClipboard::new())
            }
        }
    }
}
