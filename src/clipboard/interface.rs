use async_trait::async_trait;

/// System clipboard.
#[async_trait]
pub trait ClipboardInterface: Send + Sync {
    /// Place `text` on the clipboard, replacing its contents.
    async fn write_text(&self, text: &str) -> Result<(), anyhow::Error>;
}
