use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use super::interface::ClipboardInterface;
use crate::error::WidgetError;

/// Clipboard backed by a configured program that reads the text on stdin
/// (e.g. `wl-copy` or `xclip -selection clipboard`).
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

#[async_trait]
impl ClipboardInterface for CommandClipboard {
    async fn write_text(&self, text: &str) -> Result<(), anyhow::Error> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| WidgetError::Clipboard(format!("failed to start {}: {}", self.program, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await?;
            stdin.shutdown().await?;
        }

        let status = child.wait().await?;
        if !status.success() {
            return Err(WidgetError::Clipboard(format!("{} exited with {}", self.program, status)).into());
        }

        debug!("Copied {} bytes to clipboard", text.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[tokio::test]
    async fn pipes_text_to_program() {
        let path = std::env::temp_dir().join(format!("clip-{}.txt", uuid::Uuid::new_v4()));
        let clipboard = CommandClipboard::new(
            "sh",
            vec!["-c".to_string(), format!("cat > {}", path.display())],
        );

        clipboard.write_text("Bonjour").await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Bonjour");
        std::fs::remove_file(&path).unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_program_is_an_error() {
        let clipboard = CommandClipboard::new("false", Vec::new());
        assert!(clipboard.write_text("text").await.is_err());

        let clipboard = CommandClipboard::new("no-such-clipboard-program", Vec::new());
        assert!(clipboard.write_text("text").await.is_err());
    }
}
