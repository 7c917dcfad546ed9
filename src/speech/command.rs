use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use super::interface::SpeechInterface;
use crate::error::WidgetError;

/// Speech through an espeak-compatible program: `<program> -v <voice> --stdin`,
/// with the text written to its stdin so it is never read as an option.
#[derive(Debug, Clone)]
pub struct CommandSpeech {
    program: String,
}

impl CommandSpeech {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

/// espeak voices are keyed by primary language subtag (`en-GB` -> `en`).
pub fn voice_for(language: &str) -> String {
    language
        .split(['-', '_'])
        .next()
        .unwrap_or(language)
        .to_ascii_lowercase()
}

#[async_trait]
impl SpeechInterface for CommandSpeech {
    async fn speak(&self, text: &str, language: &str) -> Result<(), anyhow::Error> {
        let voice = voice_for(language);
        let mut child = Command::new(&self.program)
            .arg("-v")
            .arg(&voice)
            .arg("--stdin")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| WidgetError::Speech(format!("failed to start {}: {}", self.program, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await?;
            stdin.shutdown().await?;
        }

        debug!("Speaking {} chars with voice {}", text.chars().count(), voice);

        // Reap in the background so playback never blocks the caller.
        let program = self.program.clone();
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) if !status.success() => warn!("{} exited with {}", program, status),
                Err(e) => warn!("Failed to wait for {}: {}", program, e),
                _ => {}
            }
        });

        Ok(())
    }
}
