use anyhow::{Context, Result};
use config::{Environment, File, FileFormat};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::language::catalog::{DEFAULT_SOURCE_LANGUAGE, DEFAULT_TARGET_LANGUAGE};
use crate::language::LanguageEntry;

/// Prefix for environment overrides, e.g. `TRANSLATOR__SYSTEM_CONFIG__PORT=8080`.
pub const ENV_PREFIX: &str = "TRANSLATOR";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub system_config: SystemConfig,
    #[serde(default)]
    pub translator_config: TranslatorConfig,
    #[serde(default)]
    pub clipboard_config: ClipboardConfig,
    #[serde(default)]
    pub speech_config: SpeechConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Sent as `de` so MyMemory grants the larger daily quota.
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default = "default_source_language")]
    pub source_default: String,
    #[serde(default = "default_target_language")]
    pub target_default: String,
    /// Replaces the builtin language list when present.
    #[serde(default)]
    pub languages: Option<Vec<LanguageEntry>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipboardConfig {
    /// Program and arguments that read the text on stdin.
    #[serde(default)]
    pub command: Option<Vec<String>>,
    #[serde(default = "default_feedback_ms")]
    pub feedback_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechEngine {
    Command,
    Http,
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    #[serde(default = "default_speech_engine")]
    pub engine: SpeechEngine,
    #[serde(default = "default_speech_command")]
    pub command: String,
    #[serde(default = "default_speech_base_url")]
    pub base_url: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    12480
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_log_filter() -> String {
    "translate_widget=debug,tower_http=debug".to_string()
}

fn default_api_url() -> String {
    "https://api.mymemory.translated.net/get".to_string()
}

fn default_source_language() -> String {
    DEFAULT_SOURCE_LANGUAGE.to_string()
}

fn default_target_language() -> String {
    DEFAULT_TARGET_LANGUAGE.to_string()
}

fn default_feedback_ms() -> u64 {
    1000
}

fn default_speech_engine() -> SpeechEngine {
    SpeechEngine::Command
}

fn default_speech_command() -> String {
    "espeak-ng".to_string()
}

fn default_speech_base_url() -> String {
    "http://localhost:8000".to_string()
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            log_filter: default_log_filter(),
        }
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            contact_email: None,
            source_default: default_source_language(),
            target_default: default_target_language(),
            languages: None,
        }
    }
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            command: None,
            feedback_ms: default_feedback_ms(),
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            engine: default_speech_engine(),
            command: default_speech_command(),
            base_url: default_speech_base_url(),
        }
    }
}

impl Config {
    /// Load a YAML or JSON file (by extension), then apply environment overrides.
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            anyhow::bail!("Configuration file not found: {}", path);
        }

        let content = load_text_file(path)?;
        let content = substitute_env_vars(&content, |name| std::env::var(name).ok());

        let path_lower = path.to_lowercase();
        let format = if path_lower.ends_with(".json") || path_lower.ends_with(".jsonld") {
            FileFormat::Json
        } else {
            FileFormat::Yaml
        };

        Self::layered(Some((&content, format)), ENV_PREFIX)
            .with_context(|| format!("Invalid configuration in {}", path))
    }

    /// Defaults plus environment overrides, used when no file is found.
    pub fn from_env() -> Result<Self> {
        Self::layered(None, ENV_PREFIX)
    }

    fn layered(file: Option<(&str, FileFormat)>, env_prefix: &str) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some((content, format)) = file {
            builder = builder.add_source(File::from_str(content, format));
        }
        let settings = builder
            .add_source(
                Environment::with_prefix(env_prefix)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

/// Read a text file, honouring a UTF-8/UTF-16 byte order mark when present.
pub fn load_text_file(path: &str) -> Result<String> {
    let bytes = fs::read(path)?;
    let (encoding, bom_len) =
        encoding_rs::Encoding::for_bom(&bytes).unwrap_or((encoding_rs::UTF_8, 0));
    let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
    if had_errors {
        warn!("Configuration file {} contains invalid {} sequences", path, encoding.name());
    }
    Ok(text.into_owned())
}

/// Replace `${VAR_NAME}` with the variable's value; unknown names stay as written.
pub fn substitute_env_vars<F>(content: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let pattern = Regex::new(r"\$\{(\w+)\}").expect("static pattern");
    pattern
        .replace_all(content, |caps: &regex::Captures| {
            lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
