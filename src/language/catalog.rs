//! Language catalog backing both language selectors.
//!
//! The catalog is an ordered list of `(code, label)` pairs loaded once at
//! startup. Codes are BCP 47 style tags (`en-GB`, `hi-IN`) as understood by
//! the MyMemory API and by speech engines.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

use crate::config::TranslatorConfig;
use crate::error::{Result, WidgetError};

pub const DEFAULT_SOURCE_LANGUAGE: &str = "en-GB";
pub const DEFAULT_TARGET_LANGUAGE: &str = "hi-IN";

const BUILTIN_LANGUAGES: &[(&str, &str)] = &[
    ("am-ET", "Amharic"),
    ("ar-SA", "Arabic"),
    ("be-BY", "Bielarus"),
    ("bem-ZM", "Bemba"),
    ("bi-VU", "Bislama"),
    ("bjs-BB", "Bajan"),
    ("bn-IN", "Bengali"),
    ("bo-CN", "Tibetan"),
    ("br-FR", "Breton"),
    ("bs-BA", "Bosnian"),
    ("ca-ES", "Catalan"),
    ("cop-EG", "Coptic"),
    ("cs-CZ", "Czech"),
    ("cy-GB", "Welsh"),
    ("da-DK", "Danish"),
    ("dz-BT", "Dzongkha"),
    ("de-DE", "German"),
    ("dv-MV", "Maldivian"),
    ("el-GR", "Greek"),
    ("en-GB", "English"),
    ("es-ES", "Spanish"),
    ("et-EE", "Estonian"),
    ("eu-ES", "Basque"),
    ("fa-IR", "Persian"),
    ("fi-FI", "Finnish"),
    ("fn-FNG", "Fanagalo"),
    ("fo-FO", "Faroese"),
    ("fr-FR", "French"),
    ("gl-ES", "Galician"),
    ("gu-IN", "Gujarati"),
    ("ha-NE", "Hausa"),
    ("he-IL", "Hebrew"),
    ("hi-IN", "Hindi"),
    ("hr-HR", "Croatian"),
    ("hu-HU", "Hungarian"),
    ("id-ID", "Indonesian"),
    ("is-IS", "Icelandic"),
    ("it-IT", "Italian"),
    ("ja-JP", "Japanese"),
    ("kk-KZ", "Kazakh"),
    ("km-KM", "Khmer"),
    ("kn-IN", "Kannada"),
    ("ko-KR", "Korean"),
    ("ku-TR", "Kurdish"),
    ("ky-KG", "Kyrgyz"),
    ("la-VA", "Latin"),
    ("lo-LA", "Lao"),
    ("lv-LV", "Latvian"),
    ("men-SL", "Mende"),
    ("mg-MG", "Malagasy"),
    ("mi-NZ", "Maori"),
    ("ms-MY", "Malay"),
    ("mt-MT", "Maltese"),
    ("my-MM", "Burmese"),
    ("ne-NP", "Nepali"),
    ("niu-NU", "Niuean"),
    ("nl-NL", "Dutch"),
    ("no-NO", "Norwegian"),
    ("ny-MW", "Nyanja"),
    ("ur-PK", "Pakistani"),
    ("pau-PW", "Palauan"),
    ("pa-IN", "Panjabi"),
    ("ps-PK", "Pashto"),
    ("pis-SB", "Pijin"),
    ("pl-PL", "Polish"),
    ("pt-PT", "Portuguese"),
    ("rn-BI", "Kirundi"),
    ("ro-RO", "Romanian"),
    ("ru-RU", "Russian"),
    ("sg-CF", "Sango"),
    ("si-LK", "Sinhala"),
    ("sk-SK", "Slovak"),
    ("sm-WS", "Samoan"),
    ("sn-ZW", "Shona"),
    ("so-SO", "Somali"),
    ("sq-AL", "Albanian"),
    ("sr-RS", "Serbian"),
    ("sv-SE", "Swedish"),
    ("sw-SZ", "Swahili"),
    ("ta-LK", "Tamil"),
    ("te-IN", "Telugu"),
    ("tet-TL", "Tetum"),
    ("tg-TJ", "Tajik"),
    ("th-TH", "Thai"),
    ("ti-TI", "Tigrinya"),
    ("tk-TM", "Turkmen"),
    ("tl-PH", "Tagalog"),
    ("tn-BW", "Tswana"),
    ("to-TO", "Tongan"),
    ("tr-TR", "Turkish"),
    ("uk-UA", "Ukrainian"),
    ("uz-UZ", "Uzbek"),
    ("vi-VN", "Vietnamese"),
    ("wo-SN", "Wolof"),
    ("xh-ZA", "Xhosa"),
    ("yi-YD", "Yiddish"),
    ("zu-ZA", "Zulu"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageEntry {
    pub code: String,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct LanguageCatalog {
    entries: Vec<LanguageEntry>,
    source_default: String,
    target_default: String,
}

impl LanguageCatalog {
    /// Build a catalog, keeping the first entry for any repeated code.
    ///
    /// Fails when either default is not one of the entries.
    pub fn new(
        entries: Vec<LanguageEntry>,
        source_default: &str,
        target_default: &str,
    ) -> Result<Self> {
        let mut seen = HashSet::new();
        let entries: Vec<LanguageEntry> = entries
            .into_iter()
            .filter(|entry| {
                let fresh = seen.insert(entry.code.clone());
                if !fresh {
                    warn!("Duplicate language code in catalog ignored: {}", entry.code);
                }
                fresh
            })
            .collect();

        let catalog = Self {
            entries,
            source_default: source_default.to_string(),
            target_default: target_default.to_string(),
        };

        for code in [source_default, target_default] {
            if !catalog.contains(code) {
                return Err(WidgetError::UnknownLanguage(code.to_string()));
            }
        }

        Ok(catalog)
    }

    pub fn builtin() -> Self {
        Self {
            entries: builtin_entries(),
            source_default: DEFAULT_SOURCE_LANGUAGE.to_string(),
            target_default: DEFAULT_TARGET_LANGUAGE.to_string(),
        }
    }

    pub fn from_config(config: &TranslatorConfig) -> Result<Self> {
        let entries = config.languages.clone().unwrap_or_else(builtin_entries);
        Self::new(entries, &config.source_default, &config.target_default)
    }

    pub fn entries(&self) -> &[LanguageEntry] {
        &self.entries
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.iter().any(|entry| entry.code == code)
    }

    pub fn label(&self, code: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.code == code)
            .map(|entry| entry.label.as_str())
    }

    pub fn source_default(&self) -> &str {
        &self.source_default
    }

    pub fn target_default(&self) -> &str {
        &self.target_default
    }
}

fn builtin_entries() -> Vec<LanguageEntry> {
    BUILTIN_LANGUAGES
        .iter()
        .map(|(code, label)| LanguageEntry {
            code: code.to_string(),
            label: label.to_string(),
        })
        .collect()
}
