use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::feedback::CopyFeedback;
use crate::error::{Result, WidgetError};
use crate::language::LanguageCatalog;
use crate::translate::{TranslationOutcome, TranslationRequest};

pub const SOURCE_PLACEHOLDER: &str = "Enter Text";
pub const TARGET_PLACEHOLDER: &str = "Translation";
pub const TRANSLATING_PLACEHOLDER: &str = "Translating...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Source,
    Target,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Source => "source",
            Side::Target => "target",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = WidgetError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "source" => Ok(Side::Source),
            "target" => Ok(Side::Target),
            other => Err(WidgetError::UnknownSide(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pane {
    text: String,
    language: String,
    placeholder: &'static str,
    copy: CopyFeedback,
}

impl Pane {
    fn new(language: &str, placeholder: &'static str) -> Self {
        Self {
            text: String::new(),
            language: language.to_string(),
            placeholder,
            copy: CopyFeedback::default(),
        }
    }

    fn view(&self) -> PaneView {
        PaneView {
            text: self.text.clone(),
            language: self.language.clone(),
            placeholder: self.placeholder.to_string(),
            just_copied: self.copy.just_copied(),
            copy_label: self.copy.label().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaneView {
    pub text: String,
    pub language: String,
    pub placeholder: String,
    pub just_copied: bool,
    pub copy_label: String,
}

/// A page's edit of the source text. `seq` grows with every edit the page sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEdit {
    pub editor: String,
    pub seq: u64,
}

/// Snapshot of the widget handed to the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetView {
    pub source: PaneView,
    pub target: PaneView,
    pub translating: bool,
    /// The edit the source text came from; `None` when the server set it.
    #[serde(default)]
    pub source_edit: Option<SourceEdit>,
}

/// The widget's state: two panes with their selected languages.
///
/// Selected languages are always keys of the catalog.
#[derive(Debug, Clone)]
pub struct TranslatorWidget {
    catalog: Arc<LanguageCatalog>,
    source: Pane,
    target: Pane,
    source_edit: Option<SourceEdit>,
    in_flight: usize,
}

impl TranslatorWidget {
    pub fn new(catalog: Arc<LanguageCatalog>) -> Self {
        let source = Pane::new(catalog.source_default(), SOURCE_PLACEHOLDER);
        let target = Pane::new(catalog.target_default(), TARGET_PLACEHOLDER);
        Self {
            catalog,
            source,
            target,
            source_edit: None,
            in_flight: 0,
        }
    }

    fn pane(&self, side: Side) -> &Pane {
        match side {
            Side::Source => &self.source,
            Side::Target => &self.target,
        }
    }

    fn pane_mut(&mut self, side: Side) -> &mut Pane {
        match side {
            Side::Source => &mut self.source,
            Side::Target => &mut self.target,
        }
    }

    pub fn text(&self, side: Side) -> &str {
        &self.pane(side).text
    }

    pub fn language(&self, side: Side) -> &str {
        &self.pane(side).language
    }

    /// The source pane is the only editable one.
    pub fn set_source_text(&mut self, text: impl Into<String>) {
        self.source.text = text.into();
        self.source_edit = None;
    }

    /// Apply a page's edit and remember which one it was.
    pub fn edit_source_text(&mut self, text: impl Into<String>, edit: SourceEdit) {
        self.source.text = text.into();
        self.source_edit = Some(edit);
    }

    pub fn select_language(&mut self, side: Side, code: &str) -> Result<()> {
        if !self.catalog.contains(code) {
            return Err(WidgetError::UnknownLanguage(code.to_string()));
        }
        self.pane_mut(side).language = code.to_string();
        Ok(())
    }

    /// Exchange texts and selected languages. Copy feedback stays with its side.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.source.text, &mut self.target.text);
        std::mem::swap(&mut self.source.language, &mut self.target.language);
        self.source_edit = None;
    }

    /// Start a translation of the trimmed source text.
    ///
    /// Returns `None` and leaves the state untouched when there is nothing
    /// to translate.
    pub fn begin_translation(&mut self) -> Option<TranslationRequest> {
        let text = self.source.text.trim();
        if text.is_empty() {
            return None;
        }

        let request = TranslationRequest {
            text: text.to_string(),
            source_language: self.source.language.clone(),
            target_language: self.target.language.clone(),
        };
        self.in_flight += 1;
        self.target.placeholder = TRANSLATING_PLACEHOLDER;
        Some(request)
    }

    /// Write a finished translation into the target pane. The last call wins.
    pub fn finish_translation(&mut self, outcome: &TranslationOutcome) {
        self.target.text = outcome.display_text().to_string();
        self.in_flight = self.in_flight.saturating_sub(1);
        if self.in_flight == 0 {
            self.target.placeholder = TARGET_PLACEHOLDER;
        }
    }

    pub fn is_translating(&self) -> bool {
        self.in_flight > 0
    }

    /// Mark `side` as just copied and return the generation its reset must match.
    pub fn mark_copied(&mut self, side: Side) -> u64 {
        self.pane_mut(side).copy.mark()
    }

    /// Clear the copied flag if no newer copy happened since `generation`.
    pub fn reset_copied(&mut self, side: Side, generation: u64) -> bool {
        self.pane_mut(side).copy.reset(generation)
    }

    pub fn view(&self) -> WidgetView {
        WidgetView {
            source: self.source.view(),
            target: self.target.view(),
            translating: self.is_translating(),
            source_edit: self.source_edit.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::interface::{TRANSLATION_ERROR, TRANSLATION_UNAVAILABLE};

    fn widget() -> TranslatorWidget {
        TranslatorWidget::new(Arc::new(LanguageCatalog::builtin()))
    }

    #[test]
    fn starts_with_catalog_defaults() {
        let view = widget().view();
        assert_eq!(view.source.language, "en-GB");
        assert_eq!(view.target.language, "hi-IN");
        assert_eq!(view.source.placeholder, SOURCE_PLACEHOLDER);
        assert_eq!(view.target.placeholder, TARGET_PLACEHOLDER);
        assert!(view.source.text.is_empty());
        assert!(!view.translating);
        assert_eq!(view.target.copy_label, "Copy");
    }

    #[test]
    fn blank_source_does_not_start_translation() {
        let mut widget = widget();
        for text in ["", "   ", "\n\t "] {
            widget.set_source_text(text);
            let before = widget.view();
            assert!(widget.begin_translation().is_none());
            assert_eq!(widget.view(), before);
        }
    }

    #[test]
    fn translation_trims_and_toggles_placeholder() {
        let mut widget = widget();
        widget.set_source_text("  Hello  ");
        let request = widget.begin_translation().unwrap();
        assert_eq!(request.text, "Hello");
        assert_eq!(request.source_language, "en-GB");
        assert_eq!(request.target_language, "hi-IN");
        assert_eq!(widget.view().target.placeholder, TRANSLATING_PLACEHOLDER);
        assert!(widget.is_translating());

        widget.finish_translation(&TranslationOutcome::Translated("Bonjour".to_string()));
        let view = widget.view();
        assert_eq!(view.target.text, "Bonjour");
        assert_eq!(view.target.placeholder, TARGET_PLACEHOLDER);
        assert!(!view.translating);
    }

    #[test]
    fn outcomes_render_fixed_messages() {
        let mut widget = widget();
        widget.set_source_text("Hello");

        widget.begin_translation();
        widget.finish_translation(&TranslationOutcome::Unavailable);
        assert_eq!(widget.text(Side::Target), TRANSLATION_UNAVAILABLE);

        widget.begin_translation();
        widget.finish_translation(&TranslationOutcome::Failed);
        assert_eq!(widget.text(Side::Target), TRANSLATION_ERROR);
        assert_eq!(widget.view().target.placeholder, TARGET_PLACEHOLDER);
    }

    #[test]
    fn overlapping_translations_keep_pending_placeholder() {
        let mut widget = widget();
        widget.set_source_text("one");
        widget.begin_translation();
        widget.set_source_text("two");
        widget.begin_translation();

        widget.finish_translation(&TranslationOutcome::Translated("deux".to_string()));
        assert_eq!(widget.view().target.placeholder, TRANSLATING_PLACEHOLDER);

        widget.finish_translation(&TranslationOutcome::Translated("un".to_string()));
        assert_eq!(widget.text(Side::Target), "un");
        assert_eq!(widget.view().target.placeholder, TARGET_PLACEHOLDER);
    }

    #[test]
    fn swap_exchanges_text_and_language() {
        let mut widget = widget();
        widget.set_source_text("Hello");
        widget.select_language(Side::Target, "fr-FR").unwrap();
        widget.begin_translation();
        widget.finish_translation(&TranslationOutcome::Translated("Bonjour".to_string()));
        let original = widget.view();

        widget.swap();
        assert_eq!(widget.text(Side::Source), "Bonjour");
        assert_eq!(widget.language(Side::Source), "fr-FR");
        assert_eq!(widget.text(Side::Target), "Hello");
        assert_eq!(widget.language(Side::Target), "en-GB");
        assert!(!widget.is_translating());

        widget.swap();
        assert_eq!(widget.view(), original);
    }

    #[test]
    fn page_edits_are_tagged_until_the_server_changes_the_text() {
        let mut widget = widget();
        let edit = SourceEdit {
            editor: "page-1".to_string(),
            seq: 7,
        };
        widget.edit_source_text("Hello", edit.clone());
        let view = widget.view();
        assert_eq!(view.source.text, "Hello");
        assert_eq!(view.source_edit, Some(edit));

        widget.swap();
        assert_eq!(widget.view().source_edit, None);

        widget.edit_source_text("Hi", SourceEdit { editor: "page-1".to_string(), seq: 8 });
        widget.set_source_text("Hey");
        assert_eq!(widget.view().source_edit, None);
    }

    #[test]
    fn unknown_language_is_rejected() {
        let mut widget = widget();
        let before = widget.view();
        let err = widget.select_language(Side::Source, "xx-XX").unwrap_err();
        assert!(matches!(err, WidgetError::UnknownLanguage(_)));
        assert_eq!(widget.view(), before);

        widget.select_language(Side::Source, "ja-JP").unwrap();
        assert_eq!(widget.language(Side::Source), "ja-JP");
        assert_eq!(widget.language(Side::Target), "hi-IN");
    }

    #[test]
    fn side_parses_wire_names() {
        assert_eq!("source".parse::<Side>().unwrap(), Side::Source);
        assert_eq!("target".parse::<Side>().unwrap(), Side::Target);
        assert!(matches!("from".parse::<Side>(), Err(WidgetError::UnknownSide(_))));
        assert_eq!(serde_json::to_string(&Side::Target).unwrap(), "\"target\"");
    }
}
