use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, RwLock};
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::feedback::CopyTimers;
use super::state::{Side, SourceEdit, TranslatorWidget, WidgetView};
use crate::clipboard::ClipboardInterface;
use crate::error::Result;
use crate::language::LanguageCatalog;
use crate::speech::SpeechInterface;
use crate::translate::{TranslateInterface, TranslationOutcome, TranslationRequest};

/// Runs the widget's actions against its collaborators and publishes every
/// resulting state as a [`WidgetView`].
#[derive(Clone)]
pub struct WidgetController {
    catalog: Arc<LanguageCatalog>,
    widget: Arc<RwLock<TranslatorWidget>>,
    translator: Arc<dyn TranslateInterface>,
    clipboard: Arc<dyn ClipboardInterface>,
    speech: Arc<dyn SpeechInterface>,
    views: Arc<watch::Sender<WidgetView>>,
    copy_timers: Arc<CopyTimers>,
    feedback_delay: Duration,
}

impl WidgetController {
    pub fn new(
        catalog: Arc<LanguageCatalog>,
        translator: Arc<dyn TranslateInterface>,
        clipboard: Arc<dyn ClipboardInterface>,
        speech: Arc<dyn SpeechInterface>,
        feedback_delay: Duration,
    ) -> Self {
        let widget = TranslatorWidget::new(catalog.clone());
        let (views, _) = watch::channel(widget.view());
        Self {
            catalog,
            widget: Arc::new(RwLock::new(widget)),
            translator,
            clipboard,
            speech,
            views: Arc::new(views),
            copy_timers: Arc::new(CopyTimers::new()),
            feedback_delay,
        }
    }

    pub fn catalog(&self) -> &LanguageCatalog {
        &self.catalog
    }

    pub async fn view(&self) -> WidgetView {
        self.widget.read().await.view()
    }

    /// Receiver that sees every published view, starting with the current one.
    pub fn subscribe(&self) -> watch::Receiver<WidgetView> {
        self.views.subscribe()
    }

    /// Send the current state again, e.g. after rejecting a page's edit.
    pub async fn republish(&self) -> WidgetView {
        let widget = self.widget.read().await;
        self.publish(&widget)
    }

    fn publish(&self, widget: &TranslatorWidget) -> WidgetView {
        let view = widget.view();
        self.views.send_replace(view.clone());
        view
    }

    pub async fn set_source_text(&self, text: String) -> WidgetView {
        let mut widget = self.widget.write().await;
        widget.set_source_text(text);
        self.publish(&widget)
    }

    pub async fn edit_source_text(&self, text: String, edit: SourceEdit) -> WidgetView {
        let mut widget = self.widget.write().await;
        widget.edit_source_text(text, edit);
        self.publish(&widget)
    }

    pub async fn select_language(&self, side: Side, code: &str) -> Result<WidgetView> {
        let mut widget = self.widget.write().await;
        widget.select_language(side, code)?;
        debug!("Selected {} language {}", side, code);
        Ok(self.publish(&widget))
    }

    pub async fn swap(&self) -> WidgetView {
        let mut widget = self.widget.write().await;
        widget.swap();
        self.publish(&widget)
    }

    /// Translate the source pane into the target pane.
    ///
    /// Blank input is a no-op. Failures end up as the error message in the
    /// target pane and are never returned. Overlapping calls are not
    /// cancelled; whichever response resolves last owns the target text.
    pub async fn translate(&self) -> WidgetView {
        let request = {
            let mut widget = self.widget.write().await;
            match widget.begin_translation() {
                Some(request) => {
                    self.publish(&widget);
                    request
                }
                None => return widget.view(),
            }
        };

        // Detached so the pending count still drops if this caller is cancelled.
        let controller = self.clone();
        let task = tokio::spawn(async move { controller.complete_translation(request).await });
        match task.await {
            Ok(view) => view,
            Err(e) => {
                error!("Translation task failed: {}", e);
                let mut widget = self.widget.write().await;
                widget.finish_translation(&TranslationOutcome::Failed);
                self.publish(&widget)
            }
        }
    }

    async fn complete_translation(&self, request: TranslationRequest) -> WidgetView {
        let request_id = Uuid::new_v4();
        let span = info_span!(
            "translate",
            %request_id,
            source = %request.source_language,
            target = %request.target_language,
        );

        let outcome = async {
            match self.translator.translate(&request).await {
                Ok(translated) => {
                    let outcome = TranslationOutcome::from(translated);
                    info!("Translation finished: {}", outcome_kind(&outcome));
                    outcome
                }
                Err(e) => {
                    error!("Translation Error: {}", e);
                    TranslationOutcome::Failed
                }
            }
        }
        .instrument(span)
        .await;

        let mut widget = self.widget.write().await;
        widget.finish_translation(&outcome);
        self.publish(&widget)
    }

    /// Copy a pane's text to the clipboard and flag it as copied for a moment.
    pub async fn copy(&self, side: Side) -> WidgetView {
        let text = self.widget.read().await.text(side).to_string();
        if text.is_empty() {
            return self.view().await;
        }

        if let Err(e) = self.clipboard.write_text(&text).await {
            warn!("Copy from {} pane failed: {}", side, e);
            return self.view().await;
        }

        // The timer is registered under the lock so timers land in generation order.
        let mut widget = self.widget.write().await;
        let generation = widget.mark_copied(side);
        self.schedule_copy_reset(side, generation);
        self.publish(&widget)
    }

    fn schedule_copy_reset(&self, side: Side, generation: u64) {
        let controller = self.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(controller.feedback_delay).await;
            let mut widget = controller.widget.write().await;
            if widget.reset_copied(side, generation) {
                controller.publish(&widget);
            }
            drop(widget);
            controller.copy_timers.finish(side, generation);
        });
        self.copy_timers.replace(side, generation, task.abort_handle());
    }

    /// Speak a pane's text in that pane's language.
    pub async fn speak(&self, side: Side) -> WidgetView {
        let (text, language, view) = {
            let widget = self.widget.read().await;
            (widget.text(side).to_string(), widget.language(side).to_string(), widget.view())
        };
        if text.is_empty() {
            return view;
        }

        if let Err(e) = self.speech.speak(&text, &language).await {
            warn!("Speech for {} pane failed: {}", side, e);
        }
        view
    }

    /// Abort pending copy-feedback timers.
    pub fn shutdown(&self) {
        self.copy_timers.cancel_all();
    }
}

fn outcome_kind(outcome: &TranslationOutcome) -> &'static str {
    match outcome {
        TranslationOutcome::Translated(_) => "translated",
        TranslationOutcome::Unavailable => "unavailable",
        TranslationOutcome::Failed => "failed",
    }
}
