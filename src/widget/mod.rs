//! The translation widget: pane state, copy feedback and the action flow.

pub mod feedback;
pub mod flow;
pub mod state;

pub use flow::WidgetController;
pub use state::{PaneView, Side, SourceEdit, TranslatorWidget, WidgetView};
