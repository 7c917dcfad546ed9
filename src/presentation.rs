//! Server-side rendering of the widget page.

use crate::language::LanguageCatalog;
use crate::widget::WidgetView;

const PAGE_TEMPLATE: &str = include_str!("../static/index.html");

/// Render the page for the current widget state. Each selector lists the
/// whole catalog with its pane's language selected.
pub fn render_page(catalog: &LanguageCatalog, view: &WidgetView) -> String {
    PAGE_TEMPLATE
        .replace("{{source_options}}", &render_options(catalog, &view.source.language))
        .replace("{{target_options}}", &render_options(catalog, &view.target.language))
        .replace("{{source_placeholder}}", &escape_html(&view.source.placeholder))
        .replace("{{target_placeholder}}", &escape_html(&view.target.placeholder))
        .replace("{{source_copy_label}}", &escape_html(&view.source.copy_label))
        .replace("{{target_copy_label}}", &escape_html(&view.target.copy_label))
        .replace("{{source_text}}", &escape_html(&view.source.text))
        .replace("{{target_text}}", &escape_html(&view.target.text))
}

fn render_options(catalog: &LanguageCatalog, selected: &str) -> String {
    let mut options = String::new();
    for entry in catalog.entries() {
        let marker = if entry.code == selected { " selected" } else { "" };
        options.push_str(&format!(
            "<option value=\"{}\"{}>{}</option>\n",
            escape_html(&entry.code),
            marker,
            escape_html(&entry.label)
        ));
    }
    options
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
