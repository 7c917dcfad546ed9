use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Result, WidgetError};
use crate::state::AppState;
use crate::widget::{Side, SourceEdit};

/// Apply one websocket message from a page to the widget.
///
/// The resulting state reaches every page through the view channel, so
/// nothing is returned. Slow actions run detached from the socket loop.
pub async fn handle_message(state: &AppState, client_uid: &str, text: &str) -> Result<()> {
    let msg: Value = serde_json::from_str(text)?;
    let msg_type = msg.get("type").and_then(|v| v.as_str());
    debug!("Message from {}: {:?}", client_uid, msg_type);

    match msg_type {
        Some("set-text") => {
            let text = str_field(&msg, "text")?.to_string();
            match source_edit(&msg)? {
                Some(edit) => state.controller.edit_source_text(text, edit).await,
                None => state.controller.set_source_text(text).await,
            };
        }
        Some("select-language") => {
            let side = side_field(&msg)?;
            let code = str_field(&msg, "code")?;
            state.controller.select_language(side, code).await?;
        }
        Some("translate") => {
            let controller = state.controller.clone();
            tokio::spawn(async move {
                controller.translate().await;
            });
        }
        Some("swap") => {
            state.controller.swap().await;
        }
        Some("copy") => {
            let side = side_field(&msg)?;
            let controller = state.controller.clone();
            tokio::spawn(async move {
                controller.copy(side).await;
            });
        }
        Some("speak") => {
            let side = side_field(&msg)?;
            let controller = state.controller.clone();
            tokio::spawn(async move {
                controller.speak(side).await;
            });
        }
        _ => {
            warn!("Unknown message type: {:?}", msg_type);
        }
    }

    Ok(())
}

fn str_field<'a>(msg: &'a Value, name: &str) -> Result<&'a str> {
    msg.get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| WidgetError::InvalidMessage(format!("{} is required", name)))
}

fn side_field(msg: &Value) -> Result<Side> {
    str_field(msg, "side")?.parse()
}

/// `editor` and `seq` travel together; a page that sends neither is untracked.
fn source_edit(msg: &Value) -> Result<Option<SourceEdit>> {
    match (msg.get("editor"), msg.get("seq")) {
        (None, None) => Ok(None),
        (Some(Value::String(editor)), Some(seq)) => {
            let seq = seq
                .as_u64()
                .ok_or_else(|| WidgetError::InvalidMessage("seq must be a non-negative integer".to_string()))?;
            Ok(Some(SourceEdit {
                editor: editor.clone(),
                seq,
            }))
        }
        _ => Err(WidgetError::InvalidMessage("editor and seq are required together".to_string())),
    }
}
