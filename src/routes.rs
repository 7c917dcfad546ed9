use axum::{
    extract::{Path, State},
    response::Html,
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::services::ServeDir;

use crate::error::Result;
use crate::presentation;
use crate::state::AppState;
use crate::widget::{Side, WidgetView};

#[derive(Debug, Deserialize)]
pub struct TextPayload {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct LanguagePayload {
    pub code: String,
}

pub fn create_routes(state: &AppState) -> Router<AppState> {
    let system_config = &state.config.system_config;

    Router::new()
        // Widget page
        .route("/", get(index))

        // WebSocket
        .route("/client-ws", get(crate::websocket::websocket_handler))

        // Health check
        .route("/api/health", get(health_check))

        // Widget API
        .route("/api/languages", get(get_languages))
        .route("/api/state", get(get_state))
        .route("/api/text", put(set_text))
        .route("/api/language/:side", put(select_language))
        .route("/api/translate", post(translate))
        .route("/api/swap", post(swap))
        .route("/api/copy/:side", post(copy))
        .route("/api/speak/:side", post(speak))

        // Static file serving
        .nest_service("/static", ServeDir::new(&system_config.static_dir))
}

async fn index(State(state): State<AppState>) -> Html<String> {
    let view = state.controller.view().await;
    Html(presentation::render_page(state.controller.catalog(), &view))
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let uptime = Utc::now().signed_duration_since(state.started_at);
    Json(json!({
        "status": "ok",
        "started_at": state.started_at,
        "uptime_secs": uptime.num_seconds(),
        "clients": state.clients.len(),
    }))
}

async fn get_languages(State(state): State<AppState>) -> Json<Value> {
    let catalog = state.controller.catalog();
    Json(json!({
        "entries": catalog.entries(),
        "source_default": catalog.source_default(),
        "target_default": catalog.target_default(),
    }))
}

async fn get_state(State(state): State<AppState>) -> Json<WidgetView> {
    Json(state.controller.view().await)
}

async fn set_text(
    State(state): State<AppState>,
    Json(payload): Json<TextPayload>,
) -> Json<WidgetView> {
    Json(state.controller.set_source_text(payload.text).await)
}

async fn select_language(
    State(state): State<AppState>,
    Path(side): Path<String>,
    Json(payload): Json<LanguagePayload>,
) -> Result<Json<WidgetView>> {
    let side: Side = side.parse()?;
    Ok(Json(state.controller.select_language(side, &payload.code).await?))
}

async fn translate(State(state): State<AppState>) -> Json<WidgetView> {
    Json(state.controller.translate().await)
}

async fn swap(State(state): State<AppState>) -> Json<WidgetView> {
    Json(state.controller.swap().await)
}

async fn copy(State(state): State<AppState>, Path(side): Path<String>) -> Result<Json<WidgetView>> {
    let side: Side = side.parse()?;
    Ok(Json(state.controller.copy(side).await))
}

async fn speak(State(state): State<AppState>, Path(side): Path<String>) -> Result<Json<WidgetView>> {
    let side: Side = side.parse()?;
    Ok(Json(state.controller.speak(side).await))
}
