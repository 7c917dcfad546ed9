use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WidgetError {
    #[error("Unknown language code: {0}")]
    UnknownLanguage(String),

    #[error("Unknown side: {0}")]
    UnknownSide(String),

    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed translation response: {0}")]
    MalformedResponse(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Speech error: {0}")]
    Speech(String),
}

pub type Result<T> = std::result::Result<T, WidgetError>;

impl WidgetError {
    fn status(&self) -> StatusCode {
        match self {
            WidgetError::UnknownLanguage(_)
            | WidgetError::UnknownSide(_)
            | WidgetError::InvalidMessage(_) => StatusCode::BAD_REQUEST,
            WidgetError::Json(_) => StatusCode::BAD_REQUEST,
            WidgetError::Http(_) | WidgetError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WidgetError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_bad_request() {
        let response = WidgetError::UnknownLanguage("xx-XX".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = WidgetError::UnknownSide("left".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upstream_errors_map_to_bad_gateway() {
        let response = WidgetError::MalformedResponse("no responseData".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
