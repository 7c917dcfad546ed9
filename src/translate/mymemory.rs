use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::interface::{TranslateInterface, TranslationRequest};
use crate::config::TranslatorConfig;
use crate::error::{Result, WidgetError};

/// Client for the MyMemory `get` endpoint.
#[derive(Debug, Clone)]
pub struct MyMemoryClient {
    client: Client,
    api_url: String,
    contact_email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MyMemoryResponse {
    #[serde(rename = "responseData")]
    response_data: Option<ResponseData>,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    #[serde(rename = "translatedText", default)]
    translated_text: Option<String>,
}

impl MyMemoryClient {
    pub fn new(api_url: impl Into<String>, contact_email: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into(),
            contact_email,
        }
    }

    pub fn from_config(config: &TranslatorConfig) -> Self {
        Self::new(config.api_url.clone(), config.contact_email.clone())
    }
}

#[async_trait]
impl TranslateInterface for MyMemoryClient {
    async fn translate(&self, request: &TranslationRequest) -> Result<Option<String>> {
        let langpair = format!("{}|{}", request.source_language, request.target_language);
        let mut query = vec![("q", request.text.as_str()), ("langpair", langpair.as_str())];
        if let Some(email) = &self.contact_email {
            query.push(("de", email.as_str()));
        }

        debug!("Requesting translation: langpair={}, chars={}", langpair, request.text.chars().count());

        // The body decides the outcome; MyMemory reports quota errors in JSON too.
        let body = self.client.get(&self.api_url).query(&query).send().await?.text().await?;
        interpret_response(&body)
    }
}

/// Pull `responseData.translatedText` out of a MyMemory body.
///
/// A missing, null or empty text is a valid "no translation" answer; a body
/// that is not JSON or has no `responseData` object is malformed.
pub fn interpret_response(body: &str) -> Result<Option<String>> {
    let response: MyMemoryResponse = serde_json::from_str(body)?;
    let data = response
        .response_data
        .ok_or_else(|| WidgetError::MalformedResponse("missing responseData".to_string()))?;
    Ok(data.translated_text.filter(|text| !text.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, routing::get, Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    #[test]
    fn translated_text_is_returned() {
        let body = r#"{"responseData":{"translatedText":"Bonjour","match":1},"responseStatus":200}"#;
        assert_eq!(interpret_response(body).unwrap(), Some("Bonjour".to_string()));
    }

    #[test]
    fn missing_or_empty_text_is_unavailable() {
        assert_eq!(interpret_response(r#"{"responseData":{}}"#).unwrap(), None);
        assert_eq!(interpret_response(r#"{"responseData":{"translatedText":null}}"#).unwrap(), None);
        assert_eq!(interpret_response(r#"{"responseData":{"translatedText":""}}"#).unwrap(), None);
    }

    #[test]
    fn malformed_bodies_are_errors() {
        assert!(matches!(
            interpret_response(r#"{"responseStatus":403}"#),
            Err(WidgetError::MalformedResponse(_))
        ));
        assert!(matches!(interpret_response("<html>busy</html>"), Err(WidgetError::Json(_))));
    }

    async fn spawn_fake_api() -> String {
        async fn handler(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
            Json(json!({
                "responseData": {
                    "translatedText": format!(
                        "{}|{}|{}",
                        params.get("q").cloned().unwrap_or_default(),
                        params.get("langpair").cloned().unwrap_or_default(),
                        params.get("de").cloned().unwrap_or_default(),
                    )
                }
            }))
        }

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, Router::new().route("/get", get(handler))).await.unwrap();
        });
        format!("http://{}/get", addr)
    }

    #[tokio::test]
    async fn query_parameters_are_encoded() {
        let url = spawn_fake_api().await;
        let client = MyMemoryClient::new(url, Some("me@example.org".to_string()));
        let request = TranslationRequest {
            text: "Fish & chips?".to_string(),
            source_language: "en-GB".to_string(),
            target_language: "fr-FR".to_string(),
        };

        let echoed = client.translate(&request).await.unwrap();
        assert_eq!(echoed, Some("Fish & chips?|en-GB|fr-FR|me@example.org".to_string()));
    }

    #[tokio::test]
    async fn unreachable_service_is_an_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = MyMemoryClient::new(format!("http://{}/get", addr), None);
        let request = TranslationRequest {
            text: "Hello".to_string(),
            source_language: "en-GB".to_string(),
            target_language: "hi-IN".to_string(),
        };
        assert!(matches!(client.translate(&request).await, Err(WidgetError::Http(_))));
    }
}
