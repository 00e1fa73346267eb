use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::{ApiError, Result};
use crate::model::api::{JudgementResponse, TextRequest, TranslationResponse};

pub const TRANSLATE_ENDPOINT: &str = "translate";
pub const JUDGE_ENDPOINT: &str = "judge";

/// Thin JSON-over-POST client for the wizard trainer backend.
///
/// Calls block until the backend answers or the connection fails. There is
/// no retry and no timeout.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// POST `data` as JSON to `{base_url}/{endpoint}` and return the JSON
    /// the backend sent back.
    pub fn api_call<T: Serialize + ?Sized>(&self, endpoint: &str, data: &T) -> Result<Value> {
        self.call(endpoint, data)
    }

    /// Same as [`api_call`](Self::api_call) but decodes into `R`.
    pub fn call<T, R>(&self, endpoint: &str, data: &T) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.config.endpoint_url(endpoint);
        let body = serde_json::to_vec(data).map_err(|e| ApiError::Encode(e.to_string()))?;

        debug!(%url, bytes = body.len(), "api request");

        let resp = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .map_err(|e| {
                warn!(%url, error = %e, "api call failed");
                ApiError::transport(url.as_str(), e)
            })?;

        let status = resp.status();

        // Read as text first so a non-JSON error body still yields a message.
        let text = resp.text().map_err(|e| ApiError::transport(url.as_str(), e))?;

        debug!(%url, status = status.as_u16(), "api response");

        if !status.is_success() {
            let message = extract_error_message(status, &text);
            warn!(%url, status = status.as_u16(), %message, "api call rejected");
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            warn!(%url, error = %e, "api response is not valid JSON");
            ApiError::decode(url.as_str(), e)
        })
    }

    pub fn translate(&self, text: &str) -> Result<TranslationResponse> {
        self.call(TRANSLATE_ENDPOINT, &TextRequest::new(text))
    }

    pub fn judge(&self, text: &str) -> Result<JudgementResponse> {
        self.call(JUDGE_ENDPOINT, &TextRequest::new(text))
    }
}

/// Backend errors look like `{"detail": "..."}`; validation errors carry a
/// list under `detail` instead. Anything else falls back to the status.
fn extract_error_message(status: StatusCode, body_text: &str) -> String {
    if let Ok(v) = serde_json::from_str::<Value>(body_text) {
        match v.get("detail") {
            Some(Value::String(msg)) if !msg.is_empty() => return msg.clone(),
            Some(Value::String(_)) | Some(Value::Null) | None => {}
            Some(other) => return other.to_string(),
        }
    }

    format!("HTTP error {}", status.as_u16())
}
