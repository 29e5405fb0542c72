//! Shared HTTP wrapper with response-envelope normalization.
//!
//! The backend is inconsistent about response shapes: most endpoints wrap
//! payloads as `{success, data, message, error}`, some return the payload
//! bare, a few return plain text, and list endpoints disagree about the name
//! of the list field. Normalization happens here so the typed clients only
//! deal with payloads.

use crate::ApiError;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Keys under which list endpoints hide their items.
const LIST_KEYS: &[&str] = &[
    "content",
    "items",
    "records",
    "transactions",
    "withdrawals",
    "deposits",
    "sweeps",
];

/// JSON HTTP client bound to one backend, carrying an optional bearer token.
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.request(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: Option<Value>) -> Result<Value, ApiError> {
        self.request(Method::POST, path, body).await
    }

    pub async fn put(&self, path: &str, body: Option<Value>) -> Result<Value, ApiError> {
        self.request(Method::PUT, path, body).await
    }

    /// GET and deserialize the normalized payload.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let value = self.get(path).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// POST and deserialize the normalized payload.
    pub async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let value = self.post(path, body).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "backend request");

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = &self.token {
            let bearer = format!("Bearer {token}");
            if let Ok(value) = HeaderValue::from_str(&bearer) {
                headers.insert(AUTHORIZATION, value);
            }
        }

        let mut builder = self.http.request(method, &url).headers(headers);
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;
        let parsed: Value = serde_json::from_str(&text)
            .unwrap_or_else(|_| serde_json::json!({ "message": text }));

        // Business failures sometimes ride on HTTP 200 with success: false.
        let envelope_failure = parsed.get("success") == Some(&Value::Bool(false));
        if !status.is_success() || envelope_failure {
            return Err(ApiError::Status {
                code: status.as_u16(),
                message: envelope_message(&parsed)
                    .unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
            });
        }

        Ok(unwrap_envelope(parsed))
    }
}

/// Pull the payload out of the `{success, data, message}` envelope. A bare
/// payload passes through unchanged, as does an envelope whose `data` is
/// null or absent.
pub fn unwrap_envelope(body: Value) -> Value {
    if let Value::Object(map) = &body {
        match map.get("data") {
            Some(Value::Null) | None => body,
            Some(data) => data.clone(),
        }
    } else {
        body
    }
}

fn envelope_message(body: &Value) -> Option<String> {
    body.get("message")
        .or_else(|| body.get("error"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Coerce a list payload that may be a bare array or an object with an
/// alternately named list field into a typed vec.
pub fn coerce_list<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, ApiError> {
    let list = match value {
        Value::Array(items) => Value::Array(items),
        Value::Object(mut map) => {
            let key = LIST_KEYS
                .iter()
                .copied()
                .find(|k| matches!(map.get(*k), Some(Value::Array(_))));
            match key {
                Some(key) => map.remove(key).unwrap_or(Value::Array(Vec::new())),
                None => Value::Array(Vec::new()),
            }
        }
        _ => Value::Array(Vec::new()),
    };
    Ok(serde_json::from_value(list)?)
}
