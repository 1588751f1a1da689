//! Uniform `(status, body)` result of every PetFriends call.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::http::HttpResponse;
use crate::types::ApiKey;

/// Parsed response body: JSON when the payload is JSON, raw text otherwise.
///
/// The service answers errors with HTML pages, so text bodies are expected on
/// the 400 and 403 paths.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    pub fn parse(raw: String) -> Self {
        match serde_json::from_str(&raw) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(raw),
        }
    }

    /// Top-level field of a JSON object body. Text bodies have no fields.
    pub fn get(&self, field: &str) -> Option<&Value> {
        match self {
            ResponseBody::Json(value) => value.get(field),
            ResponseBody::Text(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: ResponseBody,
}

impl From<HttpResponse> for ApiResponse {
    fn from(response: HttpResponse) -> Self {
        Self {
            status: response.status,
            body: ResponseBody::parse(response.body),
        }
    }
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.body.get(field).is_some()
    }

    pub fn field(&self, field: &str) -> Option<&Value> {
        self.body.get(field)
    }

    /// String value of a top-level field.
    pub fn str_field(&self, field: &str) -> Option<&str> {
        self.field(field).and_then(Value::as_str)
    }

    /// The `key` returned by a successful authentication.
    pub fn api_key(&self) -> Option<ApiKey> {
        self.str_field("key").map(ApiKey::new)
    }

    /// Deserialize a JSON body into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        match &self.body {
            ResponseBody::Json(value) => {
                serde_json::from_value(value.clone()).map_err(|e| ApiError::DeserializationError(e.to_string()))
            }
            ResponseBody::Text(text) => Err(ApiError::DeserializationError(format!(
                "expected JSON body, got text ({} bytes)",
                text.len()
            ))),
        }
    }
}
