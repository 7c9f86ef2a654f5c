//! Response descriptor returned by the posts handler.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dto::ErrorBody;

/// Header names and fixed values used on every response.
pub mod headers {
    pub const CONTENT_TYPE: &str = "Content-Type";
    pub const ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
    pub const ALLOW_METHODS: &str = "Access-Control-Allow-Methods";
    pub const ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";
    pub const MAX_AGE: &str = "Access-Control-Max-Age";

    pub const APPLICATION_JSON: &str = "application/json";
    pub const ANY_ORIGIN: &str = "*";
    pub const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
    pub const ALLOWED_HEADERS: &str = "Content-Type";
    pub const PREFLIGHT_MAX_AGE: &str = "86400";
}

/// Status code, headers and body text, in the shape function runtimes expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl HandlerResponse {
    /// CORS preflight answer: no body, no content type.
    pub fn preflight() -> Self {
        let headers = [
            (headers::ALLOW_ORIGIN, headers::ANY_ORIGIN),
            (headers::ALLOW_METHODS, headers::ALLOWED_METHODS),
            (headers::ALLOW_HEADERS, headers::ALLOWED_HEADERS),
            (headers::MAX_AGE, headers::PREFLIGHT_MAX_AGE),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            status_code: 200,
            headers,
            body: String::new(),
        }
    }

    /// JSON response with the standard content type and CORS origin.
    pub fn json<T: Serialize + ?Sized>(status: u16, body: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::from_json_text(status, serde_json::to_string(body)?))
    }

    /// `{"error": message}` with the given status.
    pub fn error(status: u16, message: impl Into<String>) -> Self {
        let body = serde_json::to_value(ErrorBody::new(message)).unwrap_or_default();
        Self::from_json_text(status, body.to_string())
    }

    pub fn not_found() -> Self {
        Self::error(404, "Post not found")
    }

    pub fn id_required() -> Self {
        Self::error(400, "Post ID required")
    }

    pub fn method_not_allowed() -> Self {
        Self::error(405, "Method not allowed")
    }

    pub fn database_not_configured() -> Self {
        Self::error(500, "Database not configured")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    fn from_json_text(status: u16, body: String) -> Self {
        let headers = [
            (headers::CONTENT_TYPE, headers::APPLICATION_JSON),
            (headers::ALLOW_ORIGIN, headers::ANY_ORIGIN),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            status_code: status,
            headers,
            body,
        }
    }
}
