//! Data Transfer Objects - JSON bodies exchanged with clients.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of a create or update request.
///
/// Every field is optional: a missing key and an explicit `null` are the same
/// thing. Unknown keys (the admin UI echoes `id`, `created_at`, ...) are ignored.
///
/// Values are coerced the way PostgreSQL casts untyped parameters: text
/// columns accept any scalar, and `published` accepts a boolean or a boolean
/// literal such as `"true"`, `"t"`, `"yes"` or `"0"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostInput {
    #[serde(default, deserialize_with = "text_scalar")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "text_scalar")]
    pub excerpt: Option<String>,
    #[serde(default, deserialize_with = "text_scalar")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "text_scalar")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "text_scalar")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "text_scalar")]
    pub video_url: Option<String>,
    #[serde(default, deserialize_with = "bool_literal")]
    pub published: Option<bool>,
}

fn text_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(text) => Ok(Some(text)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(flag) => Ok(Some(flag.to_string())),
        other => Err(de::Error::custom(format!(
            "expected a text value, found {other}"
        ))),
    }
}

fn bool_literal<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Bool(flag) => Ok(Some(flag)),
        Value::String(text) => parse_bool_literal(&text)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid boolean literal {text:?}"))),
        other => Err(de::Error::custom(format!(
            "expected a boolean, found {other}"
        ))),
    }
}

/// PostgreSQL's accepted spellings of a boolean input value.
fn parse_bool_literal(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "t" | "true" | "y" | "yes" | "on" | "1" => Some(true),
        "f" | "false" | "n" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

impl PostInput {
    /// Parse a raw request body. A missing body is an empty record.
    pub fn from_body(body: Option<&str>) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body.unwrap_or("{}"))
    }
}

/// Error body: always a single `error` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Body returned after a successful delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletedBody {
    pub message: String,
    pub id: i32,
}

impl DeletedBody {
    pub fn new(id: i32) -> Self {
        Self {
            message: "Post deleted".to_string(),
            id,
        }
    }
}
