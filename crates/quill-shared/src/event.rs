//! Serverless invocation event.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request envelope as delivered by a function runtime.
///
/// ```json
/// {
///   "httpMethod": "GET",
///   "pathParams": {"id": "12"},
///   "queryStringParameters": {"category": "news"},
///   "body": null
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationEvent {
    #[serde(default = "default_method")]
    pub http_method: String,
    #[serde(default)]
    pub path_params: Option<HashMap<String, Value>>,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<String>,
}

fn default_method() -> String {
    "GET".to_string()
}

impl Default for InvocationEvent {
    fn default() -> Self {
        Self {
            http_method: default_method(),
            path_params: None,
            query_string_parameters: None,
            body: None,
        }
    }
}

impl InvocationEvent {
    /// The `id` path parameter, accepted as a string or a number.
    /// Empty strings count as absent.
    pub fn path_id(&self) -> Option<String> {
        let value = self.path_params.as_ref()?.get("id")?;
        let id = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        (!id.is_empty()).then_some(id)
    }
}
