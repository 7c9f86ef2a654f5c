//! Typed request descriptor.

use std::collections::HashMap;
use std::fmt;

use quill_shared::InvocationEvent;

/// HTTP method of an invocation. Anything unrecognised is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Options,
    Other(String),
}

impl Method {
    /// Methods are matched case-sensitively, as HTTP defines them.
    pub fn parse(method: &str) -> Self {
        match method {
            "GET" => Method::Get,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "DELETE" => Method::Delete,
            "OPTIONS" => Method::Options,
            other => Method::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Options => "OPTIONS",
            Method::Other(other) => other,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One invocation of the posts handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRequest {
    pub method: Method,
    /// Raw `id` path segment. Empty values are normalised to `None`.
    pub path_id: Option<String>,
    pub query: HashMap<String, String>,
    pub body: Option<String>,
}

impl PostRequest {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            path_id: None,
            query: HashMap::new(),
            body: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        self.path_id = (!id.is_empty()).then_some(id);
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

impl From<InvocationEvent> for PostRequest {
    fn from(event: InvocationEvent) -> Self {
        Self {
            method: Method::parse(&event.http_method),
            path_id: event.path_id(),
            query: event.query_string_parameters.unwrap_or_default(),
            body: event.body,
        }
    }
}
