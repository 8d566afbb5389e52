//! HTTP transport port
//!
//! Defines the interface commands use to talk to provider APIs.

use std::fmt;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde_json::Value;

use crate::error::TransportError;

/// HTTP method of a provider request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
        }
    }
}

/// A provider request, built by a command and sent by the transport
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    /// Query parameters in insertion order
    pub query: Vec<(String, String)>,
    pub json_body: Option<Value>,
}

impl HttpRequest {
    /// A GET request without parameters
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            query: Vec::new(),
            json_body: None,
        }
    }

    /// A POST request carrying a JSON body
    #[must_use]
    pub fn post(url: impl Into<String>, body: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            query: Vec::new(),
            json_body: Some(body),
        }
    }

    /// Append a query parameter
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    /// Append a query parameter when a value is present
    #[must_use]
    pub fn param_opt<V: ToString>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.param(name, value),
            None => self,
        }
    }

    /// First value of a query parameter
    #[must_use]
    pub fn param_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Raw provider response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Port for sending provider requests over HTTP
///
/// Adapters own connection pooling and timeouts. A non-2xx status is a
/// successful transport call; only failures to obtain a response are errors.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait HttpTransportPort: Send + Sync {
    /// Send a request and return the status and body text
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn _assert_object_safe(_: &dyn HttpTransportPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn HttpTransportPort>();
    }

    #[test]
    fn get_request_collects_params_in_order() {
        let request = HttpRequest::get("https://example.com/geocode")
            .param("address", "Chicago")
            .param_opt("language", Some("en"))
            .param_opt::<&str>("components", None)
            .param("limit", 3);

        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(
            request.query,
            vec![
                ("address".to_string(), "Chicago".to_string()),
                ("language".to_string(), "en".to_string()),
                ("limit".to_string(), "3".to_string()),
            ]
        );
        assert_eq!(request.param_value("limit"), Some("3"));
        assert_eq!(request.param_value("components"), None);
    }

    #[test]
    fn post_request_carries_body() {
        let request = HttpRequest::post("https://example.com", json!({"a": 1}));
        assert_eq!(request.method.to_string(), "POST");
        assert_eq!(request.json_body, Some(json!({"a": 1})));
    }

    #[test]
    fn success_range() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(301, "").is_success());
        assert!(!HttpResponse::new(429, "").is_success());
    }
}
