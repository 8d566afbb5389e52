//! `reqwest`-backed HTTP transport
//!
//! Sends the requests built by provider commands and hands the raw status
//! and body back. Status interpretation stays with the commands.

use std::time::Duration;

use application::{HttpMethod, HttpRequest, HttpResponse, HttpTransportPort, TransportError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Timeouts and identification for outgoing provider requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpClientConfig {
    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

const fn default_connect_timeout_secs() -> u64 {
    10
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("geocoder/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout_secs(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl HttpClientConfig {
    /// Set the whole-request timeout
    #[must_use]
    pub const fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the user agent string
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// HTTP transport over a pooled `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Build a transport from configuration
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Request` if the underlying client cannot be built.
    pub fn new(config: &HttpClientConfig) -> Result<Self, TransportError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| TransportError::Request(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, timeout })
    }

    fn classify(&self, error: &reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout(format!("{}s", self.timeout.as_secs()))
        } else if error.is_connect() {
            TransportError::Connection(error.to_string())
        } else {
            TransportError::Request(error.to_string())
        }
    }
}

#[async_trait]
impl HttpTransportPort for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.json_body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(error = %e, "Provider request failed");
            self.classify(&e)
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        debug!(status, bytes = body.len(), "Provider response received");
        Ok(HttpResponse::new(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn default_config_values() {
        let config = HttpClientConfig::default();
        assert_eq!(config.connect_timeout_secs, 10);
        assert_eq!(config.timeout_secs, 30);
        assert!(config.user_agent.starts_with("geocoder/"));
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: HttpClientConfig = serde_json::from_str(r#"{"timeout_secs": 5}"#).unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.connect_timeout_secs, 10);
    }

    #[test]
    fn builder_methods() {
        let config = HttpClientConfig::default()
            .with_timeout_secs(3)
            .with_user_agent("test-agent");
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.user_agent, "test-agent");
    }

    #[test]
    fn transport_builds_from_default_config() {
        assert!(ReqwestTransport::new(&HttpClientConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn get_sends_query_parameters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lookup"))
            .and(query_param("address", "Chicago"))
            .and(query_param("limit", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok":true}"#))
            .expect(1)
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new(&HttpClientConfig::default()).unwrap();
        let request = HttpRequest::get(format!("{}/lookup", server.uri()))
            .param("address", "Chicago")
            .param("limit", 2);

        let response = transport.send(request).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, r#"{"ok":true}"#);
    }

    #[tokio::test]
    async fn post_sends_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .and(body_json(json!({"q": "Berlin"})))
            .respond_with(ResponseTemplate::new(201).set_body_string("{}"))
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new(&HttpClientConfig::default()).unwrap();
        let response = transport
            .send(HttpRequest::post(
                format!("{}/search", server.uri()),
                json!({"q": "Berlin"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status, 201);
    }

    #[tokio::test]
    async fn non_success_status_is_returned_not_raised() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new(&HttpClientConfig::default()).unwrap();
        let response = transport
            .send(HttpRequest::get(server.uri()))
            .await
            .unwrap();
        assert_eq!(response.status, 500);
        assert!(!response.is_success());
        assert_eq!(response.body, "boom");
    }

    #[tokio::test]
    async fn slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let transport =
            ReqwestTransport::new(&HttpClientConfig::default().with_timeout_secs(1)).unwrap();
        let err = transport
            .send(HttpRequest::get(server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Timeout(_)));
    }

    #[tokio::test]
    async fn unreachable_host_is_an_error() {
        let transport = ReqwestTransport::new(&HttpClientConfig::default()).unwrap();
        let err = transport
            .send(HttpRequest::get("http://127.0.0.1:1/unreachable"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            TransportError::Connection(_) | TransportError::Request(_)
        ));
    }
}
