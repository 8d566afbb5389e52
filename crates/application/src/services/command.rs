//! Provider commands
//!
//! A command turns one validated query into zero or more result builders for a
//! single provider. [`HttpCommand`] composes a request builder and a response
//! parser around the transport port; providers never inherit behaviour.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use domain::{GeocoderError, Query, parse_query};
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::ports::{
    CountryLookupPort, GeocoderLogger, HttpRequest, HttpTransportPort, NoReferenceData,
    NullLogger, StateLookupPort,
};

/// One provider operation
#[async_trait]
pub trait Command<Q: Query>: Send + Sync {
    /// Result builder produced per raw provider result
    type Output: Send + 'static;

    /// Request, call and parse
    async fn execute(&self, query: &Q) -> Result<Vec<Self::Output>, GeocoderError>;
}

type BuildRequestFn<Q> = dyn Fn(&Q) -> Result<HttpRequest, GeocoderError> + Send + Sync;
type ParseResponseFn<B> = dyn Fn(Value) -> Result<Vec<B>, GeocoderError> + Send + Sync;

/// Command backed by a single HTTP call
pub struct HttpCommand<Q, B> {
    name: &'static str,
    transport: Arc<dyn HttpTransportPort>,
    build_request: Box<BuildRequestFn<Q>>,
    parse_response: Box<ParseResponseFn<B>>,
}

impl<Q, B> HttpCommand<Q, B> {
    /// Compose a command from its request builder and response parser
    pub fn new(
        name: &'static str,
        transport: Arc<dyn HttpTransportPort>,
        build_request: impl Fn(&Q) -> Result<HttpRequest, GeocoderError> + Send + Sync + 'static,
        parse_response: impl Fn(Value) -> Result<Vec<B>, GeocoderError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            transport,
            build_request: Box::new(build_request),
            parse_response: Box::new(parse_response),
        }
    }

    /// Name used in logs
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<Q, B> fmt::Debug for HttpCommand<Q, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpCommand")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<Q, B> Command<Q> for HttpCommand<Q, B>
where
    Q: Query,
    B: Send + 'static,
{
    type Output = B;

    async fn execute(&self, query: &Q) -> Result<Vec<B>, GeocoderError> {
        let request = (self.build_request)(query)?;
        // Query parameters may carry credentials
        debug!(command = self.name, method = %request.method, url = %request.url, "Calling provider");

        let response = self.transport.send(request).await.map_err(|e| {
            warn!(command = self.name, error = %e, "Provider transport failed");
            GeocoderError::invalid_response(e.to_string())
        })?;

        if response.status == 429 {
            return Err(GeocoderError::quota_exceeded(format!(
                "HTTP 429 from {}",
                self.name
            )));
        }
        if !response.is_success() {
            return Err(GeocoderError::invalid_response(format!(
                "HTTP {}",
                response.status
            )));
        }

        let body = response.body.trim();
        if body.is_empty() {
            return Err(GeocoderError::invalid_response("empty response body"));
        }
        let value: Value = serde_json::from_str(body)
            .map_err(|e| GeocoderError::invalid_response(format!("malformed JSON body: {e}")))?;

        let parsed = (self.parse_response)(value)?;
        debug!(command = self.name, results = parsed.len(), "Provider response parsed");
        Ok(parsed)
    }
}

/// Collaborators shared by every pipeline of a provider
#[derive(Clone)]
pub struct PipelineContext {
    pub countries: Arc<dyn CountryLookupPort>,
    pub states: Arc<dyn StateLookupPort>,
    pub logger: Arc<dyn GeocoderLogger>,
}

impl PipelineContext {
    /// Use the given country and state lookups
    #[must_use]
    pub fn with_reference_data(
        mut self,
        countries: Arc<dyn CountryLookupPort>,
        states: Arc<dyn StateLookupPort>,
    ) -> Self {
        self.countries = countries;
        self.states = states;
        self
    }

    /// Use the given logger
    #[must_use]
    pub fn with_logger(mut self, logger: Arc<dyn GeocoderLogger>) -> Self {
        self.logger = logger;
        self
    }
}

impl Default for PipelineContext {
    fn default() -> Self {
        Self {
            countries: Arc::new(NoReferenceData),
            states: Arc::new(NoReferenceData),
            logger: Arc::new(NullLogger),
        }
    }
}

impl fmt::Debug for PipelineContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineContext").finish_non_exhaustive()
    }
}

/// Validate plain data, reporting failures through the logger
pub(crate) fn validate_query<Q: Query>(
    raw: &Value,
    logger: &dyn GeocoderLogger,
) -> Result<Q, GeocoderError> {
    parse_query::<Q>(raw).map_err(|err| {
        logger.error(&err, &json!({ "query": raw }));
        GeocoderError::from(err)
    })
}

/// Keep at most `limit` items, preserving order
pub fn apply_limit<T>(mut items: Vec<T>, limit: Option<u32>) -> Vec<T> {
    if let Some(limit) = limit {
        items.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::ports::{HttpResponse, MockHttpTransportPort};
    use domain::GeocodeQuery;

    fn command(transport: MockHttpTransportPort) -> HttpCommand<GeocodeQuery, String> {
        HttpCommand::new(
            "TestGeocode",
            Arc::new(transport),
            |query: &GeocodeQuery| {
                Ok(HttpRequest::get("https://provider.test/geocode")
                    .param("q", &query.address)
                    .param("key", "secret"))
            },
            |value: Value| {
                Ok(value["results"]
                    .as_array()
                    .map(|items| {
                        items
                            .iter()
                            .filter_map(|item| item.as_str().map(str::to_string))
                            .collect()
                    })
                    .unwrap_or_default())
            },
        )
    }

    fn responding(status: u16, body: &'static str) -> MockHttpTransportPort {
        let mut transport = MockHttpTransportPort::new();
        transport
            .expect_send()
            .returning(move |_| Ok(HttpResponse::new(status, body)));
        transport
    }

    #[tokio::test]
    async fn builds_request_from_query() {
        let mut transport = MockHttpTransportPort::new();
        transport
            .expect_send()
            .withf(|request| {
                request.url == "https://provider.test/geocode"
                    && request.param_value("q") == Some("Chicago")
            })
            .times(1)
            .returning(|_| Ok(HttpResponse::new(200, r#"{"results": ["a", "b"]}"#)));

        let results = command(transport)
            .execute(&GeocodeQuery::new("Chicago"))
            .await
            .unwrap();
        assert_eq!(results, vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn empty_body_is_invalid_server_response() {
        let err = command(responding(200, ""))
            .execute(&GeocodeQuery::new("Chicago"))
            .await
            .unwrap_err();
        assert!(matches!(err, GeocoderError::InvalidServerResponse(_)));
        assert!(err.to_string().contains("Invalid server response"));
    }

    #[tokio::test]
    async fn whitespace_body_is_invalid_server_response() {
        let err = command(responding(200, "  \n"))
            .execute(&GeocodeQuery::new("Chicago"))
            .await
            .unwrap_err();
        assert!(matches!(err, GeocoderError::InvalidServerResponse(_)));
    }

    #[tokio::test]
    async fn non_json_body_is_invalid_server_response() {
        let err = command(responding(200, "<html>oops</html>"))
            .execute(&GeocodeQuery::new("Chicago"))
            .await
            .unwrap_err();
        assert!(matches!(err, GeocoderError::InvalidServerResponse(_)));
    }

    #[tokio::test]
    async fn server_error_is_invalid_server_response() {
        let err = command(responding(500, r#"{"results": []}"#))
            .execute(&GeocodeQuery::new("Chicago"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid server response: HTTP 500");
    }

    #[tokio::test]
    async fn too_many_requests_is_quota_exceeded() {
        let err = command(responding(429, ""))
            .execute(&GeocodeQuery::new("Chicago"))
            .await
            .unwrap_err();
        assert!(err.is_quota_exceeded());
    }

    #[tokio::test]
    async fn transport_failure_is_invalid_server_response() {
        let mut transport = MockHttpTransportPort::new();
        transport
            .expect_send()
            .returning(|_| Err(TransportError::Timeout("30s".to_string())));

        let err = command(transport)
            .execute(&GeocodeQuery::new("Chicago"))
            .await
            .unwrap_err();
        assert!(matches!(err, GeocoderError::InvalidServerResponse(_)));
        assert!(err.to_string().contains("timed out"));
    }

    #[tokio::test]
    async fn request_builder_errors_skip_the_call() {
        let mut transport = MockHttpTransportPort::new();
        transport.expect_send().never();

        let command: HttpCommand<GeocodeQuery, String> = HttpCommand::new(
            "Failing",
            Arc::new(transport),
            |_| Err(GeocoderError::Configuration("missing key".to_string())),
            |_| Ok(Vec::new()),
        );
        let err = command
            .execute(&GeocodeQuery::new("Chicago"))
            .await
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn limit_truncates_in_order() {
        assert_eq!(apply_limit(vec![1, 2, 3], Some(1)), vec![1]);
        assert_eq!(apply_limit(vec![1, 2, 3], Some(5)), vec![1, 2, 3]);
        assert_eq!(apply_limit(vec![1, 2, 3], None), vec![1, 2, 3]);
    }

    #[test]
    fn debug_hides_closures() {
        let command = command(MockHttpTransportPort::new());
        assert!(format!("{command:?}").contains("TestGeocode"));
        assert_eq!(command.name(), "TestGeocode");
    }
}
