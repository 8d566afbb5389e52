//! Outbound HTTP

mod reqwest_transport;

pub use reqwest_transport::{HttpClientConfig, ReqwestTransport};
