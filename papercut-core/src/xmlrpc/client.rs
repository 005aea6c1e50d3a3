//! # XML-RPC Client
//!
//! Sends XML-RPC requests over HTTP(S) to a single endpoint.
//!
//! The [`XmlRpcTransport`] holds one `reqwest::Client`, so connections are pooled and the
//! transport can be shared between concurrent calls without further coordination.
//! It performs exactly one HTTP request per call: there are no retries and no timeouts
//! beyond those of the underlying HTTP client.
use super::codec::{self, CodecError};
use crate::{client::ConnectionConfig, transport::Transport};
use reqwest::{StatusCode, Url, header};
use serde_json::Value;
use std::future::Future;

#[derive(Debug, thiserror::Error)]
pub enum XmlRpcError {
    #[error("Invalid endpoint URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("Failed to build the HTTP client: '{0}'")]
    Build(#[source] reqwest::Error),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("HTTP request failed: '{0}'")]
    Http(#[from] reqwest::Error),
    #[error("Server answered with HTTP status {0}")]
    Status(StatusCode),
}

/// An XML-RPC transport bound to one endpoint.
#[derive(Debug, Clone)]
pub struct XmlRpcTransport {
    http: reqwest::Client,
    url: Url,
}

impl XmlRpcTransport {
    /// Builds a transport for the endpoint described by `config`.
    ///
    /// No connection is opened here; the first call connects lazily.
    pub fn new(config: &ConnectionConfig) -> Result<Self, XmlRpcError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("papercut/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(XmlRpcError::Build)?;

        Self::with_http_client(http, config)
    }

    /// Builds a transport reusing an existing HTTP client (custom TLS roots, proxies, ...).
    pub fn with_http_client(
        http: reqwest::Client,
        config: &ConnectionConfig,
    ) -> Result<Self, XmlRpcError> {
        let raw = config.url();
        let url = Url::parse(&raw).map_err(|e| XmlRpcError::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self { http, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl Transport for XmlRpcTransport {
    type Error = XmlRpcError;

    fn invoke(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> impl Future<Output = Result<Value, Self::Error>> + Send {
        let body = codec::encode_request(method, params);

        async move {
            let body = body?;
            tracing::trace!(url = %self.url, bytes = body.len(), "sending XML-RPC request");

            let response = self
                .http
                .post(self.url.clone())
                .header(header::CONTENT_TYPE, "text/xml")
                .body(body)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(XmlRpcError::Status(status));
            }

            let text = response.text().await?;
            tracing::trace!(bytes = text.len(), "received XML-RPC response");

            Ok(codec::decode_response(&text)?)
        }
    }
}
