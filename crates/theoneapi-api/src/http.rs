//! Plain-data HTTP request/response and the transport that executes them.
#![allow(clippy::future_not_send)]

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::descriptor::HttpMethod;
use crate::error::{Error, Result};

/// An outgoing request, fully resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Absolute URL including the query string.
    pub url: Url,
    /// Header name/value pairs.
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// Returns the first header value with the given name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A response as received from the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

/// Executes one HTTP round trip.
///
/// Abstracts the HTTP layer for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(Transport: Send)]
pub trait LocalTransport {
    /// Sends `request` and returns the response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the request could not complete.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Default transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    /// HTTP client (reqwest, gzip enabled).
    http_client: Client,
}

impl ReqwestTransport {
    /// Builds a transport with the given User-Agent and optional timeout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the `reqwest::Client` build fails.
    pub fn new(user_agent: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(user_agent).gzip(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| Error::transport("failed to build HTTP client", e))?;
        Ok(Self { http_client })
    }

    /// Wraps an existing `reqwest::Client`.
    #[must_use]
    pub const fn from_client(http_client: Client) -> Self {
        Self { http_client }
    }
}

/// Describes a reqwest failure without exposing its type.
fn describe(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        String::from("request timed out")
    } else if err.is_connect() {
        String::from("connection failed")
    } else if err.is_decode() || err.is_body() {
        String::from("failed to read response body")
    } else {
        String::from("request failed")
    }
}

impl LocalTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
        };

        let mut builder = self.http_client.request(method, request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Error::transport(describe(&e), e))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(describe(&e), e))?;

        Ok(HttpResponse { status, body })
    }
}
