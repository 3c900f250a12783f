//! `TheOneApiClient` - client facade and per-family resource proxies.
#![allow(clippy::future_not_send)]

use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use tracing::instrument;
use url::Url;

use crate::entity::{Entity, Movie, Quote};
use crate::error::{Error, Result};
use crate::executor::execute;
use crate::http::{LocalTransport, ReqwestTransport};
use crate::normalize::{Normalized, normalize};
use crate::params::{CallArgs, RequestParams, with_auth};

/// Default base URL for The One API v2.
const DEFAULT_BASE_URL: &str = "https://the-one-api.dev/v2/";

/// Default User-Agent.
const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// State shared by the facade and every proxy it hands out.
struct Shared<T> {
    transport: T,
    base_url: Url,
    api_key: String,
}

impl<T: fmt::Debug> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shared")
            .field("transport", &self.transport)
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// The One API client.
///
/// Holds the API key and hands out one [`ResourceProxy`] per resource
/// family. Accessors never perform I/O.
#[allow(clippy::module_name_repetitions)]
pub struct TheOneApiClient<T = ReqwestTransport> {
    shared: Arc<Shared<T>>,
    movie: OnceLock<ResourceProxy<Movie, T>>,
    quote: OnceLock<ResourceProxy<Quote, T>>,
}

impl<T: fmt::Debug> fmt::Debug for TheOneApiClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TheOneApiClient")
            .field("shared", &self.shared)
            .finish_non_exhaustive()
    }
}

/// Builder for `TheOneApiClient`.
#[derive(Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct TheOneApiClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl TheOneApiClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            user_agent: None,
            timeout: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API key (required). It is not validated locally; an invalid
    /// key surfaces as an HTTP error from the remote API.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the User-Agent (default: `theoneapi-api/<version>`).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets a per-request timeout. Expiry is reported as [`Error::Transport`].
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client with the default `reqwest` transport.
    ///
    /// # Errors
    ///
    /// - `api_key` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TheOneApiClient> {
        let user_agent = self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        let transport = ReqwestTransport::new(user_agent, self.timeout)?;
        self.build_with_transport(transport)
    }

    /// Builds the client around a caller-supplied transport.
    ///
    /// `user_agent` and `timeout` are not applied; they belong to the
    /// transport.
    ///
    /// # Errors
    ///
    /// - `api_key` is not set.
    /// - The default base URL fails to parse.
    pub fn build_with_transport<T>(self, transport: T) -> Result<TheOneApiClient<T>> {
        let api_key = self
            .api_key
            .ok_or_else(|| Error::Config(String::from("api_key is required")))?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            Url::parse(DEFAULT_BASE_URL)
                .map_err(|e| Error::InvalidUrl(format!("invalid default base URL: {e}")))?
        };

        Ok(TheOneApiClient {
            shared: Arc::new(Shared {
                transport,
                base_url,
                api_key,
            }),
            movie: OnceLock::new(),
            quote: OnceLock::new(),
        })
    }
}

impl TheOneApiClient {
    /// Creates a client for `api_key` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TheOneApiClientBuilder {
        TheOneApiClientBuilder::new()
    }
}

impl<T> TheOneApiClient<T> {
    /// Returns the base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.shared.base_url
    }

    /// Movie operations.
    pub fn movie(&self) -> &ResourceProxy<Movie, T> {
        self.movie
            .get_or_init(|| ResourceProxy::new(Arc::clone(&self.shared)))
    }

    /// Quote operations.
    pub fn quote(&self) -> &ResourceProxy<Quote, T> {
        self.quote
            .get_or_init(|| ResourceProxy::new(Arc::clone(&self.shared)))
    }
}

/// Operations of one resource family, bound to the client's key.
pub struct ResourceProxy<E, T = ReqwestTransport> {
    shared: Arc<Shared<T>>,
    entity: PhantomData<fn() -> E>,
}

impl<E: Entity, T> fmt::Debug for ResourceProxy<E, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceProxy")
            .field("family", &E::FAMILY)
            .finish_non_exhaustive()
    }
}

impl<E, T> ResourceProxy<E, T> {
    const fn new(shared: Arc<Shared<T>>) -> Self {
        Self {
            shared,
            entity: PhantomData,
        }
    }
}

impl<E: Entity, T: LocalTransport> ResourceProxy<E, T> {
    /// Returns `true` if `operation` is declared for this family.
    #[must_use]
    pub fn supports(&self, operation: &str) -> bool {
        E::FAMILY.operation(operation).is_ok()
    }

    /// Calls a declared operation by name.
    ///
    /// An undeclared name fails before any request is sent.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedOperation`] for an undeclared name.
    /// - [`Error::MissingPathParameter`] if the route needs an id.
    /// - [`Error::Transport`], [`Error::HttpResponse`] or [`Error::Decode`]
    ///   from the request itself.
    #[instrument(skip_all, fields(family = E::FAMILY.name(), operation = name))]
    pub async fn call(&self, name: &str, args: CallArgs) -> Result<Normalized<E>> {
        let operation = E::FAMILY.operation(name)?;
        let params = with_auth(args.into_params(), &self.shared.api_key);
        let body = execute(
            &self.shared.transport,
            &self.shared.base_url,
            operation,
            params,
        )
        .await?;
        normalize(operation, body)
    }

    /// Lists all items.
    ///
    /// # Errors
    ///
    /// See [`ResourceProxy::call`]; additionally [`Error::UnexpectedShape`]
    /// if the response carried no `docs` array.
    pub async fn list(&self) -> Result<Vec<E>> {
        self.list_with(RequestParams::new()).await
    }

    /// Lists items with extra query parameters (`limit`, `page`, `sort`,
    /// field filters).
    ///
    /// # Errors
    ///
    /// See [`ResourceProxy::list`].
    pub async fn list_with(&self, params: RequestParams) -> Result<Vec<E>> {
        let result = self.call("list", CallArgs::Params(params)).await?;
        result
            .into_many()
            .ok_or(Error::UnexpectedShape { operation: "list" })
    }

    /// Finds one item by id. `Ok(None)` when the envelope is empty.
    ///
    /// # Errors
    ///
    /// See [`ResourceProxy::call`]. The remote API usually answers unknown
    /// ids with a non-200 status, reported as [`Error::HttpResponse`].
    pub async fn find(&self, id: &str) -> Result<Option<E>> {
        match self.call("find", CallArgs::id(id)).await? {
            Normalized::One(item) => Ok(Some(item)),
            Normalized::NotFound(_) => Ok(None),
            Normalized::Many(_) | Normalized::Raw(_) => {
                Err(Error::UnexpectedShape { operation: "find" })
            }
        }
    }
}

impl<T: LocalTransport> ResourceProxy<Quote, T> {
    /// Lists the quotes of one movie.
    ///
    /// # Errors
    ///
    /// See [`ResourceProxy::list`].
    pub async fn list_for_movie(&self, movie_id: &str) -> Result<Vec<Quote>> {
        let result = self.call("list_for_movie", CallArgs::id(movie_id)).await?;
        result.into_many().ok_or(Error::UnexpectedShape {
            operation: "list_for_movie",
        })
    }
}
