//! Client library for The One API (<https://the-one-api.dev>).
//!
//! Maps declared resource operations to authenticated GET requests and
//! unwraps the paginated response envelope into [`Movie`] and [`Quote`]
//! entities.

/// Client facade and resource proxies.
pub mod client;
/// Static operation tables.
pub mod descriptor;
/// Entity types.
pub mod entity;
/// Error types.
pub mod error;
/// Request building and status translation.
pub mod executor;
/// HTTP transport abstraction.
pub mod http;
/// Envelope normalization.
pub mod normalize;
/// Call arguments and parameter resolution.
pub mod params;

pub use client::{ResourceProxy, TheOneApiClient, TheOneApiClientBuilder};
pub use descriptor::{HttpMethod, Operation, OperationKind, ResourceFamily};
pub use entity::{Entity, Movie, Quote};
pub use error::{Error, HttpResponseError, Result};
pub use http::{HttpRequest, HttpResponse, LocalTransport, ReqwestTransport, Transport};
pub use normalize::Normalized;
pub use params::{CallArgs, RequestParams, with_auth};
