//! Request execution: URL building, bearer authentication, status translation.
#![allow(clippy::future_not_send)]

use serde_json::Value;
use tracing::instrument;
use url::Url;

use crate::descriptor::Operation;
use crate::error::{Error, HttpResponseError, Result};
use crate::http::{HttpRequest, HttpResponse, LocalTransport};
use crate::params::{API_KEY_PARAM, RequestParams, resolve_path};

/// Status code treated as success.
const SUCCESS_STATUS: u16 = 200;

/// Builds the request for `operation` from authenticated parameters.
///
/// The API key is lifted out of `params` into an `Authorization: Bearer`
/// header; it is never part of the query string. Remaining parameters
/// become query pairs.
///
/// # Errors
///
/// - The template needs an `:id` that `params` lacks.
/// - `base_url` cannot carry path segments.
pub fn build_request(
    base_url: &Url,
    operation: &Operation,
    params: RequestParams,
) -> Result<HttpRequest> {
    let mut resolved = resolve_path(operation, params)?;

    let mut headers = Vec::new();
    if let Some(api_key) = resolved.params.remove(API_KEY_PARAM) {
        headers.push((String::from("Authorization"), format!("Bearer {api_key}")));
    }

    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|()| Error::InvalidUrl(format!("cannot be a base URL: {base_url}")))?
        .pop_if_empty()
        .extend(&resolved.segments);

    if !resolved.params.is_empty() {
        url.query_pairs_mut().extend_pairs(&resolved.params);
    }

    Ok(HttpRequest {
        method: operation.method,
        url,
        headers,
    })
}

/// Converts a non-200 response into [`Error::HttpResponse`].
///
/// The message is taken from the body's `message` field when the body is a
/// JSON object carrying a string there.
///
/// # Errors
///
/// Returns [`Error::HttpResponse`] for any status other than 200.
pub fn translate_status(response: &HttpResponse) -> Result<()> {
    if response.status == SUCCESS_STATUS {
        return Ok(());
    }

    let message = serde_json::from_str::<Value>(&response.body)
        .ok()
        .and_then(|body| {
            body.get("message")
                .and_then(Value::as_str)
                .map(String::from)
        });

    tracing::warn!(
        status = response.status,
        message = message.as_deref().unwrap_or("-"),
        "One API returned an error status"
    );

    Err(HttpResponseError::new(response.status, message).into())
}

/// Sends exactly one request for `operation` and returns the decoded body.
///
/// # Errors
///
/// - Request building fails (see [`build_request`]).
/// - The transport fails.
/// - The status is not 200.
/// - A 200 body is not valid JSON.
#[instrument(skip_all, fields(operation = operation.name))]
pub async fn execute<T: LocalTransport>(
    transport: &T,
    base_url: &Url,
    operation: &Operation,
    params: RequestParams,
) -> Result<Value> {
    let request = build_request(base_url, operation, params)?;
    tracing::debug!(
        method = request.method.as_str(),
        url = %request.url,
        "One API request"
    );

    let response = transport.send(request).await?;
    tracing::debug!(status = response.status, "One API response");

    translate_status(&response)?;

    serde_json::from_str(&response.body).map_err(|source| Error::Decode {
        message: format!("response body of `{}` is not valid JSON", operation.name),
        source,
    })
}
