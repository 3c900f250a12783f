//! Call arguments and request parameter resolution.

use std::collections::BTreeMap;

use crate::descriptor::{ID_PLACEHOLDER, Operation};
use crate::error::{Error, Result};

/// Parameter name the API key travels under until it becomes a header.
pub const API_KEY_PARAM: &str = "api_key";

/// Parameter name substituted into the `:id` path placeholder.
pub const ID_PARAM: &str = "id";

/// Parameter name → value mapping for one call.
pub type RequestParams = BTreeMap<String, String>;

/// Argument of a resource operation call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CallArgs {
    /// No argument.
    #[default]
    None,
    /// A resource id, substituted into the `:id` placeholder.
    Id(String),
    /// Extra query parameters; an `id` entry is substituted like [`CallArgs::Id`].
    Params(RequestParams),
}

impl CallArgs {
    /// Builds [`CallArgs::Id`].
    #[must_use]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Builds [`CallArgs::Params`] from key/value pairs.
    #[must_use]
    pub fn params<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Params(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Converts the argument into a parameter mapping (without the key).
    #[must_use]
    pub fn into_params(self) -> RequestParams {
        match self {
            Self::None => RequestParams::new(),
            Self::Id(id) => RequestParams::from([(String::from(ID_PARAM), id)]),
            Self::Params(params) => params,
        }
    }
}

impl From<&str> for CallArgs {
    fn from(id: &str) -> Self {
        Self::id(id)
    }
}

impl From<String> for CallArgs {
    fn from(id: String) -> Self {
        Self::Id(id)
    }
}

impl From<RequestParams> for CallArgs {
    fn from(params: RequestParams) -> Self {
        Self::Params(params)
    }
}

/// Adds the API key under [`API_KEY_PARAM`], replacing any caller value.
#[must_use]
pub fn with_auth(mut params: RequestParams, api_key: &str) -> RequestParams {
    params.insert(String::from(API_KEY_PARAM), String::from(api_key));
    params
}

/// Path segments and remaining parameters after `:id` substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Decoded path segments, relative to the base URL.
    pub segments: Vec<String>,
    /// Parameters left for the query string and headers.
    pub params: RequestParams,
}

/// Substitutes `:id` in the operation's template from `params["id"]`.
///
/// The `id` entry is consumed only when the template embeds it; otherwise
/// it stays in `params` and is sent as a query parameter.
///
/// # Errors
///
/// Returns [`Error::MissingPathParameter`] if the template has `:id` but
/// `params` carries no `id`, or an empty one.
pub fn resolve_path(operation: &Operation, mut params: RequestParams) -> Result<ResolvedPath> {
    let id = if operation.has_id_placeholder() {
        let id = params
            .remove(ID_PARAM)
            .filter(|id| !id.is_empty())
            .ok_or(Error::MissingPathParameter {
                operation: operation.name,
                template: operation.url_template,
            })?;
        Some(id)
    } else {
        None
    };

    let segments = operation
        .url_template
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| match (&id, segment) {
            (Some(id), ID_PLACEHOLDER) => id.clone(),
            _ => String::from(segment),
        })
        .collect();

    Ok(ResolvedPath { segments, params })
}
