//! Unwraps the `{ docs, total, limit, page, pages }` envelope.

use serde_json::Value;

use crate::descriptor::{Operation, OperationKind};
use crate::entity::Entity;
use crate::error::{Error, Result};

/// Key of the results array in the envelope.
const DOCS_KEY: &str = "docs";

/// Outcome of a successful call.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized<T> {
    /// Entities of a list-shaped operation (possibly empty).
    Many(Vec<T>),
    /// The single entity of a find operation.
    One(T),
    /// A find operation whose envelope had an empty `docs` array.
    /// Carries the body as received.
    NotFound(Value),
    /// The body did not have the envelope shape; returned unchanged.
    Raw(Value),
}

impl<T> Normalized<T> {
    /// Returns the entities of [`Normalized::Many`].
    #[must_use]
    pub fn into_many(self) -> Option<Vec<T>> {
        match self {
            Self::Many(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entity of [`Normalized::One`].
    #[must_use]
    pub fn into_one(self) -> Option<T> {
        match self {
            Self::One(item) => Some(item),
            _ => None,
        }
    }

    /// Returns `true` for [`Normalized::NotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Returns the `docs` array if `body` is an object carrying one.
fn docs(body: &Value) -> Option<&Vec<Value>> {
    body.get(DOCS_KEY)?.as_array()
}

fn decode<T: Entity>(operation: &Operation, element: &Value) -> Result<T> {
    T::deserialize(element).map_err(|source| Error::Decode {
        message: format!(
            "`{}.{}` returned an element that is not a {} entity",
            T::FAMILY,
            operation.name,
            T::FAMILY
        ),
        source,
    })
}

/// Shapes a decoded 200 body according to the operation kind.
///
/// # Errors
///
/// Returns [`Error::Decode`] if an element of `docs` does not decode into `T`.
pub fn normalize<T: Entity>(operation: &Operation, body: Value) -> Result<Normalized<T>> {
    let Some(docs) = docs(&body) else {
        return Ok(Normalized::Raw(body));
    };
    match operation.kind {
        OperationKind::List | OperationKind::ListForParent => {
            let items = docs
                .iter()
                .map(|element| decode(operation, element))
                .collect::<Result<Vec<T>>>()?;
            Ok(Normalized::Many(items))
        }
        OperationKind::Find => match docs.first() {
            Some(first) => Ok(Normalized::One(decode(operation, first)?)),
            None => Ok(Normalized::NotFound(body)),
        },
    }
}
