//! Static operation tables for each resource family.

use std::fmt;

use crate::error::{Error, Result};

/// HTTP method of an operation.
///
/// The API is read-only from this client's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// `GET`
    Get,
}

impl HttpMethod {
    /// Returns the method name as sent on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
        }
    }
}

/// Response shape an operation expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// All matching items.
    List,
    /// One item by id.
    Find,
    /// Items nested under a parent id.
    ListForParent,
}

impl OperationKind {
    /// Returns `true` for kinds that yield a sequence of entities.
    #[must_use]
    pub const fn is_list(self) -> bool {
        matches!(self, Self::List | Self::ListForParent)
    }
}

/// One declared operation of a resource family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    /// Operation name used for lookup.
    pub name: &'static str,
    /// HTTP method.
    pub method: HttpMethod,
    /// Path template relative to the base URL, with at most one `:id`.
    pub url_template: &'static str,
    /// Expected response shape.
    pub kind: OperationKind,
}

impl Operation {
    const fn get(name: &'static str, url_template: &'static str, kind: OperationKind) -> Self {
        Self {
            name,
            method: HttpMethod::Get,
            url_template,
            kind,
        }
    }

    /// Returns `true` if the template contains an `:id` placeholder.
    #[must_use]
    pub fn has_id_placeholder(&self) -> bool {
        self.url_template
            .split('/')
            .any(|segment| segment == ID_PLACEHOLDER)
    }
}

/// Path placeholder substituted with the call's id.
pub const ID_PLACEHOLDER: &str = ":id";

const MOVIE_OPERATIONS: &[Operation] = &[
    Operation::get("list", "/movie", OperationKind::List),
    Operation::get("find", "/movie/:id", OperationKind::Find),
];

const QUOTE_OPERATIONS: &[Operation] = &[
    Operation::get("list", "/quote", OperationKind::List),
    Operation::get("find", "/quote/:id", OperationKind::Find),
    Operation::get(
        "list_for_movie",
        "/movie/:id/quote",
        OperationKind::ListForParent,
    ),
];

/// A group of operations bound to one remote collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceFamily {
    /// `/movie`
    Movie,
    /// `/quote`
    Quote,
}

impl ResourceFamily {
    /// Returns the lowercase family name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Quote => "quote",
        }
    }

    /// Returns every operation declared for this family.
    #[must_use]
    pub const fn operations(self) -> &'static [Operation] {
        match self {
            Self::Movie => MOVIE_OPERATIONS,
            Self::Quote => QUOTE_OPERATIONS,
        }
    }

    /// Looks up an operation by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedOperation`] if the name is not declared.
    pub fn operation(self, name: &str) -> Result<&'static Operation> {
        self.operations()
            .iter()
            .find(|op| op.name == name)
            .ok_or_else(|| Error::UnsupportedOperation {
                family: self,
                operation: String::from(name),
            })
    }
}

impl fmt::Display for ResourceFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_movie_operations() {
        // Arrange & Act
        let list = ResourceFamily::Movie.operation("list").unwrap();
        let find = ResourceFamily::Movie.operation("find").unwrap();

        // Assert
        assert_eq!(list.url_template, "/movie");
        assert_eq!(list.kind, OperationKind::List);
        assert_eq!(find.url_template, "/movie/:id");
        assert_eq!(find.kind, OperationKind::Find);
        assert_eq!(find.method, HttpMethod::Get);
    }

    #[test]
    fn test_quote_list_for_movie_route() {
        // Arrange & Act
        let op = ResourceFamily::Quote.operation("list_for_movie").unwrap();

        // Assert
        assert_eq!(op.url_template, "/movie/:id/quote");
        assert_eq!(op.kind, OperationKind::ListForParent);
        assert!(op.kind.is_list());
        assert!(op.has_id_placeholder());
    }

    #[test]
    fn test_movie_has_no_list_for_movie() {
        // Arrange & Act
        let result = ResourceFamily::Movie.operation("list_for_movie");

        // Assert
        let err = result.unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedOperation {
                family: ResourceFamily::Movie,
                ref operation,
            } if operation == "list_for_movie"
        ));
    }

    #[test]
    fn test_unknown_operation_is_rejected() {
        // Arrange & Act
        let result = ResourceFamily::Quote.operation("delete");

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_every_template_has_at_most_one_placeholder() {
        for family in [ResourceFamily::Movie, ResourceFamily::Quote] {
            for op in family.operations() {
                let count = op
                    .url_template
                    .split('/')
                    .filter(|segment| *segment == ID_PLACEHOLDER)
                    .count();
                assert!(count <= 1, "{family}.{} has {count} placeholders", op.name);
            }
        }
    }

    #[test]
    fn test_list_template_has_no_placeholder() {
        // Arrange & Act
        let op = ResourceFamily::Movie.operation("list").unwrap();

        // Assert
        assert!(!op.has_id_placeholder());
    }
}
