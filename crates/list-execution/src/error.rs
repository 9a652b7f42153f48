use std::collections::BTreeMap;

use crate::{ResponsePath, ResponsePathSegment};

/// An entry of the response's `errors`.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct GraphqlError {
    pub message: String,
    pub path: ResponsePath,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extensions: BTreeMap<String, serde_json::Value>,
}

/// An error raised while resolving a field.
///
/// The path is relative to the list item (or edge) it was raised under, so that errors deep in an
/// item's subtree keep their full path once recorded.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct FieldError {
    message: String,
    path: ResponsePath,
    extensions: BTreeMap<String, serde_json::Value>,
}

impl FieldError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: ResponsePath::default(),
            extensions: BTreeMap::new(),
        }
    }

    /// Marks the error as raised below `segment`. Call it while bubbling up, innermost first.
    #[must_use]
    pub fn nested_in(mut self, segment: impl Into<ResponsePathSegment>) -> Self {
        self.path = self.path.prepend(segment);
        self
    }

    #[must_use]
    pub fn with_extension(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.extensions.insert(key.into(), value.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn path(&self) -> &ResponsePath {
        &self.path
    }

    pub(crate) fn into_graphql_error(self, base: &ResponsePath) -> GraphqlError {
        GraphqlError {
            message: self.message,
            path: base.join(&self.path),
            extensions: self.extensions,
        }
    }
}

/// How an item (or edge) resolution failed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolverError {
    /// A new error, to be recorded with the item's path.
    #[error(transparent)]
    Field(#[from] FieldError),
    /// An error was already recorded deeper in the item and its null reached the item.
    #[error("a non-nullable position was nulled below this item")]
    Propagated,
    #[error("execution was cancelled")]
    Cancelled,
}

/// Outcome of a list or connection which did not produce a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ExecutionError {
    /// The list is non-null but was nulled, the parent must null its nearest nullable position.
    #[error("a non-nullable position was nulled and the null propagates to the parent")]
    PropagateNull,
    /// The whole query was cancelled or timed out, partial results are discarded.
    #[error("execution was cancelled")]
    Cancelled,
}

impl From<ExecutionError> for ResolverError {
    fn from(error: ExecutionError) -> Self {
        match error {
            ExecutionError::PropagateNull => ResolverError::Propagated,
            ExecutionError::Cancelled => ResolverError::Cancelled,
        }
    }
}
