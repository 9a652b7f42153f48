use std::{
    future::Future,
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use tokio_util::sync::CancellationToken;

use crate::{ExecutionConfig, ExecutionError, FieldError, GraphqlError, ResponsePath, ResponsePathSegment};

/// Append-only error list shared by every resolution of a query.
#[derive(Debug, Clone, Default)]
pub struct ErrorSink(Arc<Mutex<Vec<GraphqlError>>>);

impl ErrorSink {
    pub fn push(&self, error: GraphqlError) {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).push(error);
    }

    pub fn len(&self) -> usize {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn take(&self) -> Vec<GraphqlError> {
        std::mem::take(&mut *self.0.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

/// Read-only state of a single query execution, cheap to clone into every item resolution.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    errors: ErrorSink,
    cancellation: CancellationToken,
    timeout: Option<Duration>,
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::new(&ExecutionConfig::default())
    }
}

impl ExecutionContext {
    pub fn new(config: &ExecutionConfig) -> Self {
        Self {
            errors: ErrorSink::default(),
            cancellation: CancellationToken::new(),
            timeout: config.timeout,
        }
    }

    pub fn errors(&self) -> &ErrorSink {
        &self.errors
    }

    /// Errors emitted so far, emptying the sink.
    pub fn into_errors(self) -> Vec<GraphqlError> {
        self.errors.take()
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Cancels every outstanding resolution of the query.
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Drives the query's root future, enforcing the configured timeout.
    pub async fn run<T>(&self, future: impl Future<Output = Result<T, ExecutionError>>) -> Result<T, ExecutionError> {
        let Some(timeout) = self.timeout else {
            return future.await;
        };

        match tokio::time::timeout(timeout, future).await {
            Ok(result) => result,
            Err(_) => {
                tracing::debug!("Execution timed out after {timeout:?}");
                self.cancel();
                Err(ExecutionError::Cancelled)
            }
        }
    }
}

/// Context handed to the resolver of a single list item or edge.
#[derive(Debug, Clone)]
pub struct ItemContext {
    execution: ExecutionContext,
    path: ResponsePath,
}

impl ItemContext {
    pub(crate) fn new(execution: ExecutionContext, path: ResponsePath) -> Self {
        Self { execution, path }
    }

    pub fn execution(&self) -> &ExecutionContext {
        &self.execution
    }

    pub fn path(&self) -> &ResponsePath {
        &self.path
    }

    pub fn child(&self, segment: impl Into<ResponsePathSegment>) -> ItemContext {
        ItemContext {
            execution: self.execution.clone(),
            path: self.path.child(segment),
        }
    }

    /// Records an error raised at or below this item, its path being relative to the item.
    pub fn record_error(&self, error: FieldError) {
        self.execution.errors.push(error.into_graphql_error(&self.path));
    }
}
