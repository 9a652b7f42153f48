use std::future::Future;

use futures_util::future::{self, Either};
use tracing::Instrument;
use wrapping::{FieldId, Schema, Type, TypeRecord};

use crate::{ExecutionContext, ExecutionError, ItemContext, ResolverError, ResponsePath};

/// Nullability and error policy of a list position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListShape {
    pub nullable: bool,
    pub item_nullable: bool,
    pub skip_nodes_on_raise: bool,
}

impl ListShape {
    /// Shape of a list type, possibly non-null. `None` if the type isn't a list.
    pub fn from_type(ty: Type<'_>) -> Option<Self> {
        let (nullable, list) = if ty.non_null() { (false, ty.of_type()?) } else { (true, ty) };
        let skip_nodes_on_raise = match list.record() {
            TypeRecord::List {
                skip_nodes_on_raise, ..
            } => *skip_nodes_on_raise,
            _ => return None,
        };

        Some(ListShape {
            nullable,
            item_nullable: !list.of_type()?.non_null(),
            skip_nodes_on_raise,
        })
    }

    pub fn for_field(schema: &Schema, field: FieldId) -> Option<Self> {
        schema.field_type(field).and_then(Self::from_type)
    }
}

/// The surviving items of a list, in source order.
///
/// A slot is `None` only when a nullable item was nulled by an error; skipped items occupy no
/// slot at all.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct ResolvedList<T> {
    items: Vec<Option<T>>,
}

impl<T> ResolvedList<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = Option<&T>> + '_ {
        self.items.iter().map(Option::as_ref)
    }

    pub fn into_inner(self) -> Vec<Option<T>> {
        self.items
    }
}

impl<T> IntoIterator for ResolvedList<T> {
    type Item = Option<T>;
    type IntoIter = std::vec::IntoIter<Option<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Resolve a list by executing each of the items concurrently.
///
/// Every item gets its own [`ItemContext`] whose path ends with the item's index. Errors are
/// always recorded in the context's error sink. Whether they also null the list depends on the
/// shape:
///
/// * skipping lists drop the errored item and keep going,
/// * nullable items are replaced by `null`,
/// * otherwise the list is nulled, returning `Ok(None)`, or if the list itself is non-null,
///   [`ExecutionError::PropagateNull`] is returned for the parent to handle.
///
/// Cancellation of the execution discards the whole list, skipping or not.
pub async fn resolve_list<S, T, F, Fut>(
    ctx: &ExecutionContext,
    path: &ResponsePath,
    shape: ListShape,
    items: impl IntoIterator<Item = S>,
    resolver: F,
) -> Result<Option<ResolvedList<T>>, ExecutionError>
where
    F: Fn(ItemContext, S) -> Fut,
    Fut: Future<Output = Result<T, ResolverError>>,
{
    let span = tracing::debug_span!("resolve_list", path = %path, skip_nodes_on_raise = shape.skip_nodes_on_raise);
    resolve_list_inner(ctx, path, shape, items, resolver).instrument(span).await
}

async fn resolve_list_inner<S, T, F, Fut>(
    ctx: &ExecutionContext,
    path: &ResponsePath,
    shape: ListShape,
    items: impl IntoIterator<Item = S>,
    resolver: F,
) -> Result<Option<ResolvedList<T>>, ExecutionError>
where
    F: Fn(ItemContext, S) -> Fut,
    Fut: Future<Output = Result<T, ResolverError>>,
{
    if ctx.is_cancelled() {
        return Err(ExecutionError::Cancelled);
    }

    let futures = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| resolver(ItemContext::new(ctx.clone(), path.child(index)), item));

    // join_all yields results in source order, whatever the completion order.
    let resolved = future::join_all(futures);
    let cancelled = ctx.cancellation_token().cancelled();
    futures_util::pin_mut!(resolved, cancelled);

    let results = match future::select(cancelled, resolved).await {
        Either::Left(_) => {
            tracing::debug!("Execution cancelled, discarding the list");
            return Err(ExecutionError::Cancelled);
        }
        Either::Right((results, _)) => results,
    };

    let mut items = Vec::with_capacity(results.len());
    let mut nulled = false;

    for (index, result) in results.into_iter().enumerate() {
        let error = match result {
            Ok(value) => {
                items.push(Some(value));
                continue;
            }
            Err(ResolverError::Cancelled) => return Err(ExecutionError::Cancelled),
            Err(error) => error,
        };

        if let ResolverError::Field(error) = error {
            ctx.errors().push(error.into_graphql_error(&path.child(index)));
        }

        if shape.skip_nodes_on_raise {
            tracing::debug!("Skipping errored item {index}");
        } else if shape.item_nullable {
            items.push(None);
        } else {
            nulled = true;
        }
    }

    if nulled {
        tracing::debug!("A non-nullable item was nulled, propagating to the list");
        return if shape.nullable {
            Ok(None)
        } else {
            Err(ExecutionError::PropagateNull)
        };
    }

    Ok(Some(ResolvedList { items }))
}
