use std::future::Future;

use serde::ser::SerializeStruct;
use tracing::Instrument;
use wrapping::{ConnectionDefinition, FieldId, FieldType, Schema};

use crate::{
    resolve_list, ExecutionContext, ExecutionError, ItemContext, ListShape, ResolvedList, ResolverError, ResponsePath,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionShape {
    pub nullable: bool,
    pub edges_nullable: bool,
    pub edge_nullable: bool,
    pub node_nullable: bool,
    pub skip_nodes_on_raise: bool,
}

impl From<ConnectionDefinition> for ConnectionShape {
    fn from(definition: ConnectionDefinition) -> Self {
        ConnectionShape {
            nullable: definition.nullable,
            edges_nullable: definition.edges_nullable,
            edge_nullable: definition.edge_nullable,
            node_nullable: definition.node_nullable,
            skip_nodes_on_raise: definition.skip_nodes_on_raise,
        }
    }
}

impl ConnectionShape {
    /// `None` if the field doesn't return a connection.
    pub fn for_field(schema: &Schema, field: FieldId) -> Option<Self> {
        match schema[field].ty() {
            FieldType::Connection(definition) => Some(definition.into()),
            FieldType::Type(_) => None,
        }
    }

    fn edges(self) -> ListShape {
        ListShape {
            nullable: self.edges_nullable,
            item_nullable: self.edge_nullable,
            skip_nodes_on_raise: self.skip_nodes_on_raise,
        }
    }
}

/// An edge as produced by the data source, before its node is resolved. Cursors are opaque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeSource<S> {
    pub cursor: String,
    pub node: S,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Edge<N> {
    pub node: Option<N>,
    pub cursor: String,
}

/// A resolved connection. Nodes are always derived from the surviving edges, so they are null
/// whenever `edges` is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection<N> {
    edges: Option<ResolvedList<Edge<N>>>,
}

impl<N> Connection<N> {
    /// `None` if a required edge nulled the nullable `edges` list.
    pub fn edges(&self) -> Option<&ResolvedList<Edge<N>>> {
        self.edges.as_ref()
    }

    /// One entry per edge slot, `None` for a null edge or a null node.
    pub fn nodes(&self) -> Option<impl ExactSizeIterator<Item = Option<&N>> + '_> {
        let edges = self.edges.as_ref()?;
        Some(edges.iter().map(|edge| edge.and_then(|edge| edge.node.as_ref())))
    }
}

impl<N: serde::Serialize> serde::Serialize for Connection<N> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut connection = serializer.serialize_struct("Connection", 2)?;
        connection.serialize_field("edges", &self.edges)?;
        connection.serialize_field("nodes", &self.nodes().map(|nodes| nodes.collect::<Vec<_>>()))?;
        connection.end()
    }
}

/// Resolve a connection, its `edges` being resolved exactly like a list under `path.edges`.
///
/// Errors raised while resolving a node belong to its edge. A skipping connection drops the
/// edge, otherwise the null goes to the node, the edge, the `edges` list or the connection,
/// whichever is the first nullable one.
pub async fn resolve_connection<S, N, F, Fut>(
    ctx: &ExecutionContext,
    path: &ResponsePath,
    shape: ConnectionShape,
    edges: impl IntoIterator<Item = EdgeSource<S>>,
    node_resolver: F,
) -> Result<Option<Connection<N>>, ExecutionError>
where
    F: Fn(ItemContext, S) -> Fut,
    Fut: Future<Output = Result<N, ResolverError>>,
{
    let span = tracing::debug_span!(
        "resolve_connection",
        path = %path,
        skip_nodes_on_raise = shape.skip_nodes_on_raise
    );

    async {
        let null_node_in_place = shape.node_nullable && !shape.skip_nodes_on_raise;
        let node_resolver = &node_resolver;

        let edges = resolve_list(ctx, &path.child("edges"), shape.edges(), edges, |edge, source| async move {
            let EdgeSource { cursor, node } = source;
            let node_ctx = edge.child("node");

            let node = match node_resolver(node_ctx.clone(), node).await {
                Ok(node) => Some(node),
                Err(ResolverError::Cancelled) => return Err(ResolverError::Cancelled),
                Err(ResolverError::Field(error)) if null_node_in_place => {
                    node_ctx.record_error(error);
                    None
                }
                Err(ResolverError::Field(error)) => return Err(ResolverError::Field(error.nested_in("node"))),
                Err(ResolverError::Propagated) if null_node_in_place => None,
                Err(ResolverError::Propagated) => return Err(ResolverError::Propagated),
            };

            Ok(Edge { node, cursor })
        })
        .await;

        match edges {
            // `Ok(None)` only when `edges` is nullable
            Ok(edges) => Ok(Some(Connection { edges })),
            Err(ExecutionError::PropagateNull) if shape.nullable => {
                tracing::debug!("Connection nulled by one of its edges");
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }
    .instrument(span)
    .await
}
