use fxhash::FxHashMap;

use crate::{BuildError, FieldId, NamedType, Schema, TypeId, TypeRecord, TypeRegistry};

/// Minimal field declaration: enough to carry the return type and the skip flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    parent: String,
    name: String,
    ty: FieldType,
    skip_nodes_on_raise: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Type(TypeId),
    Connection(ConnectionDefinition),
}

impl From<TypeId> for FieldType {
    fn from(id: TypeId) -> Self {
        FieldType::Type(id)
    }
}

impl From<ConnectionDefinition> for FieldType {
    fn from(connection: ConnectionDefinition) -> Self {
        FieldType::Connection(connection)
    }
}

/// A paginated connection over `node`. One configurable definition stands for every
/// nullable/required and skipping/non-skipping variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionDefinition {
    pub node: TypeId,
    pub nullable: bool,
    /// Nullability of the `edges` list itself.
    pub edges_nullable: bool,
    pub edge_nullable: bool,
    pub node_nullable: bool,
    pub skip_nodes_on_raise: bool,
}

impl ConnectionDefinition {
    pub fn new(node: TypeId) -> Self {
        Self {
            node,
            nullable: true,
            edges_nullable: true,
            edge_nullable: true,
            node_nullable: true,
            skip_nodes_on_raise: false,
        }
    }

    #[must_use]
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    #[must_use]
    pub fn edges_nullable(mut self, edges_nullable: bool) -> Self {
        self.edges_nullable = edges_nullable;
        self
    }

    #[must_use]
    pub fn edge_nullable(mut self, edge_nullable: bool) -> Self {
        self.edge_nullable = edge_nullable;
        self
    }

    #[must_use]
    pub fn node_nullable(mut self, node_nullable: bool) -> Self {
        self.node_nullable = node_nullable;
        self
    }

    #[must_use]
    pub fn skip_nodes_on_raise(mut self, skip_nodes_on_raise: bool) -> Self {
        self.skip_nodes_on_raise = skip_nodes_on_raise;
        self
    }
}

impl FieldDefinition {
    pub fn new(parent: impl Into<String>, name: impl Into<String>, ty: impl Into<FieldType>) -> Self {
        Self {
            parent: parent.into(),
            name: name.into(),
            ty: ty.into(),
            skip_nodes_on_raise: false,
        }
    }

    #[must_use]
    pub fn skip_nodes_on_raise(mut self, skip_nodes_on_raise: bool) -> Self {
        self.skip_nodes_on_raise = skip_nodes_on_raise;
        self
    }

    pub fn parent(&self) -> &str {
        &self.parent
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> FieldType {
        self.ty
    }

    pub fn skips_nodes_on_raise(&self) -> bool {
        self.skip_nodes_on_raise
    }

    /// `Parent.field`
    pub fn coordinate(&self) -> String {
        format!("{}.{}", self.parent, self.name)
    }

    pub(crate) fn ty_mut(&mut self) -> &mut FieldType {
        &mut self.ty
    }
}

#[derive(Debug, Default)]
pub struct SchemaBuilder {
    registry: TypeRegistry,
    fields: Vec<FieldDefinition>,
    // first field referencing each forward type, for error reporting
    forward_sites: FxHashMap<TypeId, String>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut TypeRegistry {
        &mut self.registry
    }

    pub fn define(&mut self, ty: NamedType) -> Result<TypeId, BuildError> {
        self.registry.define(ty)
    }

    pub fn forward(&mut self, name: impl Into<String>) -> TypeId {
        self.registry.forward(name)
    }

    /// Declares a field, validating the placement of `skip_nodes_on_raise`.
    ///
    /// The flag is only legal on lists (possibly non-null) and connections. On a list the
    /// declared type is rewrapped so that its outermost list is the skipping instance.
    pub fn field(&mut self, mut definition: FieldDefinition) -> Result<FieldId, BuildError> {
        let skip_nodes_on_raise = definition.skip_nodes_on_raise;
        let coordinate = definition.coordinate();

        let skip_nodes_on_raise = match definition.ty_mut() {
            FieldType::Connection(connection) => {
                connection.skip_nodes_on_raise |= skip_nodes_on_raise;
                connection.skip_nodes_on_raise
            }
            FieldType::Type(id) => {
                if skip_nodes_on_raise {
                    let ty = self.registry.walk(*id);
                    if !ty.list() {
                        return Err(BuildError::SkipNodesOnRaiseOnNonList {
                            field: coordinate,
                            ty: ty.to_string(),
                        });
                    }
                    *id = self.registry.with_skip_nodes_on_raise(*id);
                }
                self.registry.walk(*id).skip_nodes_on_raise()
            }
        };
        definition.skip_nodes_on_raise = skip_nodes_on_raise;

        let innermost = match definition.ty {
            FieldType::Type(id) => self.registry.walk(id).unwrap().id(),
            FieldType::Connection(connection) => self.registry.walk(connection.node).unwrap().id(),
        };
        if let TypeRecord::Forward(_) = self.registry[innermost] {
            self.forward_sites
                .entry(innermost)
                .or_insert(coordinate);
        }

        let id = FieldId::from(self.fields.len());
        self.fields.push(definition);
        Ok(id)
    }

    /// Resolves every forward reference and freezes the schema.
    ///
    /// Wrappers built on top of a forward reference are rebuilt through the registry's memo
    /// table, so they end up being the very same instances as the wrappers applied directly to
    /// the resolved type.
    pub fn finalize(self) -> Result<Schema, BuildError> {
        let SchemaBuilder {
            mut registry,
            mut fields,
            forward_sites,
        } = self;

        if let Some(conflict) = registry.conflict() {
            return Err(conflict.clone());
        }

        let mut substitutions = FxHashMap::default();
        let declared = registry.ids().collect::<Vec<_>>();
        for id in declared {
            resolve(&mut registry, id, &forward_sites, &mut substitutions)?;
        }

        let canonical = |id: TypeId| substitutions.get(&id).copied().unwrap_or(id);
        for field in &mut fields {
            match field.ty_mut() {
                FieldType::Type(id) => *id = canonical(*id),
                FieldType::Connection(connection) => connection.node = canonical(connection.node),
            }
        }

        tracing::debug!(
            "Finalized schema with {} types, {} fields and {} substituted references",
            registry.len(),
            fields.len(),
            substitutions.len()
        );

        Ok(Schema::new(registry, fields, substitutions))
    }
}

fn resolve(
    registry: &mut TypeRegistry,
    id: TypeId,
    forward_sites: &FxHashMap<TypeId, String>,
    substitutions: &mut FxHashMap<TypeId, TypeId>,
) -> Result<TypeId, BuildError> {
    if let Some(&resolved) = substitutions.get(&id) {
        return Ok(resolved);
    }

    let resolved = match registry[id].clone() {
        TypeRecord::Named(_) => id,
        TypeRecord::Forward(forward) => {
            let resolved = registry
                .lookup(forward.name())
                .ok_or_else(|| BuildError::UnresolvedType {
                    name: forward.name().to_string(),
                    location: forward_sites
                        .get(&id)
                        .map(|field| format!("the field `{field}`"))
                        .unwrap_or_else(|| "an unattached type reference".to_string()),
                })?;
            tracing::debug!("Resolved forward reference to `{}`", forward.name());
            resolved
        }
        TypeRecord::NonNull { inner } => {
            let inner = resolve(registry, inner, forward_sites, substitutions)?;
            registry.non_null(inner)
        }
        TypeRecord::List {
            inner,
            skip_nodes_on_raise,
        } => {
            let inner = resolve(registry, inner, forward_sites, substitutions)?;
            registry.list(inner, skip_nodes_on_raise)
        }
    };

    if resolved != id {
        substitutions.insert(id, resolved);
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use crate::{TypeKind, TypeReference};

    use super::*;

    #[test]
    fn skip_nodes_on_raise_is_rejected_outside_of_lists() {
        let mut builder = SchemaBuilder::new();
        let string = builder.define(NamedType::scalar("String")).unwrap();

        let err = builder
            .field(FieldDefinition::new("Query", "notAList", string).skip_nodes_on_raise(true))
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "At `Query.notAList` returning `String`: the `skip_nodes_on_raise` option is only applicable to lists."
        );

        let required = string.to_non_null_type(builder.registry_mut());
        let err = builder
            .field(FieldDefinition::new("Query", "requiredNotAList", required).skip_nodes_on_raise(true))
            .unwrap_err();
        assert!(matches!(err, BuildError::SkipNodesOnRaiseOnNonList { ty, .. } if ty == "String!"));
    }

    #[test]
    fn skip_nodes_on_raise_rewraps_the_outermost_list() {
        let mut builder = SchemaBuilder::new();
        let item = builder.define(NamedType::object("Item")).unwrap();
        let list = item.to_list_type(builder.registry_mut(), false);
        let required_list = list.to_non_null_type(builder.registry_mut());

        let field = builder
            .field(FieldDefinition::new("Query", "items", required_list).skip_nodes_on_raise(true))
            .unwrap();
        let skipping = item.to_list_type(builder.registry_mut(), true);
        let expected = skipping.to_non_null_type(builder.registry_mut());

        let schema = builder.finalize().unwrap();
        assert_eq!(schema[field].ty(), FieldType::Type(expected));
        assert!(schema[field].skips_nodes_on_raise());
    }

    #[test]
    fn skipping_list_types_mark_the_field() {
        let mut builder = SchemaBuilder::new();
        let item = builder.define(NamedType::object("Item")).unwrap();
        let skipping = item.to_list_type(builder.registry_mut(), true);

        let field = builder.field(FieldDefinition::new("Query", "items", skipping)).unwrap();
        let schema = builder.finalize().unwrap();

        assert!(schema[field].skips_nodes_on_raise());
    }

    #[test]
    fn skip_nodes_on_raise_is_accepted_on_connections() {
        let mut builder = SchemaBuilder::new();
        let item = builder.define(NamedType::object("Item")).unwrap();

        let field = builder
            .field(
                FieldDefinition::new("Query", "itemsConnection", ConnectionDefinition::new(item))
                    .skip_nodes_on_raise(true),
            )
            .unwrap();
        let schema = builder.finalize().unwrap();

        let FieldType::Connection(connection) = schema[field].ty() else {
            unreachable!("declared as a connection")
        };
        assert!(connection.skip_nodes_on_raise);
        assert!(schema[field].skips_nodes_on_raise());
    }

    #[test]
    fn unresolved_forward_references_name_their_declaration() {
        let mut builder = SchemaBuilder::new();
        let missing = builder.forward("Missing");
        let list = missing.to_list_type(builder.registry_mut(), false);
        builder.field(FieldDefinition::new("Query", "missing", list)).unwrap();

        let err = builder.finalize().unwrap_err();

        assert_eq!(
            err,
            BuildError::UnresolvedType {
                name: "Missing".into(),
                location: "the field `Query.missing`".into(),
            }
        );
    }

    #[test]
    fn unattached_forward_references_must_resolve_too() {
        let mut builder = SchemaBuilder::new();
        builder.forward("Ghost");

        let err = builder.finalize().unwrap_err();

        assert_eq!(
            err.to_string(),
            "Could not resolve the type `Ghost` referenced by an unattached type reference"
        );
    }

    #[test]
    fn forward_references_resolve_to_their_definition() {
        let mut builder = SchemaBuilder::new();
        let forward = builder.forward("Item");
        let field = builder.field(FieldDefinition::new("Query", "item", forward)).unwrap();
        let item = builder.define(NamedType::object("Item")).unwrap();

        let schema = builder.finalize().unwrap();

        assert_eq!(schema[field].ty(), FieldType::Type(item));
        assert_eq!(schema.canonical(forward), item);
        assert_eq!(schema.walk(forward).kind(), Ok(TypeKind::Object));
        assert_eq!(schema.registry().lookup("Item"), Some(item));
    }

    #[test]
    fn conflicting_type_references_fail_the_build() {
        let mut builder = SchemaBuilder::new();
        builder.define(NamedType::object("Item")).unwrap();
        let list = NamedType::scalar("Item").to_list_type(builder.registry_mut(), false);
        builder.field(FieldDefinition::new("Query", "items", list)).unwrap();

        assert_eq!(builder.registry().len(), 2);
        assert_eq!(
            builder.finalize().unwrap_err(),
            BuildError::DuplicateType { name: "Item".into() }
        );
    }
}
