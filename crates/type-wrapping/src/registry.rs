use fxhash::FxHashMap;

use crate::{interner::Interner, BuildError, ForwardTypeReference, NamedType, Type, TypeId, TypeRecord};

/// Owns every type reference of a schema, including wrappers.
///
/// The interner doubles as the memo table of wrapper instances, keyed by the inner type
/// identity, the wrapper flavor and, for lists, the `skip_nodes_on_raise` flag.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: Interner<TypeRecord, TypeId>,
    // canonical mapping from a name to its concrete definition
    definitions: FxHashMap<String, TypeId>,
    // conflicting definitions met through `TypeReference`, which cannot fail
    conflicts: Vec<BuildError>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines a named type. Defining the same type twice is a no-op, but two different types
    /// cannot share a name.
    pub fn define(&mut self, ty: NamedType) -> Result<TypeId, BuildError> {
        if let Some(&existing) = self.definitions.get(ty.name()) {
            return match &self.types[existing] {
                TypeRecord::Named(current) if *current == ty => Ok(existing),
                _ => Err(BuildError::DuplicateType {
                    name: ty.name().to_string(),
                }),
            };
        }

        let name = ty.name().to_string();
        let id = self.intern(TypeRecord::Named(ty));
        self.definitions.insert(name, id);

        Ok(id)
    }

    /// A reference to a type that may not be defined yet. One instance per name.
    pub fn forward(&mut self, name: impl Into<String>) -> TypeId {
        self.intern(TypeRecord::Forward(ForwardTypeReference::new(name)))
    }

    /// The non-null wrapper of `inner`. Wrapping a non-null type again returns it unchanged.
    pub fn non_null(&mut self, inner: TypeId) -> TypeId {
        if let TypeRecord::NonNull { .. } = self.types[inner] {
            return inner;
        }
        self.intern(TypeRecord::NonNull { inner })
    }

    /// The list wrapper of `inner`. The skipping and non-skipping lists are distinct instances.
    pub fn list(&mut self, inner: TypeId, skip_nodes_on_raise: bool) -> TypeId {
        self.intern(TypeRecord::List {
            inner,
            skip_nodes_on_raise,
        })
    }

    /// Rewraps `id` so that its outermost list skips errored items, keeping its nullability.
    /// Types which aren't lists are returned unchanged.
    pub fn with_skip_nodes_on_raise(&mut self, id: TypeId) -> TypeId {
        match self.types[id] {
            TypeRecord::NonNull { inner } => {
                let inner = self.with_skip_nodes_on_raise(inner);
                self.non_null(inner)
            }
            TypeRecord::List { inner, .. } => self.list(inner, true),
            TypeRecord::Named(_) | TypeRecord::Forward(_) => id,
        }
    }

    /// Looks up a concrete type by name. Forward references are never returned.
    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.definitions.get(name).copied()
    }

    pub fn walk(&self, id: TypeId) -> Type<'_> {
        Type::new(self, id)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.len() == 0
    }

    /// First conflicting definition referenced by value, reported when the schema is finalized.
    pub(crate) fn conflict(&self) -> Option<&BuildError> {
        self.conflicts.first()
    }

    pub(crate) fn ids(&self) -> impl ExactSizeIterator<Item = TypeId> {
        self.types.ids()
    }

    fn intern(&mut self, record: TypeRecord) -> TypeId {
        let (id, inserted) = self.types.get_or_insert_full(record);
        if inserted {
            tracing::trace!("Registered {:?}: {}", id, self.walk(id));
        }
        id
    }
}

impl std::ops::Index<TypeId> for TypeRegistry {
    type Output = TypeRecord;

    fn index(&self, index: TypeId) -> &TypeRecord {
        &self.types[index]
    }
}

/// Capability shared by everything that can stand where a type is expected: concrete named
/// types, forward references and already registered types, wrappers included.
pub trait TypeReference {
    /// Registers the reference if needed and returns its identity.
    fn type_id(&self, registry: &mut TypeRegistry) -> TypeId;

    /// Make a non-null representation of this type. Repeated calls return the same instance.
    fn to_non_null_type(&self, registry: &mut TypeRegistry) -> TypeId {
        let id = self.type_id(registry);
        registry.non_null(id)
    }

    /// Make a list representation of this type, one instance per value of `skip_nodes_on_raise`.
    fn to_list_type(&self, registry: &mut TypeRegistry, skip_nodes_on_raise: bool) -> TypeId {
        let id = self.type_id(registry);
        registry.list(id, skip_nodes_on_raise)
    }
}

impl TypeReference for TypeId {
    fn type_id(&self, _registry: &mut TypeRegistry) -> TypeId {
        *self
    }
}

impl TypeReference for NamedType {
    /// Referencing a type by value defines it if it wasn't already. On a name conflict the first
    /// definition is returned and the conflict is kept, failing [`SchemaBuilder::finalize`].
    ///
    /// [`SchemaBuilder::finalize`]: crate::SchemaBuilder::finalize
    fn type_id(&self, registry: &mut TypeRegistry) -> TypeId {
        match registry.define(self.clone()) {
            Ok(id) => id,
            Err(error) => {
                tracing::debug!("{error}");
                registry.conflicts.push(error);
                registry.definitions[self.name()]
            }
        }
    }
}

impl TypeReference for ForwardTypeReference {
    fn type_id(&self, registry: &mut TypeRegistry) -> TypeId {
        registry.intern(TypeRecord::Forward(self.clone()))
    }
}

impl<T: TypeReference + ?Sized> TypeReference for &T {
    fn type_id(&self, registry: &mut TypeRegistry) -> TypeId {
        (**self).type_id(registry)
    }
}
