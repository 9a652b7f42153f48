use fxhash::FxHashMap;

use crate::{FieldDefinition, FieldId, FieldType, Type, TypeId, TypeRegistry};

/// A finalized schema: every forward reference has been substituted by its definition.
#[derive(Debug)]
pub struct Schema {
    registry: TypeRegistry,
    fields: Vec<FieldDefinition>,
    // stale ids built on forward references -> their resolved instance
    substitutions: FxHashMap<TypeId, TypeId>,
}

impl Schema {
    pub(crate) fn new(
        registry: TypeRegistry,
        fields: Vec<FieldDefinition>,
        substitutions: FxHashMap<TypeId, TypeId>,
    ) -> Self {
        Self {
            registry,
            fields,
            substitutions,
        }
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Redirects ids obtained before finalization to the resolved instance.
    pub fn canonical(&self, id: TypeId) -> TypeId {
        self.substitutions.get(&id).copied().unwrap_or(id)
    }

    pub fn walk(&self, id: TypeId) -> Type<'_> {
        self.registry.walk(self.canonical(id))
    }

    pub fn lookup_type(&self, name: &str) -> Option<Type<'_>> {
        self.registry.lookup(name).map(|id| self.registry.walk(id))
    }

    pub fn fields(&self) -> impl ExactSizeIterator<Item = (FieldId, &FieldDefinition)> + '_ {
        self.fields
            .iter()
            .enumerate()
            .map(|(index, field)| (FieldId::from(index), field))
    }

    pub fn field(&self, parent: &str, name: &str) -> Option<FieldId> {
        self.fields()
            .find(|(_, field)| field.parent() == parent && field.name() == name)
            .map(|(id, _)| id)
    }

    /// Return type of a plain field, `None` for connections.
    pub fn field_type(&self, id: FieldId) -> Option<Type<'_>> {
        match self[id].ty() {
            FieldType::Type(ty) => Some(self.registry.walk(ty)),
            FieldType::Connection(_) => None,
        }
    }
}

impl std::ops::Index<FieldId> for Schema {
    type Output = FieldDefinition;

    fn index(&self, index: FieldId) -> &FieldDefinition {
        &self.fields[usize::from(index)]
    }
}
