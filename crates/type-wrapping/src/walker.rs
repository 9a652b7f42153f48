use crate::{TypeError, TypeId, TypeKind, TypeRecord, TypeRegistry};

/// Read-only view of a registered type.
#[derive(Clone, Copy)]
pub struct Type<'a> {
    registry: &'a TypeRegistry,
    id: TypeId,
}

impl<'a> Type<'a> {
    pub(crate) fn new(registry: &'a TypeRegistry, id: TypeId) -> Self {
        Self { registry, id }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn record(&self) -> &'a TypeRecord {
        &self.registry[self.id]
    }

    /// The directly wrapped type, if this is a wrapper.
    pub fn of_type(&self) -> Option<Type<'a>> {
        self.record().inner().map(|inner| self.registry.walk(inner))
    }

    /// Innermost named or forward type, stripping all wrappers.
    pub fn unwrap(&self) -> Type<'a> {
        let mut current = *self;
        while let Some(inner) = current.of_type() {
            current = inner;
        }
        current
    }

    /// A nullable list of non-nullables is considered nullable.
    pub fn non_null(&self) -> bool {
        matches!(self.record(), TypeRecord::NonNull { .. })
    }

    /// A non-nullable list is considered a list.
    pub fn list(&self) -> bool {
        match self.record() {
            TypeRecord::List { .. } => true,
            TypeRecord::NonNull { inner } => self.registry.walk(*inner).list(),
            TypeRecord::Named(_) | TypeRecord::Forward(_) => false,
        }
    }

    /// Whether items of this list should be skipped if resolving them raised an error.
    pub fn skip_nodes_on_raise(&self) -> bool {
        match self.record() {
            TypeRecord::List {
                skip_nodes_on_raise, ..
            } => *skip_nodes_on_raise,
            TypeRecord::NonNull { inner } => self.registry.walk(*inner).skip_nodes_on_raise(),
            TypeRecord::Named(_) | TypeRecord::Forward(_) => false,
        }
    }

    pub fn kind(&self) -> Result<TypeKind, TypeError> {
        match self.record() {
            TypeRecord::Named(named) => Ok(named.kind()),
            TypeRecord::NonNull { .. } => Ok(TypeKind::NonNull),
            TypeRecord::List { .. } => Ok(TypeKind::List),
            TypeRecord::Forward(forward) => Err(TypeError::MissingImplementation(format!("{forward:?}"))),
        }
    }

    /// Name of the innermost type.
    pub fn name(&self) -> &'a str {
        match self.unwrap().record() {
            TypeRecord::Named(named) => named.name(),
            TypeRecord::Forward(forward) => forward.name(),
            TypeRecord::NonNull { .. } | TypeRecord::List { .. } => unreachable!("unwrapped types are never wrappers"),
        }
    }

    /// False as long as the innermost type is a forward reference.
    pub fn is_resolved(&self) -> bool {
        !matches!(self.unwrap().record(), TypeRecord::Forward(_))
    }
}

impl std::fmt::Display for Type<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.record() {
            TypeRecord::Named(named) => write!(f, "{}", named.name()),
            TypeRecord::Forward(forward) => write!(f, "{forward}"),
            TypeRecord::NonNull { inner } => write!(f, "{}!", self.registry.walk(*inner)),
            TypeRecord::List { inner, .. } => write!(f, "[{}]", self.registry.walk(*inner)),
        }
    }
}

impl std::fmt::Debug for Type<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Type")
            .field("id", &self.id)
            .field("signature", &self.to_string())
            .field("skip_nodes_on_raise", &self.skip_nodes_on_raise())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{NamedType, TypeReference};

    use super::*;

    fn registry_with_item() -> (TypeRegistry, TypeId) {
        let mut registry = TypeRegistry::new();
        let item = registry.define(NamedType::object("Item")).unwrap();
        (registry, item)
    }

    #[test]
    fn bare_named_types_have_no_wrapping() {
        let (registry, item) = registry_with_item();
        let ty = registry.walk(item);

        assert!(!ty.non_null());
        assert!(!ty.list());
        assert!(!ty.skip_nodes_on_raise());
        assert_eq!(ty.kind(), Ok(TypeKind::Object));
        assert_eq!(ty.unwrap().id(), item);
        assert!(ty.of_type().is_none());
    }

    #[test]
    fn predicates_follow_the_wrapping() {
        let (mut registry, item) = registry_with_item();
        let required_item = item.to_non_null_type(&mut registry);
        let list = required_item.to_list_type(&mut registry, true);
        let required_list = list.to_non_null_type(&mut registry);

        let ty = registry.walk(list);
        assert!(ty.list());
        assert!(!ty.non_null());
        assert!(ty.skip_nodes_on_raise());
        assert_eq!(ty.kind(), Ok(TypeKind::List));

        let ty = registry.walk(required_list);
        assert!(ty.list());
        assert!(ty.non_null());
        assert!(ty.skip_nodes_on_raise());
        assert_eq!(ty.kind(), Ok(TypeKind::NonNull));
        assert_eq!(ty.of_type().map(|ty| ty.id()), Some(list));
        assert_eq!(ty.unwrap().id(), item);
        assert_eq!(ty.name(), "Item");
        assert_eq!(ty.to_string(), "[Item!]!");

        let ty = registry.walk(required_item);
        assert!(ty.non_null());
        assert!(!ty.list());
        assert!(!ty.skip_nodes_on_raise());
    }

    #[test]
    fn forward_references_have_no_kind() {
        let mut registry = TypeRegistry::new();
        let forward = registry.forward("Later");
        let wrapped = forward.to_list_type(&mut registry, false);

        let ty = registry.walk(forward);
        assert!(!ty.non_null());
        assert!(!ty.is_resolved());
        assert_eq!(
            ty.kind().unwrap_err().to_string(),
            "No `kind` defined for ForwardTypeReference(Later)"
        );

        let ty = registry.walk(wrapped);
        assert_eq!(ty.kind(), Ok(TypeKind::List));
        assert_eq!(ty.unwrap().id(), forward);
        assert_eq!(ty.to_string(), "[Later]");
    }
}
