use crate::TypeId;

/// Classification token of a type, as reported by introspection's `__Type.kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, strum::Display, strum::EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

impl TypeKind {
    pub fn is_wrapping(self) -> bool {
        matches!(self, TypeKind::List | TypeKind::NonNull)
    }
}

/// A concrete type identified by its unique name. What the type contains is of no concern here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedType {
    name: String,
    kind: TypeKind,
}

impl NamedType {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        debug_assert!(!kind.is_wrapping(), "a named type cannot be a wrapping type");
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn scalar(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Scalar)
    }

    pub fn object(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Object)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }
}

/// A stand-in for a type which will be resolved by name when the schema is finalized.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ForwardTypeReference {
    name: String,
}

impl ForwardTypeReference {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Renders as the bare name, as it appears in type signatures.
impl std::fmt::Display for ForwardTypeReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

impl std::fmt::Debug for ForwardTypeReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ForwardTypeReference({})", self.name)
    }
}

/// A node of the type graph. Equal records are interned once, so a wrapper's identity is its
/// inner type's identity plus its flavor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRecord {
    Named(NamedType),
    Forward(ForwardTypeReference),
    NonNull { inner: TypeId },
    List { inner: TypeId, skip_nodes_on_raise: bool },
}

impl TypeRecord {
    pub fn inner(&self) -> Option<TypeId> {
        match self {
            TypeRecord::Named(_) | TypeRecord::Forward(_) => None,
            TypeRecord::NonNull { inner } | TypeRecord::List { inner, .. } => Some(*inner),
        }
    }
}
