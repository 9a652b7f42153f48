/// Fatal errors aborting the construction of a schema.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("At `{field}` returning `{ty}`: the `skip_nodes_on_raise` option is only applicable to lists.")]
    SkipNodesOnRaiseOnNonList { field: String, ty: String },
    #[error("Could not resolve the type `{name}` referenced by {location}")]
    UnresolvedType { name: String, location: String },
    #[error("The type `{name}` is defined more than once with different kinds")]
    DuplicateType { name: String },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("No `kind` defined for {0}")]
    MissingImplementation(String),
}
