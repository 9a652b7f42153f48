// Isolating ids from the rest to prevent misuse of the NonZeroU32.
// They can only be created by From<usize>

/// Reserving the 4 upper bits for some fun with bit packing. It still leaves 268 million possible values.
const MAX_ID: usize = (1 << 29) - 1;

macro_rules! id_newtypes {
    ($($name:ident unless $msg:literal,)*) => {
        $(
            #[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash)]
            pub struct $name(std::num::NonZeroU32);

            impl From<usize> for $name {
                fn from(index: usize) -> Self {
                    assert!(index <= MAX_ID, $msg);
                    Self(std::num::NonZeroU32::new((index + 1) as u32).unwrap())
                }
            }

            impl From<$name> for usize {
                fn from(id: $name) -> Self {
                    (id.0.get() - 1) as usize
                }
            }

            impl std::fmt::Debug for $name {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    let name = stringify!($name);
                    write!(f, "{}#{}", name.strip_suffix("Id").unwrap_or(name), usize::from(*self))
                }
            }
        )*
    }
}

id_newtypes! {
    TypeId unless "Too many types",
    FieldId unless "Too many fields",
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_usize() {
        let id = TypeId::from(41);
        assert_eq!(usize::from(id), 41);
        assert_eq!(format!("{id:?}"), "Type#41");
        assert_eq!(format!("{:?}", FieldId::from(0)), "Field#0");
    }

    #[test]
    #[should_panic(expected = "Too many types")]
    fn ids_are_bounded() {
        let _ = TypeId::from(MAX_ID + 1);
    }
}
