use serde::ser::SerializeSeq;

/// Location of a value in the response, as reported in the `path` of a GraphQL error.
///
/// Cloning is cheap, child paths share their prefix with the parent.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct ResponsePath(im::Vector<ResponsePathSegment>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponsePathSegment {
    Field(String),
    Index(usize),
}

impl ResponsePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn child(&self, segment: impl Into<ResponsePathSegment>) -> ResponsePath {
        let mut path = self.0.clone();
        path.push_back(segment.into());
        ResponsePath(path)
    }

    /// `segment` followed by this path.
    pub fn prepend(&self, segment: impl Into<ResponsePathSegment>) -> ResponsePath {
        let mut path = self.0.clone();
        path.push_front(segment.into());
        ResponsePath(path)
    }

    pub fn join(&self, other: &ResponsePath) -> ResponsePath {
        let mut path = self.0.clone();
        path.append(other.0.clone());
        ResponsePath(path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResponsePathSegment> {
        self.0.iter()
    }
}

impl<S: Into<ResponsePathSegment>> FromIterator<S> for ResponsePath {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        ResponsePath(iter.into_iter().map(Into::into).collect())
    }
}

impl From<&str> for ResponsePathSegment {
    fn from(value: &str) -> Self {
        ResponsePathSegment::Field(value.to_string())
    }
}

impl From<String> for ResponsePathSegment {
    fn from(value: String) -> Self {
        ResponsePathSegment::Field(value)
    }
}

impl From<usize> for ResponsePathSegment {
    fn from(value: usize) -> Self {
        ResponsePathSegment::Index(value)
    }
}

impl std::fmt::Display for ResponsePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            match segment {
                ResponsePathSegment::Field(name) => write!(f, "{name}")?,
                ResponsePathSegment::Index(index) => write!(f, "{index}")?,
            }
        }
        Ok(())
    }
}

impl serde::Serialize for ResponsePath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for segment in &self.0 {
            match segment {
                ResponsePathSegment::Field(name) => seq.serialize_element(name)?,
                ResponsePathSegment::Index(index) => seq.serialize_element(index)?,
            }
        }
        seq.end()
    }
}
