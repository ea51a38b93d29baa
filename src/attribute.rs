/// A named feature of one token together with its value
///
/// Extractors emit lists of attributes per token; the trainer interns the
/// names into its attribute dictionary.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// Attribute name
    pub name: String,
    /// Value of the attribute
    pub value: f64,
}

/// All attributes of a single token
pub type Item = Vec<Attribute>;

impl Attribute {
    /// Create a new attribute with a name and value
    pub fn new<T: Into<String>>(name: T, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Create a binary attribute (value 1.0)
    pub fn flag<T: Into<String>>(name: T) -> Self {
        Self::new(name, 1.0)
    }
}

impl From<String> for Attribute {
    fn from(name: String) -> Self {
        Self::flag(name)
    }
}

impl From<&str> for Attribute {
    fn from(name: &str) -> Self {
        Self::flag(name)
    }
}

impl<S: Into<String>> From<(S, f64)> for Attribute {
    fn from((name, value): (S, f64)) -> Self {
        Self::new(name, value)
    }
}

impl<S: Into<String>> From<(S, bool)> for Attribute {
    /// Boolean features are encoded as 1.0 / 0.0 like CRFsuite's python bindings do.
    fn from((name, value): (S, bool)) -> Self {
        Self::new(name, if value { 1.0 } else { 0.0 })
    }
}
