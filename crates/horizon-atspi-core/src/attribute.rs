//! Object attributes (name/value pairs).

use std::fmt;

/// A single object attribute.
///
/// A missing value means "the key is present" when used as a match
/// criterion, and "declared without a value" when reported by an object.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attribute {
    pub name: String,
    pub value: Option<String>,
}

impl Attribute {
    /// Create an attribute with a value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    /// Create an attribute that only names a key.
    pub fn key(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    /// Parse the `name:value` form used on the wire.
    ///
    /// One space after the colon is skipped. Text without a colon is a bare key.
    pub fn parse(text: &str) -> Self {
        match text.split_once(':') {
            Some((name, value)) => {
                let value = value.strip_prefix(' ').unwrap_or(value);
                Self::new(name, value)
            }
            None => Self::key(text),
        }
    }

    /// Whether this attribute, used as a criterion, is satisfied by `actual`.
    ///
    /// Names and values compare ignoring ASCII case. A criterion without a
    /// value is satisfied by any value.
    pub fn matches(&self, actual: &Attribute) -> bool {
        if !self.name.eq_ignore_ascii_case(&actual.name) {
            return false;
        }
        match (&self.value, &actual.value) {
            (None, _) => true,
            (Some(wanted), Some(got)) => wanted.eq_ignore_ascii_case(got),
            (Some(_), None) => false,
        }
    }

    /// Whether this criterion is satisfied by an object's attribute list.
    ///
    /// Only the first attribute with a matching name is consulted.
    pub fn satisfied_by(&self, attributes: &[Attribute]) -> bool {
        attributes
            .iter()
            .find(|attr| attr.name.eq_ignore_ascii_case(&self.name))
            .is_some_and(|attr| self.matches(attr))
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}:{}", self.name, value),
            None => f.write_str(&self.name),
        }
    }
}
