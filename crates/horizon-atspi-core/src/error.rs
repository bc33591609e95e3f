//! Error types for the accessible object registry.

/// Result type alias for registry operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or editing an accessible tree.
///
/// Reading a tree through [`AccessibleTree`](crate::AccessibleTree) never
/// fails; these only surface from registry mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The object ID is invalid or has been destroyed.
    #[error("Invalid or destroyed object ID")]
    InvalidObjectId,

    /// Attempted to set an object as its own parent or ancestor.
    #[error("Cannot set an object as its own parent or ancestor")]
    CircularParentage,

    /// A child was inserted past the end of its new parent's child list.
    #[error("Child index {index} out of range for a parent with {count} children")]
    ChildIndexOutOfRange { index: usize, count: usize },
}

impl Error {
    /// Create a child index error.
    pub fn child_index_out_of_range(index: usize, count: usize) -> Self {
        Self::ChildIndexOutOfRange { index, count }
    }
}
