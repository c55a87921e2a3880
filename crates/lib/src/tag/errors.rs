//! Error types for tag access.
//!
//! Every failure of a tag operation (type resolution, value coercion,
//! indexing, shape changes, lookups) is reported through [`TagError`]. The
//! `tag` field of each variant is the full operand path of the target, such as
//! `Timers[2].PRE`.

use thiserror::Error;

/// Errors that can occur while reading or editing tags.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Existing variants will not be removed in minor versions
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum TagError {
    /// A data type name matched no atomic, built-in or user-defined type.
    #[error("Unresolved data type '{data_type}'")]
    UnresolvedType {
        /// The name that failed to resolve
        data_type: String,
    },

    /// A value of the wrong kind was given for the target's data type.
    #[error("Type mismatch for {tag}: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Operand path of the target
        tag: String,
        /// What the target accepts
        expected: String,
        /// What was supplied
        actual: String,
    },

    /// A correctly typed value outside the accepted domain.
    #[error("Invalid value for {tag}: {reason}")]
    InvalidValue {
        /// Operand path of the target
        tag: String,
        /// Why the value was rejected
        reason: String,
    },

    /// An array or bit index beyond the declared bounds.
    #[error("Index {index} out of range for {tag} (length {len})")]
    IndexOutOfRange {
        /// Operand path of the target
        tag: String,
        /// The offending index
        index: usize,
        /// Number of valid positions
        len: usize,
    },

    /// A composite value or index list did not match the declared layout.
    #[error("Shape mismatch for {tag}: expected {expected}, got {actual}")]
    ShapeMismatch {
        /// Operand path of the target
        tag: String,
        /// The declared layout
        expected: String,
        /// The supplied layout
        actual: String,
    },

    /// The operation is not available for this kind of target.
    #[error("Cannot {operation} {tag}: {reason}")]
    UnsupportedOperation {
        /// Operand path of the target
        tag: String,
        /// The attempted operation
        operation: String,
        /// Why it is unavailable
        reason: String,
    },

    /// No tag with the given name exists in the scope.
    #[error("Tag '{name}' not found in {scope}")]
    TagNotFound {
        /// Scope that was searched
        scope: String,
        /// Requested tag name
        name: String,
    },

    /// A structure has no member with the given name.
    #[error("{tag} has no member '{member}'")]
    MemberNotFound {
        /// Operand path of the structure
        tag: String,
        /// Requested member name
        member: String,
    },

    /// No program with the given name exists.
    #[error("Program '{name}' not found")]
    ProgramNotFound {
        /// Requested program name
        name: String,
    },

    /// The document does not hold the data the tag's type requires.
    #[error("Malformed data for {tag}: {reason}")]
    MalformedData {
        /// Operand path of the target
        tag: String,
        /// What was missing or unreadable
        reason: String,
    },

    /// The underlying document rejected an edit.
    #[error(transparent)]
    Document(#[from] crate::document::DocumentError),
}

impl TagError {
    /// Check if this error indicates a named item was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TagError::TagNotFound { .. }
                | TagError::MemberNotFound { .. }
                | TagError::ProgramNotFound { .. }
        )
    }

    pub fn is_unresolved_type(&self) -> bool {
        matches!(self, TagError::UnresolvedType { .. })
    }

    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, TagError::TypeMismatch { .. })
    }

    pub fn is_invalid_value(&self) -> bool {
        matches!(self, TagError::InvalidValue { .. })
    }

    pub fn is_index_out_of_range(&self) -> bool {
        matches!(self, TagError::IndexOutOfRange { .. })
    }

    pub fn is_shape_mismatch(&self) -> bool {
        matches!(self, TagError::ShapeMismatch { .. })
    }

    pub fn is_unsupported_operation(&self) -> bool {
        matches!(self, TagError::UnsupportedOperation { .. })
    }

    /// Check if the document content itself is at fault.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            TagError::MalformedData { .. } | TagError::UnresolvedType { .. }
        )
    }

    /// Operand path of the target, when the error is about one.
    pub fn tag(&self) -> Option<&str> {
        match self {
            TagError::TypeMismatch { tag, .. }
            | TagError::InvalidValue { tag, .. }
            | TagError::IndexOutOfRange { tag, .. }
            | TagError::ShapeMismatch { tag, .. }
            | TagError::UnsupportedOperation { tag, .. }
            | TagError::MemberNotFound { tag, .. }
            | TagError::MalformedData { tag, .. } => Some(tag),
            _ => None,
        }
    }
}

// Conversion from TagError to the main Error type
impl From<TagError> for crate::Error {
    fn from(err: TagError) -> Self {
        match err {
            TagError::Document(doc_err) => crate::Error::Document(doc_err),
            other => crate::Error::Tag(other),
        }
    }
}
