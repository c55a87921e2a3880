//! Error types for the document adapter.
//!
//! Parse, validation and serialization failures of the underlying XML tree
//! surface through [`DocumentError`].

use thiserror::Error;

/// Errors that can occur while reading, editing or writing the XML document.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Existing variants will not be removed in minor versions
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The input was not well-formed XML.
    #[error("Failed to parse XML: {reason}")]
    ParseFailed {
        /// Parser message
        reason: String,
    },

    /// The XML was well-formed but is not a project export.
    #[error("Not an L5X project export: {reason}")]
    InvalidFile {
        /// What was missing or unexpected
        reason: String,
    },

    /// The tree could not be serialized back to text.
    #[error("Failed to serialize document: {reason}")]
    SerializationFailed {
        /// Serializer message
        reason: String,
    },

    /// A structural edit of the tree was rejected.
    #[error("Tree operation '{operation}' failed: {reason}")]
    TreeOperationFailed {
        /// The edit being attempted
        operation: String,
        /// Underlying message
        reason: String,
    },
}

impl DocumentError {
    /// Check if the input could not be parsed at all.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, DocumentError::ParseFailed { .. })
    }

    /// Check if the input parsed but is not a project export.
    pub fn is_invalid_file(&self) -> bool {
        matches!(self, DocumentError::InvalidFile { .. })
    }

    /// Check if this error came from editing or writing the tree.
    pub fn is_write_error(&self) -> bool {
        matches!(
            self,
            DocumentError::SerializationFailed { .. } | DocumentError::TreeOperationFailed { .. }
        )
    }

    pub(crate) fn tree(operation: &str, err: impl std::fmt::Display) -> Self {
        DocumentError::TreeOperationFailed {
            operation: operation.to_string(),
            reason: err.to_string(),
        }
    }
}

// Conversion from DocumentError to the main Error type
impl From<DocumentError> for crate::Error {
    fn from(err: DocumentError) -> Self {
        crate::Error::Document(err)
    }
}
