//!
//! l5x: typed, round-trippable access to Logix project exports (`.L5X`).
//! This library reads a project export into memory, exposes controller and
//! program tags, modules and ports through typed handles, and writes the
//! edited document back out in a form the vendor tool will import.
//!
//! ## Core Concepts
//!
//! * **Project (`project::Project`)**: Owns the loaded document. Everything else is a view into it.
//! * **Tags (`tag::Tag`)**: Handles onto a tag or any addressable part of one (structure member,
//!   array element, sub-array, integer bit). A handle resolves its data type once, lazily, and
//!   then exposes one uniform interface:
//!     * value get/set with type-checked coercion ([`Value`]),
//!     * descriptions in the session's active language,
//!     * array shape and resize,
//!     * alias retargeting and consumed-tag properties.
//! * **Data types (`types`)**: Atomic types, built-in composites such as `TIMER`, and user-defined
//!   structures declared in the document.
//! * **Modules (`module::Module`)**: I/O modules and their ports, including safety network numbers
//!   and NAT addresses.
//! * **Document (`document::Document`)**: The XML tree adapter. Untouched markup is written back
//!   as it was read.
//!
//! ```
//! use l5x::{Project, Value};
//!
//! let project = Project::parse(
//!     r#"<RSLogix5000Content><Controller Name="plc"><Tags>
//!     <Tag Name="count" TagType="Base" DataType="DINT">
//!     <Data Format="Decorated"><DataValue DataType="DINT" Radix="Decimal" Value="0"/></Data>
//!     </Tag></Tags></Controller></RSLogix5000Content>"#,
//! )?;
//!
//! let count = project.controller().tags().get("count")?;
//! count.set_value(42)?;
//! count.bit(0)?.set_description(Some("odd flag"))?;
//! assert_eq!(count.value()?, Value::Int(42));
//! # Ok::<(), l5x::Error>(())
//! ```

pub mod config;
pub mod document;
pub mod module;
pub mod project;
mod radix;
mod session;
pub mod tag;
pub mod types;
pub mod value;

pub use config::ProjectConfig;
pub use module::{Module, Modules, Port, Ports};
pub use project::{Controller, Program, Programs, Project};
pub use tag::{Selector, Tag, Tags};
pub use types::Atomic;
pub use value::Value;

/// Result type used throughout the l5x library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the l5x library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured document errors from the document module
    #[error(transparent)]
    Document(document::DocumentError),

    /// Structured tag errors from the tag module
    #[error(transparent)]
    Tag(tag::TagError),

    /// Structured module errors from the module module
    #[error(transparent)]
    Module(module::ModuleError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Document(_) => "document",
            Error::Tag(_) => "tag",
            Error::Module(_) => "module",
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error indicates a named item was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Tag(tag_err) => tag_err.is_not_found(),
            Error::Module(module_err) => module_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if a data type name could not be resolved.
    pub fn is_unresolved_type(&self) -> bool {
        match self {
            Error::Tag(tag_err) => tag_err.is_unresolved_type(),
            _ => false,
        }
    }

    /// Check if a value's kind disagreed with the target's data type.
    pub fn is_type_mismatch(&self) -> bool {
        match self {
            Error::Tag(tag_err) => tag_err.is_type_mismatch(),
            _ => false,
        }
    }

    /// Check if a value was correctly typed but outside its domain.
    pub fn is_invalid_value(&self) -> bool {
        match self {
            Error::Tag(tag_err) => tag_err.is_invalid_value(),
            Error::Module(module_err) => module_err.is_invalid_value(),
            _ => false,
        }
    }

    /// Check if an array or bit index was outside the declared bounds.
    pub fn is_index_out_of_range(&self) -> bool {
        match self {
            Error::Tag(tag_err) => tag_err.is_index_out_of_range(),
            _ => false,
        }
    }

    /// Check if a composite value did not match the declared layout.
    pub fn is_shape_mismatch(&self) -> bool {
        match self {
            Error::Tag(tag_err) => tag_err.is_shape_mismatch(),
            _ => false,
        }
    }

    /// Check if the operation is not available for the target.
    pub fn is_unsupported_operation(&self) -> bool {
        match self {
            Error::Tag(tag_err) => tag_err.is_unsupported_operation(),
            Error::Module(module_err) => module_err.is_unsupported_operation(),
            _ => false,
        }
    }

    /// Check if this error is document-related (parse, validation, write).
    pub fn is_document_error(&self) -> bool {
        matches!(self, Error::Document(_))
    }

    /// Check if the loaded file was not a project export.
    pub fn is_invalid_file(&self) -> bool {
        match self {
            Error::Document(doc_err) => doc_err.is_invalid_file(),
            _ => false,
        }
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        matches!(self, Error::Io(_))
    }
}
