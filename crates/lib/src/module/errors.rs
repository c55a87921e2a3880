//! Error types for modules and ports.

use thiserror::Error;

/// Errors that can occur while accessing I/O modules and their ports.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Existing variants will not be removed in minor versions
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ModuleError {
    /// No module with the given name exists.
    #[error("Module '{name}' not found")]
    ModuleNotFound {
        /// Requested module name
        name: String,
    },

    /// The module has no port with the given id.
    #[error("Module '{module}' has no port {id}")]
    PortNotFound {
        /// Module that was searched
        module: String,
        /// Requested port id
        id: u32,
    },

    /// A safety network number that is not hexadecimal or exceeds 48 bits.
    #[error("Invalid safety network number '{value}': {reason}")]
    InvalidSafetyNetworkNumber {
        /// The rejected input
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// The module or port carries no safety network number.
    #[error("{target} does not support a safety network number")]
    SafetyNetworkUnsupported {
        /// Description of the module or port
        target: String,
    },

    /// A NAT address was set on a port without NAT configured.
    #[error("Port {port} of module '{module}' is not configured for NAT")]
    NatNotConfigured {
        /// Module owning the port
        module: String,
        /// Port id
        port: u32,
    },
}

impl ModuleError {
    /// Check if this error indicates a module or port was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ModuleError::ModuleNotFound { .. } | ModuleError::PortNotFound { .. }
        )
    }

    pub fn is_invalid_value(&self) -> bool {
        matches!(self, ModuleError::InvalidSafetyNetworkNumber { .. })
    }

    pub fn is_unsupported_operation(&self) -> bool {
        matches!(
            self,
            ModuleError::SafetyNetworkUnsupported { .. } | ModuleError::NatNotConfigured { .. }
        )
    }
}

// Conversion from ModuleError to the main Error type
impl From<ModuleError> for crate::Error {
    fn from(err: ModuleError) -> Self {
        crate::Error::Module(err)
    }
}
