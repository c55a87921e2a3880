use serde::{Deserialize, Serialize};
use std::fmt;

/// The atomic data types a decorated value can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Atomic {
    Bool,
    Sint,
    Int,
    Dint,
    Real,
}

impl Atomic {
    /// Resolves a data type name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        [
            Atomic::Bool,
            Atomic::Sint,
            Atomic::Int,
            Atomic::Dint,
            Atomic::Real,
        ]
        .into_iter()
        .find(|atomic| atomic.name().eq_ignore_ascii_case(name))
    }

    /// Name as written in the document.
    pub fn name(self) -> &'static str {
        match self {
            Atomic::Bool => "BOOL",
            Atomic::Sint => "SINT",
            Atomic::Int => "INT",
            Atomic::Dint => "DINT",
            Atomic::Real => "REAL",
        }
    }

    /// Storage width in bits.
    pub fn bits(self) -> u32 {
        match self {
            Atomic::Bool => 1,
            Atomic::Sint => 8,
            Atomic::Int => 16,
            Atomic::Dint | Atomic::Real => 32,
        }
    }

    /// SINT, INT and DINT: the types whose bits can be addressed.
    pub fn is_integer(self) -> bool {
        matches!(self, Atomic::Sint | Atomic::Int | Atomic::Dint)
    }

    /// Inclusive value range, or None for REAL.
    pub fn range(self) -> Option<(i64, i64)> {
        match self {
            Atomic::Bool => Some((0, 1)),
            Atomic::Real => None,
            _ => {
                let bits = self.bits();
                Some((-(1i64 << (bits - 1)), (1i64 << (bits - 1)) - 1))
            }
        }
    }

    /// Radix a freshly created value of this type is written in.
    pub fn default_radix(self) -> Option<&'static str> {
        match self {
            Atomic::Bool => None,
            Atomic::Real => Some("Float"),
            _ => Some("Decimal"),
        }
    }
}

impl fmt::Display for Atomic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
