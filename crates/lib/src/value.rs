//! Tag values.
//!
//! [`Value`] is the shape-preserving representation of what a tag (or any part
//! of one) holds: integers for BOOL/SINT/INT/DINT and bits, floats for REAL,
//! ordered member maps for structures and nested lists for arrays. Nested
//! lists follow declared dimension order, outermost first.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The value held by a tag or one of its parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// BOOL, SINT, INT, DINT or a single bit.
    Int(i64),
    /// REAL.
    Real(f64),
    /// An array, outermost declared dimension first.
    Array(Vec<Value>),
    /// A structure, keyed by member name.
    Structure(BTreeMap<String, Value>),
}

impl Value {
    /// Type name for Int variant
    pub const INT_TYPE: &'static str = "Int";
    /// Type name for Real variant
    pub const REAL_TYPE: &'static str = "Real";
    /// Type name for Array variant
    pub const ARRAY_TYPE: &'static str = "Array";
    /// Type name for Structure variant
    pub const STRUCTURE_TYPE: &'static str = "Structure";

    /// Returns a human-readable name for this value type
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => Self::INT_TYPE,
            Value::Real(_) => Self::REAL_TYPE,
            Value::Array(_) => Self::ARRAY_TYPE,
            Value::Structure(_) => Self::STRUCTURE_TYPE,
        }
    }

    /// Builds a structure value from `(member, value)` pairs.
    pub fn structure<K, V>(members: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Structure(
            members
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            Value::Real(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_structure(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Structure(members) => Some(members),
            _ => None,
        }
    }

    /// Looks up a structure member by name.
    pub fn get(&self, member: &str) -> Option<&Value> {
        self.as_structure()?.get(member)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Real(v) => write!(f, "{v:?}"),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Structure(members) => {
                write!(f, "{{")?;
                for (i, (name, item)) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{name}: {item}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::Int(v.into())
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Value::Int(v.into())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(members: BTreeMap<String, Value>) -> Self {
        Value::Structure(members)
    }
}
