//! Data types.
//!
//! A tag's `DataType` name resolves, in order, to an [`Atomic`] type, a
//! built-in composite (`TIMER`, `COUNTER`, `CONTROL`), a user-defined type
//! declared under `Controller/DataTypes`, or, failing those, a member list
//! derived from the tag's own decorated data. Names match ignoring case.

use std::rc::Rc;

mod atomic;
pub(crate) mod builtin;
mod resolver;

pub use atomic::Atomic;
pub(crate) use resolver::{derive_from_decorated, resolve};

/// A structure type: an ordered list of named members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDef {
    pub name: String,
    pub members: Vec<MemberDef>,
}

impl StructDef {
    /// Finds a member by name, ignoring case.
    pub fn member(&self, name: &str) -> Option<&MemberDef> {
        self.members
            .iter()
            .find(|member| member.name.eq_ignore_ascii_case(name))
    }

    /// Member names in declaration order.
    pub fn member_names(&self) -> Vec<String> {
        self.members.iter().map(|m| m.name.clone()).collect()
    }
}

/// One member of a structure type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDef {
    pub name: String,
    pub data_type: String,
    /// Array length, or 0 for a scalar member.
    pub dimension: usize,
}

/// A resolved data type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    Atomic(Atomic),
    Structure(Rc<StructDef>),
}
