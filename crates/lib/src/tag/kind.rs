use std::rc::Rc;

use xot::Node;

use crate::types::{Atomic, StructDef};

/// What a handle resolved to, with the document nodes holding its data.
#[derive(Debug, Clone)]
pub(crate) enum TagKind {
    /// A single value stored in the `Value` attribute of `value`.
    Atomic { atomic: Atomic, value: Node },
    /// One bit of the integer stored on `value`.
    Bit { atomic: Atomic, value: Node, bit: u32 },
    /// Members are children of `container`.
    Structure { def: Rc<StructDef>, container: Node },
    Array(ArrayView),
    /// Aliases carry no data of their own.
    Alias,
}

/// An array, or the part of one left after fixing leading indices.
#[derive(Debug, Clone)]
pub(crate) struct ArrayView {
    pub(crate) element_type: String,
    /// Declared dimensions, outermost first.
    pub(crate) dims: Vec<usize>,
    /// Indices already fixed by partial indexing.
    pub(crate) prefix: Vec<usize>,
    /// Element holding the `Element` children.
    pub(crate) container: Node,
    /// Operand of the whole array.
    pub(crate) operand: String,
    /// Only top-level tags can change shape.
    pub(crate) resizable: bool,
}

impl ArrayView {
    /// Dimensions not yet fixed by the prefix.
    pub(crate) fn remaining(&self) -> &[usize] {
        &self.dims[self.prefix.len()..]
    }
}
