//! Tags.
//!
//! A [`Tag`] handle addresses a top-level tag or any part of one reachable by
//! indexing: a structure member, an array element or sub-array, or a single
//! bit of an integer. Every handle offers the same interface (value,
//! description, indexing) and resolves its data type once, the first time it
//! is needed.
//!
//! Handles are views into the shared project document; cloning one is cheap
//! and edits through any handle are visible to all others.

use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

use xot::Node;

use crate::Result;
use crate::document::Document;
use crate::session::Session;
use crate::types::{self, DataType};

mod alias;
mod array;
mod comment;
mod consumed;
mod errors;
mod kind;
mod scope;
mod value;

pub use errors::TagError;
pub use scope::Tags;

use kind::{ArrayView, TagKind};

/// How a sub-element of a tag is selected by [`Tag::get`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// A structure member name.
    Member(String),
    /// One index per array dimension (or fewer, for a sub-array), or a
    /// single bit number on an integer.
    Index(Vec<usize>),
}

impl From<&str> for Selector {
    fn from(name: &str) -> Self {
        Selector::Member(name.to_string())
    }
}

impl From<String> for Selector {
    fn from(name: String) -> Self {
        Selector::Member(name)
    }
}

impl From<usize> for Selector {
    fn from(index: usize) -> Self {
        Selector::Index(vec![index])
    }
}

impl From<Vec<usize>> for Selector {
    fn from(indices: Vec<usize>) -> Self {
        Selector::Index(indices)
    }
}

impl From<&[usize]> for Selector {
    fn from(indices: &[usize]) -> Self {
        Selector::Index(indices.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for Selector {
    fn from(indices: [usize; N]) -> Self {
        Selector::Index(indices.to_vec())
    }
}

/// How a handle was reached from its top-level tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    TopLevel,
    Member { dimension: usize },
    Element,
    SubArray,
    Bit,
}

/// A handle onto a tag or an addressable part of one.
#[derive(Clone)]
pub struct Tag {
    session: Rc<Session>,
    /// The `<Tag>` element owning descriptions and comments.
    root: Node,
    /// The element this handle addresses.
    node: Node,
    name: Rc<str>,
    data_type: String,
    /// Comment operand relative to the top-level tag, empty for the tag itself.
    operand: String,
    origin: Origin,
    kind: OnceCell<TagKind>,
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tag")
            .field("path", &self.path())
            .field("data_type", &self.data_type)
            .finish_non_exhaustive()
    }
}

impl Tag {
    pub(crate) fn top_level(session: Rc<Session>, doc: &Document, node: Node) -> Self {
        let name: Rc<str> = doc.attribute(node, "Name").unwrap_or_default().into();
        let data_type = doc.attribute(node, "DataType").unwrap_or_default().to_string();
        Self {
            session,
            root: node,
            node,
            name,
            data_type,
            operand: String::new(),
            origin: Origin::TopLevel,
            kind: OnceCell::new(),
        }
    }

    fn derive(
        &self,
        node: Node,
        data_type: String,
        operand: String,
        origin: Origin,
        kind: Option<TagKind>,
    ) -> Self {
        let cell = OnceCell::new();
        if let Some(kind) = kind {
            let _ = cell.set(kind);
        }
        Self {
            session: Rc::clone(&self.session),
            root: self.root,
            node,
            name: Rc::clone(&self.name),
            data_type,
            operand,
            origin,
            kind: cell,
        }
    }

    /// Name of the top-level tag this handle belongs to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Operand path below the top-level tag, such as `.PRE` or `[1,2]`.
    pub fn operand(&self) -> &str {
        &self.operand
    }

    /// Full path, such as `Timers[2].PRE`.
    pub fn path(&self) -> String {
        format!("{}{}", self.name, self.operand)
    }

    /// Data type name; empty for alias tags.
    pub fn data_type(&self) -> &str {
        &self.data_type
    }

    /// The top-level tag's `TagType`, usually `Base`, `Alias`, `Produced` or `Consumed`.
    pub fn tag_type(&self) -> Option<String> {
        self.session
            .doc()
            .attribute(self.root, "TagType")
            .map(str::to_string)
    }

    pub fn is_alias(&self) -> bool {
        self.session.doc().attribute(self.root, "TagType") == Some("Alias")
    }

    /// Selects a member, element, sub-array or bit.
    ///
    /// A name selects a structure member. Indices select an array element
    /// (one per dimension) or sub-array (fewer). A single index on a SINT,
    /// INT or DINT selects a bit.
    pub fn get(&self, selector: impl Into<Selector>) -> Result<Tag> {
        match selector.into() {
            Selector::Member(name) => self.member(&name),
            Selector::Index(indices) => match self.kind()? {
                TagKind::Array(_) => self.element(&indices),
                TagKind::Atomic { .. } if indices.len() == 1 => {
                    self.bit(u32::try_from(indices[0]).unwrap_or(u32::MAX))
                }
                _ => Err(self
                    .unsupported("index", "only arrays and integers are indexable")
                    .into()),
            },
        }
    }

    /// Handle onto a structure member.
    pub fn member(&self, name: &str) -> Result<Tag> {
        Ok(self.member_handle(name)?)
    }

    /// Handle onto one bit of a SINT, INT or DINT.
    pub fn bit(&self, bit: u32) -> Result<Tag> {
        Ok(self.bit_handle(bit)?)
    }

    /// Member names of a structure, in declared order.
    pub fn names(&self) -> Result<Vec<String>> {
        match self.kind()? {
            TagKind::Structure { def, .. } => Ok(def.member_names()),
            _ => Err(self.unsupported("list members of", "not a structure").into()),
        }
    }

    fn member_handle(&self, name: &str) -> std::result::Result<Tag, TagError> {
        let TagKind::Structure { def, container } = self.kind()? else {
            return Err(self.unsupported("access a member of", "not a structure"));
        };
        let member = def.member(name).ok_or_else(|| TagError::MemberNotFound {
            tag: self.path(),
            member: name.to_string(),
        })?;

        let doc = self.session.doc();
        let node = doc
            .children(container)
            .into_iter()
            .find(|child| {
                doc.attribute(*child, "Name")
                    .is_some_and(|n| n.eq_ignore_ascii_case(&member.name))
            })
            .ok_or_else(|| self.malformed(format!("no decorated data for member {}", member.name)))?;
        let data_type = doc
            .attribute(node, "DataType")
            .unwrap_or(&member.data_type)
            .to_string();

        Ok(self.derive(
            node,
            data_type,
            format!("{}.{}", self.operand, member.name.to_uppercase()),
            Origin::Member {
                dimension: member.dimension,
            },
            None,
        ))
    }

    fn bit_handle(&self, bit: u32) -> std::result::Result<Tag, TagError> {
        let TagKind::Atomic { atomic, value } = self.kind()? else {
            return Err(self.unsupported("address a bit of", "not an integer"));
        };
        if !atomic.is_integer() {
            return Err(self.unsupported(
                "address a bit of",
                "bits are only addressable on SINT, INT and DINT",
            ));
        }
        if bit >= atomic.bits() {
            return Err(TagError::IndexOutOfRange {
                tag: self.path(),
                index: bit as usize,
                len: atomic.bits() as usize,
            });
        }
        Ok(self.derive(
            value,
            "BOOL".to_string(),
            format!("{}.{}", self.operand, bit),
            Origin::Bit,
            Some(TagKind::Bit { atomic, value, bit }),
        ))
    }

    /// Resolved kind of this handle, computed on first use.
    ///
    /// Resizable arrays are not cached since their dimensions can change.
    pub(crate) fn kind(&self) -> std::result::Result<TagKind, TagError> {
        if let Some(kind) = self.kind.get() {
            return Ok(kind.clone());
        }
        let kind = self.resolve_kind()?;
        if !matches!(&kind, TagKind::Array(view) if view.resizable) {
            let _ = self.kind.set(kind.clone());
        }
        Ok(kind)
    }

    fn resolve_kind(&self) -> std::result::Result<TagKind, TagError> {
        let doc = self.session.doc();
        match self.origin {
            Origin::TopLevel => {
                if doc.attribute(self.root, "TagType") == Some("Alias") {
                    return Ok(TagKind::Alias);
                }
                let data = doc
                    .find_with_attribute(self.root, "Data", "Format", "Decorated")
                    .ok_or_else(|| self.malformed("no decorated data"))?;
                if let Some(dims) = doc.attribute(self.root, "Dimensions") {
                    let dims = array::parse_dimensions(dims)
                        .ok_or_else(|| self.malformed(format!("unreadable dimensions '{dims}'")))?;
                    let container = doc
                        .find(data, "Array")
                        .ok_or_else(|| self.malformed("no decorated array"))?;
                    return Ok(TagKind::Array(ArrayView {
                        element_type: self.data_type.clone(),
                        dims,
                        prefix: Vec::new(),
                        container,
                        operand: self.operand.clone(),
                        resizable: true,
                    }));
                }
                self.scalar_kind(&doc, data)
            }
            Origin::Member { dimension } => {
                if dimension > 0 || doc.is_named(self.node, "ArrayMember") {
                    let dims = doc
                        .attribute(self.node, "Dimensions")
                        .and_then(array::parse_dimensions)
                        .unwrap_or_else(|| vec![dimension]);
                    return Ok(TagKind::Array(ArrayView {
                        element_type: self.data_type.clone(),
                        dims,
                        prefix: Vec::new(),
                        container: self.node,
                        operand: self.operand.clone(),
                        resizable: false,
                    }));
                }
                self.scalar_kind(&doc, self.node)
            }
            Origin::Element => self.scalar_kind(&doc, self.node),
            Origin::SubArray | Origin::Bit => {
                Err(self.malformed("handle was created without a resolved kind"))
            }
        }
    }

    /// Resolves a non-array value held by `holder`: the decorated `Data`
    /// element, an array `Element`, or a member element.
    fn scalar_kind(&self, doc: &Document, holder: Node) -> std::result::Result<TagKind, TagError> {
        let structure = if doc.is_named(holder, "StructureMember") {
            Some(holder)
        } else {
            doc.find(holder, "Structure")
        };
        match types::resolve(doc, self.session.controller, &self.data_type, structure)? {
            DataType::Atomic(atomic) => {
                let value = if doc.is_named(holder, "Data") {
                    doc.find(holder, "DataValue")
                        .ok_or_else(|| self.malformed("no decorated value"))?
                } else {
                    holder
                };
                Ok(TagKind::Atomic { atomic, value })
            }
            DataType::Structure(def) => {
                let container =
                    structure.ok_or_else(|| self.malformed("no decorated structure"))?;
                Ok(TagKind::Structure { def, container })
            }
        }
    }

    pub(crate) fn unsupported(&self, operation: &str, reason: &str) -> TagError {
        TagError::UnsupportedOperation {
            tag: self.path(),
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn malformed(&self, reason: impl Into<String>) -> TagError {
        TagError::MalformedData {
            tag: self.path(),
            reason: reason.into(),
        }
    }

    fn is_top_level(&self) -> bool {
        self.origin == Origin::TopLevel
    }
}
