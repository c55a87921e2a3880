//! Array elements, sub-arrays and shape changes.
//!
//! Decorated arrays store their elements flat, in row-major order, each with
//! an `Index` attribute such as `[1,0,2]` listing one index per declared
//! dimension (outermost first). Shapes are reported in the reverse order, so
//! `shape()[0]` is the innermost dimension.

use std::fmt::Display;

use tracing::debug;
use xot::Node;

use super::kind::{ArrayView, TagKind};
use super::{Origin, Tag, TagError, comment, value};
use crate::Result;
use crate::document::{Document, Position};
use crate::radix;
use crate::types::{self, Atomic, DataType};

/// Nesting depth past which a type is taken to be self-referential.
const MAX_NESTING: usize = 16;

/// Largest element count a resize will create.
const MAX_ELEMENTS: usize = 2_000_000;

impl Tag {
    /// Handle onto an array element, or a sub-array when fewer indices than
    /// dimensions are given. Indices follow declared dimension order.
    pub fn element(&self, index: &[usize]) -> Result<Tag> {
        Ok(self.element_handle(index)?)
    }

    /// Dimensions of an array, innermost first.
    pub fn shape(&self) -> Result<Vec<usize>> {
        match self.kind()? {
            TagKind::Array(view) => Ok(view.remaining().iter().rev().copied().collect()),
            _ => Err(self.unsupported("get the shape of", "not an array").into()),
        }
    }

    /// Resizes a top-level array tag.
    ///
    /// `shape` lists 1 to 3 dimensions, innermost first, each at least 1.
    /// Every element is recreated with default values and comments on
    /// individual elements are removed.
    pub fn set_shape(&self, shape: &[usize]) -> Result<()> {
        Ok(self.resize(shape)?)
    }

    pub(crate) fn element_handle(&self, index: &[usize]) -> std::result::Result<Tag, TagError> {
        let TagKind::Array(view) = self.kind()? else {
            return Err(self.unsupported("index", "not an array"));
        };
        let remaining = view.remaining();
        if index.is_empty() || index.len() > remaining.len() {
            return Err(TagError::ShapeMismatch {
                tag: self.path(),
                expected: format!("1 to {} indices", remaining.len()),
                actual: format!("{} indices", index.len()),
            });
        }
        if let Some((&i, &len)) = index
            .iter()
            .zip(remaining)
            .find(|(i, len)| **i >= **len)
        {
            return Err(TagError::IndexOutOfRange {
                tag: self.path(),
                index: i,
                len,
            });
        }

        let mut full = view.prefix.clone();
        full.extend_from_slice(index);
        let operand = format!("{}{}", view.operand, index_key(&full));

        if full.len() < view.dims.len() {
            let node = view.container;
            let sub = ArrayView {
                prefix: full,
                resizable: false,
                ..view
            };
            return Ok(self.derive(
                node,
                self.data_type.clone(),
                operand,
                Origin::SubArray,
                Some(TagKind::Array(sub)),
            ));
        }

        let doc = self.session.doc();
        let key = index_key(&full);
        let node = locate_element(&doc, view.container, flat_index(&view.dims, &full), &key)
            .ok_or_else(|| self.malformed(format!("no decorated element {key}")))?;
        Ok(self.derive(node, view.element_type, operand, Origin::Element, None))
    }

    fn resize(&self, shape: &[usize]) -> std::result::Result<(), TagError> {
        let TagKind::Array(view) = self.kind()? else {
            return Err(self.unsupported("resize", "not an array"));
        };
        if !view.resizable {
            return Err(self.unsupported("resize", "only top-level array tags can change shape"));
        }
        if shape.is_empty() || shape.len() > 3 || shape.contains(&0) {
            return Err(TagError::InvalidValue {
                tag: self.path(),
                reason: format!("shape {shape:?} needs 1 to 3 dimensions, each at least 1"),
            });
        }
        let total = shape
            .iter()
            .try_fold(1usize, |acc, d| acc.checked_mul(*d))
            .filter(|total| *total <= MAX_ELEMENTS);
        if total.is_none() {
            return Err(TagError::InvalidValue {
                tag: self.path(),
                reason: format!("shape {shape:?} exceeds {MAX_ELEMENTS} elements"),
            });
        }
        let dims: Vec<usize> = shape.iter().rev().copied().collect();

        let (template, radix) = {
            let doc = self.session.doc();
            let sample = doc
                .find(view.container, "Element")
                .and_then(|element| doc.find(element, "Structure"));
            let template = Template::build(
                &doc,
                self.session.controller,
                &view.element_type,
                sample,
                0,
            )?;
            let radix = doc
                .attribute(view.container, "Radix")
                .map(str::to_string);
            (template, radix)
        };

        let mut doc = self.session.doc_mut();
        doc.clear_children(view.container)?;
        for index in row_major(&dims) {
            let element = doc.create_child(view.container, "Element", Position::Last)?;
            doc.set_attribute(element, "Index", index_key(&index));
            template.write_element(&mut doc, element, radix.as_deref())?;
        }
        doc.set_attribute(self.root, "Dimensions", join(&dims, " "));
        doc.set_attribute(view.container, "Dimensions", join(&dims, ","));
        comment::remove_comments(&mut doc, self.root, |operand| operand.starts_with('['))?;
        if self.session.config.strip_raw_data {
            value::strip_raw_data(&mut doc, self.root)?;
        }
        debug!(tag = %self.name, ?shape, "Resized array tag");
        Ok(())
    }
}

/// Default content for a freshly created element.
enum Template {
    Atomic(Atomic),
    Structure {
        data_type: String,
        members: Vec<MemberTemplate>,
    },
}

struct MemberTemplate {
    name: String,
    data_type: String,
    dimension: usize,
    template: Template,
}

impl Template {
    /// Resolves `data_type` all the way down. `sample` is an existing
    /// decorated structure of the same type, for types only known from data.
    fn build(
        doc: &Document,
        controller: Node,
        data_type: &str,
        sample: Option<Node>,
        depth: usize,
    ) -> std::result::Result<Self, TagError> {
        if depth > MAX_NESTING {
            return Err(TagError::UnresolvedType {
                data_type: data_type.to_string(),
            });
        }
        let def = match types::resolve(doc, controller, data_type, sample)? {
            DataType::Atomic(atomic) => return Ok(Template::Atomic(atomic)),
            DataType::Structure(def) => def,
        };
        let members = def
            .members
            .iter()
            .map(|member| -> std::result::Result<MemberTemplate, TagError> {
                let member_sample = sample
                    .and_then(|s| {
                        doc.children(s).into_iter().find(|child| {
                            doc.attribute(*child, "Name")
                                .is_some_and(|n| n.eq_ignore_ascii_case(&member.name))
                        })
                    })
                    .and_then(|node| {
                        if doc.is_named(node, "ArrayMember") {
                            doc.find(node, "Element")
                                .and_then(|element| doc.find(element, "Structure"))
                        } else if doc.is_named(node, "StructureMember") {
                            Some(node)
                        } else {
                            None
                        }
                    });
                Ok(MemberTemplate {
                    name: member.name.clone(),
                    data_type: member.data_type.clone(),
                    dimension: member.dimension,
                    template: Template::build(
                        doc,
                        controller,
                        &member.data_type,
                        member_sample,
                        depth + 1,
                    )?,
                })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Template::Structure {
            data_type: def.name.clone(),
            members,
        })
    }

    fn write_element(
        &self,
        doc: &mut Document,
        element: Node,
        radix: Option<&str>,
    ) -> std::result::Result<(), TagError> {
        match self {
            Template::Atomic(atomic) => {
                doc.set_attribute(element, "Value", default_text(*atomic, radix));
            }
            Template::Structure { data_type, members } => {
                let structure = doc.create_child(element, "Structure", Position::Last)?;
                doc.set_attribute(structure, "DataType", data_type.as_str());
                write_members(doc, structure, members)?;
            }
        }
        Ok(())
    }
}

fn write_members(
    doc: &mut Document,
    container: Node,
    members: &[MemberTemplate],
) -> std::result::Result<(), TagError> {
    for member in members {
        match (&member.template, member.dimension) {
            (Template::Atomic(atomic), 0) => {
                let node = doc.create_child(container, "DataValueMember", Position::Last)?;
                doc.set_attribute(node, "Name", member.name.as_str());
                doc.set_attribute(node, "DataType", member.data_type.as_str());
                if let Some(radix) = atomic.default_radix() {
                    doc.set_attribute(node, "Radix", radix);
                }
                doc.set_attribute(node, "Value", default_text(*atomic, atomic.default_radix()));
            }
            (Template::Structure { members: nested, .. }, 0) => {
                let node = doc.create_child(container, "StructureMember", Position::Last)?;
                doc.set_attribute(node, "Name", member.name.as_str());
                doc.set_attribute(node, "DataType", member.data_type.as_str());
                write_members(doc, node, nested)?;
            }
            (template, len) => {
                let node = doc.create_child(container, "ArrayMember", Position::Last)?;
                doc.set_attribute(node, "Name", member.name.as_str());
                doc.set_attribute(node, "DataType", member.data_type.as_str());
                doc.set_attribute(node, "Dimensions", len.to_string());
                let radix = match template {
                    Template::Atomic(atomic) => atomic.default_radix(),
                    Template::Structure { .. } => None,
                };
                if let Some(radix) = radix {
                    doc.set_attribute(node, "Radix", radix);
                }
                for i in 0..len {
                    let element = doc.create_child(node, "Element", Position::Last)?;
                    doc.set_attribute(element, "Index", index_key(&[i]));
                    template.write_element(doc, element, radix)?;
                }
            }
        }
    }
    Ok(())
}

fn default_text(atomic: Atomic, radix: Option<&str>) -> String {
    match atomic {
        Atomic::Real => radix::format_real(0.0, radix),
        _ => radix::format_integer(0, atomic, radix),
    }
}

/// Parses a `Dimensions` attribute, either `"2 3"` or `"2,3"`.
pub(crate) fn parse_dimensions(text: &str) -> Option<Vec<usize>> {
    let dims = text
        .split([' ', ','])
        .filter(|part| !part.trim().is_empty())
        .map(|part| part.trim().parse().ok())
        .collect::<Option<Vec<usize>>>()?;
    (!dims.is_empty()).then_some(dims)
}

/// Element `Index` attribute for a full index list, e.g. `[1,2]`.
pub(crate) fn index_key(index: &[usize]) -> String {
    format!("[{}]", join(index, ","))
}

/// Position of `index` in the row-major element list.
fn flat_index(dims: &[usize], index: &[usize]) -> usize {
    dims.iter().zip(index).fold(0, |acc, (d, i)| acc * d + i)
}

/// Every full index of an array with `dims`, in row-major order.
fn row_major(dims: &[usize]) -> Vec<Vec<usize>> {
    let total: usize = dims.iter().product();
    (0..total)
        .map(|mut flat| {
            let mut index = vec![0; dims.len()];
            for (slot, d) in index.iter_mut().zip(dims).rev() {
                *slot = flat % d;
                flat /= d;
            }
            index
        })
        .collect()
}

fn locate_element(doc: &Document, container: Node, flat: usize, key: &str) -> Option<Node> {
    let same = |node: Node| {
        doc.attribute(node, "Index").is_some_and(|index| {
            index
                .chars()
                .filter(|c| !c.is_whitespace())
                .eq(key.chars())
        })
    };
    let elements = doc.find_all(container, "Element");
    if let Some(&node) = elements.get(flat) {
        if same(node) {
            return Some(node);
        }
    }
    elements.into_iter().find(|node| same(*node))
}

fn join<T: Display>(items: &[T], sep: &str) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(sep)
}
