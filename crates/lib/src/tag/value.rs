//! Value reads and writes.
//!
//! Writes are validated in full before the document is touched: a `plan`
//! pass walks the new value alongside the tag's resolved layout and collects
//! attribute updates, and only if every part is acceptable are they applied.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;
use xot::Node;

use super::kind::TagKind;
use super::{Tag, TagError};
use crate::Result;
use crate::document::{Document, DocumentError};
use crate::radix;
use crate::types::Atomic;
use crate::value::Value;

/// Pending `Value` attribute updates.
type Writes = Vec<(Node, String)>;

impl Tag {
    /// Current value.
    ///
    /// Structures read as member maps and arrays as nested lists, outermost
    /// declared dimension first.
    pub fn value(&self) -> Result<Value> {
        Ok(self.read_value()?)
    }

    /// Replaces the value. Nothing is written unless the whole value is valid.
    pub fn set_value(&self, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        let mut writes = Writes::new();
        self.plan(&value, &mut writes)?;

        let mut doc = self.session.doc_mut();
        for (node, text) in &writes {
            doc.set_attribute(*node, "Value", text.as_str());
        }
        if self.session.config.strip_raw_data {
            strip_raw_data(&mut doc, self.root)?;
        }
        debug!(tag = %self.path(), writes = writes.len(), "Committed value");
        Ok(())
    }

    pub(crate) fn read_value(&self) -> std::result::Result<Value, TagError> {
        match self.kind()? {
            TagKind::Atomic { atomic, value } => self.read_atomic(atomic, value),
            TagKind::Bit { atomic, value, bit } => {
                let raw = self.read_integer(atomic, value)?;
                Ok(Value::Int((raw >> bit) & 1))
            }
            TagKind::Structure { def, .. } => {
                let mut members = BTreeMap::new();
                for member in &def.members {
                    let value = self.member_handle(&member.name)?.read_value()?;
                    members.insert(member.name.clone(), value);
                }
                Ok(Value::Structure(members))
            }
            TagKind::Array(view) => {
                let len = view.remaining().first().copied().unwrap_or(0);
                (0..len)
                    .map(|i| self.element_handle(&[i])?.read_value())
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map(Value::Array)
            }
            TagKind::Alias => Err(self.unsupported("read", "alias tags carry no data")),
        }
    }

    fn plan(&self, value: &Value, writes: &mut Writes) -> std::result::Result<(), TagError> {
        match self.kind()? {
            TagKind::Atomic { atomic, value: node } => {
                let text = self.coerce(atomic, node, value)?;
                writes.push((node, text));
            }
            TagKind::Bit {
                atomic,
                value: node,
                bit,
            } => {
                let set = match value {
                    Value::Int(0) => false,
                    Value::Int(1) => true,
                    other => return Err(self.mismatch("0 or 1", other)),
                };
                let current = self.read_integer(atomic, node)?;
                let updated = if set {
                    current | (1 << bit)
                } else {
                    current & !(1 << bit)
                };
                let radix = radix_of(&self.session.doc(), node);
                writes.push((
                    node,
                    radix::format_integer(
                        radix::wrap(updated, atomic),
                        atomic,
                        radix.as_deref(),
                    ),
                ));
            }
            TagKind::Structure { def, .. } => {
                let Value::Structure(members) = value else {
                    return Err(self.mismatch(&def.name, value));
                };
                let matched: BTreeSet<&str> = members
                    .keys()
                    .filter_map(|key| def.member(key).map(|m| m.name.as_str()))
                    .collect();
                if members.len() != def.members.len() || matched.len() != def.members.len() {
                    return Err(TagError::ShapeMismatch {
                        tag: self.path(),
                        expected: format!("members {}", def.member_names().join(", ")),
                        actual: format!(
                            "members {}",
                            members.keys().cloned().collect::<Vec<_>>().join(", ")
                        ),
                    });
                }
                for member in &def.members {
                    let item = members
                        .iter()
                        .find(|(key, _)| key.eq_ignore_ascii_case(&member.name))
                        .map(|(_, item)| item);
                    if let Some(item) = item {
                        self.member_handle(&member.name)?.plan(item, writes)?;
                    }
                }
            }
            TagKind::Array(view) => {
                let Value::Array(items) = value else {
                    return Err(self.mismatch("array", value));
                };
                let len = view.remaining().first().copied().unwrap_or(0);
                if items.len() != len {
                    return Err(TagError::ShapeMismatch {
                        tag: self.path(),
                        expected: format!("{len} items"),
                        actual: format!("{} items", items.len()),
                    });
                }
                for (i, item) in items.iter().enumerate() {
                    self.element_handle(&[i])?.plan(item, writes)?;
                }
            }
            TagKind::Alias => return Err(self.unsupported("write", "alias tags carry no data")),
        }
        Ok(())
    }

    /// Formats `value` for an atomic of type `atomic` stored on `node`.
    fn coerce(
        &self,
        atomic: Atomic,
        node: Node,
        value: &Value,
    ) -> std::result::Result<String, TagError> {
        let radix = radix_of(&self.session.doc(), node);
        match (atomic, value) {
            (Atomic::Real, Value::Real(v)) => {
                if !v.is_finite() {
                    return Err(TagError::InvalidValue {
                        tag: self.path(),
                        reason: format!("{v} is not a finite REAL"),
                    });
                }
                if v.abs() > f64::from(f32::MAX) {
                    return Err(TagError::InvalidValue {
                        tag: self.path(),
                        reason: format!("{v} is outside the REAL range"),
                    });
                }
                Ok(radix::format_real(*v, radix.as_deref()))
            }
            (Atomic::Real, other) => Err(self.mismatch("REAL", other)),
            (_, Value::Int(v)) => match atomic.range() {
                Some((min, max)) if (min..=max).contains(v) => {
                    Ok(radix::format_integer(*v, atomic, radix.as_deref()))
                }
                Some((min, max)) => Err(TagError::TypeMismatch {
                    tag: self.path(),
                    expected: format!("{atomic} in {min}..={max}"),
                    actual: v.to_string(),
                }),
                None => Err(self.mismatch(atomic.name(), value)),
            },
            (_, other) => Err(self.mismatch(atomic.name(), other)),
        }
    }

    fn read_atomic(&self, atomic: Atomic, node: Node) -> std::result::Result<Value, TagError> {
        if atomic == Atomic::Real {
            let doc = self.session.doc();
            let text = self.value_text(&doc, node)?;
            return radix::parse_real(text)
                .map(Value::Real)
                .ok_or_else(|| self.malformed(format!("unreadable REAL '{text}'")));
        }
        self.read_integer(atomic, node).map(Value::Int)
    }

    fn read_integer(&self, atomic: Atomic, node: Node) -> std::result::Result<i64, TagError> {
        let doc = self.session.doc();
        let text = self.value_text(&doc, node)?;
        radix::parse_integer(text, atomic)
            .ok_or_else(|| self.malformed(format!("unreadable {atomic} '{text}'")))
    }

    fn value_text<'d>(
        &self,
        doc: &'d Document,
        node: Node,
    ) -> std::result::Result<&'d str, TagError> {
        doc.attribute(node, "Value")
            .ok_or_else(|| self.malformed("missing Value attribute"))
    }

    fn mismatch(&self, expected: &str, actual: &Value) -> TagError {
        TagError::TypeMismatch {
            tag: self.path(),
            expected: expected.to_string(),
            actual: actual.type_name().to_string(),
        }
    }
}

/// `Radix` of a value node; array elements inherit it from their array.
fn radix_of(doc: &Document, node: Node) -> Option<String> {
    doc.attribute(node, "Radix")
        .or_else(|| {
            if doc.is_named(node, "Element") {
                doc.parent(node).and_then(|parent| doc.attribute(parent, "Radix"))
            } else {
                None
            }
        })
        .map(str::to_string)
}

/// Removes the undecorated `Data` elements of a tag.
pub(crate) fn strip_raw_data(doc: &mut Document, tag: Node) -> std::result::Result<(), DocumentError> {
    let raw: Vec<Node> = doc
        .find_all(tag, "Data")
        .into_iter()
        .filter(|data| doc.attribute(*data, "Format").is_none())
        .collect();
    for data in raw {
        doc.remove(data)?;
    }
    Ok(())
}
