//! XML document adapter.
//!
//! [`Document`] wraps the in-memory XML tree of a project export and offers the
//! small set of element operations the rest of the crate needs: child lookup,
//! attribute access, text and CDATA content, child creation at a chosen
//! position, and removal. Everything the crate never touches is written back
//! unchanged.

use tracing::debug;
use xot::{Node, Xot};

mod cdata;
mod errors;

pub use errors::DocumentError;

/// Name of the root element of every project export.
pub const ROOT_ELEMENT: &str = "RSLogix5000Content";

const DEFAULT_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Where a newly created child element is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Before every existing child.
    First,
    /// After every existing child.
    Last,
    /// Immediately before the given sibling.
    Before(Node),
    /// Immediately after the given sibling.
    After(Node),
}

/// A loaded project export.
pub struct Document {
    xot: Xot,
    root: Node,
    declaration: String,
    /// Line break used by the source markup, reproduced on write.
    line_ending: Option<&'static str>,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("declaration", &self.declaration)
            .finish_non_exhaustive()
    }
}

impl Document {
    /// Parses an export from text and validates its root element.
    pub fn parse(xml: &str) -> Result<Self, DocumentError> {
        let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
        let declaration = leading_declaration(xml)
            .unwrap_or(DEFAULT_DECLARATION)
            .to_string();
        let line_ending = if xml.contains("\r\n") {
            Some("\r\n")
        } else if xml.contains('\n') {
            Some("\n")
        } else {
            None
        };

        let converted = cdata::to_placeholders(xml)?;
        let mut xot = Xot::new();
        let document = xot
            .parse(&converted)
            .map_err(|e| DocumentError::ParseFailed {
                reason: e.to_string(),
            })?;
        let root = xot
            .document_element(document)
            .map_err(|e| DocumentError::InvalidFile {
                reason: e.to_string(),
            })?;

        let doc = Self {
            xot,
            root,
            declaration,
            line_ending,
        };
        if !doc.is_named(root, ROOT_ELEMENT) {
            return Err(DocumentError::InvalidFile {
                reason: format!("root element is not {ROOT_ELEMENT}"),
            });
        }
        debug!(bytes = xml.len(), "Parsed project document");
        Ok(doc)
    }

    /// The `RSLogix5000Content` element.
    pub fn root(&self) -> Node {
        self.root
    }

    /// Serializes the document, restoring CDATA sections.
    ///
    /// Markup keeps the source's line breaks; `crlf` governs line breaks
    /// inside CDATA text.
    pub fn to_xml_string(&self, crlf: bool) -> Result<String, DocumentError> {
        let body = self
            .xot
            .to_string(self.root)
            .map_err(|e| DocumentError::SerializationFailed {
                reason: e.to_string(),
            })?;
        let body = cdata::from_placeholders(&body, crlf, self.line_ending == Some("\r\n"));

        let mut out = String::with_capacity(self.declaration.len() + body.len() + 2);
        out.push_str(&self.declaration);
        out.push_str(
            self.line_ending
                .unwrap_or(if crlf { "\r\n" } else { "\n" }),
        );
        out.push_str(&body);
        Ok(out)
    }

    /// Returns true when `node` is an element called `name`.
    pub fn is_named(&self, node: Node, name: &str) -> bool {
        match (self.xot.element(node), self.xot.name(name)) {
            (Some(element), Some(id)) => element.name() == id,
            _ => false,
        }
    }

    /// Element children of `parent`, in document order.
    pub fn children(&self, parent: Node) -> Vec<Node> {
        self.xot
            .children(parent)
            .filter(|child| self.xot.is_element(*child))
            .collect()
    }

    /// Element children of `parent` called `name`.
    pub fn find_all(&self, parent: Node, name: &str) -> Vec<Node> {
        let Some(id) = self.xot.name(name) else {
            return Vec::new();
        };
        self.xot
            .children(parent)
            .filter(|child| self.xot.element(*child).is_some_and(|e| e.name() == id))
            .collect()
    }

    /// First element child of `parent` called `name`.
    pub fn find(&self, parent: Node, name: &str) -> Option<Node> {
        self.find_all(parent, name).into_iter().next()
    }

    /// First element child called `name` that also satisfies `pred`.
    pub fn find_where(
        &self,
        parent: Node,
        name: &str,
        pred: impl Fn(&Self, Node) -> bool,
    ) -> Option<Node> {
        self.find_all(parent, name)
            .into_iter()
            .find(|child| pred(self, *child))
    }

    /// First element child called `name` whose attribute `attr` equals `value`.
    pub fn find_with_attribute(
        &self,
        parent: Node,
        name: &str,
        attr: &str,
        value: &str,
    ) -> Option<Node> {
        self.find_where(parent, name, |doc, node| {
            doc.attribute(node, attr) == Some(value)
        })
    }

    /// Follows a chain of element names down from `parent`.
    pub fn find_path(&self, parent: Node, path: &[&str]) -> Option<Node> {
        path.iter()
            .try_fold(parent, |node, name| self.find(node, name))
    }

    /// Parent element of `node`, if it has one.
    pub fn parent(&self, node: Node) -> Option<Node> {
        self.xot
            .parent(node)
            .filter(|parent| self.xot.is_element(*parent))
    }

    pub fn attribute(&self, node: Node, name: &str) -> Option<&str> {
        let id = self.xot.name(name)?;
        self.xot.attributes(node).get(id).map(|value| value.as_str())
    }

    pub fn set_attribute(&mut self, node: Node, name: &str, value: impl Into<String>) {
        let id = self.xot.add_name(name);
        self.xot.attributes_mut(node).insert(id, value.into());
    }

    pub fn remove_attribute(&mut self, node: Node, name: &str) {
        if let Some(id) = self.xot.name(name) {
            self.xot.attributes_mut(node).remove(id);
        }
    }

    /// Concatenated text content directly under `node`, or None without any.
    pub fn text(&self, node: Node) -> Option<String> {
        let mut found = false;
        let mut out = String::new();
        for child in self.xot.children(node) {
            if let Some(text) = self.xot.text_str(child) {
                found = true;
                out.push_str(text);
            }
        }
        found.then_some(out)
    }

    /// Replaces all text directly under `node`.
    pub fn set_text(&mut self, node: Node, text: &str) -> Result<(), DocumentError> {
        let existing: Vec<Node> = self
            .xot
            .children(node)
            .filter(|child| self.xot.text_str(*child).is_some())
            .collect();
        for child in existing {
            self.xot
                .remove(child)
                .map_err(|e| DocumentError::tree("remove text", e))?;
        }
        if !text.is_empty() {
            let new = self.xot.new_text(text);
            self.xot
                .append(node, new)
                .map_err(|e| DocumentError::tree("append text", e))?;
        }
        Ok(())
    }

    /// Text of the CDATA section under `node`, if it has one.
    pub fn cdata(&self, node: Node) -> Option<String> {
        let section = self.find(node, cdata::PLACEHOLDER)?;
        Some(self.text(section).unwrap_or_default())
    }

    /// Sets the CDATA section under `node`, creating it when missing.
    pub fn set_cdata(&mut self, node: Node, text: &str) -> Result<(), DocumentError> {
        let section = match self.find(node, cdata::PLACEHOLDER) {
            Some(section) => section,
            None => self.create_child(node, cdata::PLACEHOLDER, Position::Last)?,
        };
        self.set_text(section, text)
    }

    /// Creates an empty element called `name` under `parent`.
    pub fn create_child(
        &mut self,
        parent: Node,
        name: &str,
        position: Position,
    ) -> Result<Node, DocumentError> {
        let id = self.xot.add_name(name);
        let child = self.xot.new_element(id);
        let placed = match position {
            Position::Last => self.xot.append(parent, child),
            Position::First => match self.xot.first_child(parent) {
                Some(first) => self.xot.insert_before(first, child),
                None => self.xot.append(parent, child),
            },
            Position::Before(sibling) => self.xot.insert_before(sibling, child),
            Position::After(sibling) => self.xot.insert_after(sibling, child),
        };
        placed.map_err(|e| DocumentError::tree("insert element", e))?;
        Ok(child)
    }

    /// Detaches `node` and everything under it.
    pub fn remove(&mut self, node: Node) -> Result<(), DocumentError> {
        self.xot
            .remove(node)
            .map_err(|e| DocumentError::tree("remove element", e))
    }

    /// Removes every child of `node`, text included.
    pub fn clear_children(&mut self, node: Node) -> Result<(), DocumentError> {
        let children: Vec<Node> = self.xot.children(node).collect();
        for child in children {
            self.remove(child)?;
        }
        Ok(())
    }
}

/// The `<?xml ...?>` declaration at the start of `xml`, if present.
fn leading_declaration(xml: &str) -> Option<&str> {
    let trimmed = xml.trim_start();
    if !trimmed.starts_with("<?xml") {
        return None;
    }
    let end = trimmed.find("?>")?;
    Some(&trimmed[..end + 2])
}
