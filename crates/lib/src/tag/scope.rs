use std::rc::Rc;

use xot::Node;

use super::{Tag, TagError};
use crate::Result;
use crate::session::Session;

/// The tags of one scope: the controller or a single program.
#[derive(Debug, Clone)]
pub struct Tags {
    session: Rc<Session>,
    /// The `<Tags>` element; None when the scope declares no tags.
    element: Option<Node>,
    scope: String,
}

impl Tags {
    pub(crate) fn new(session: Rc<Session>, element: Option<Node>, scope: String) -> Self {
        Self {
            session,
            element,
            scope,
        }
    }

    /// Tag names in document order.
    pub fn names(&self) -> Vec<String> {
        let doc = self.session.doc();
        self.nodes()
            .into_iter()
            .filter_map(|node| doc.attribute(node, "Name").map(str::to_string))
            .collect()
    }

    /// Looks up a tag by name, ignoring case.
    pub fn get(&self, name: &str) -> Result<Tag> {
        let node = self.find(name).ok_or_else(|| TagError::TagNotFound {
            scope: self.scope.clone(),
            name: name.to_string(),
        })?;
        let doc = self.session.doc();
        Ok(Tag::top_level(Rc::clone(&self.session), &doc, node))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.nodes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes().is_empty()
    }

    /// Every tag of the scope, in document order.
    pub fn iter(&self) -> impl Iterator<Item = Tag> + '_ {
        self.nodes().into_iter().map(|node| {
            let doc = self.session.doc();
            Tag::top_level(Rc::clone(&self.session), &doc, node)
        })
    }

    /// Name of the scope, `"controller"` or the program name.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    fn nodes(&self) -> Vec<Node> {
        match self.element {
            Some(element) => self.session.doc().find_all(element, "Tag"),
            None => Vec::new(),
        }
    }

    fn find(&self, name: &str) -> Option<Node> {
        let doc = self.session.doc();
        self.nodes().into_iter().find(|node| {
            doc.attribute(*node, "Name")
                .is_some_and(|n| n.eq_ignore_ascii_case(name))
        })
    }
}
