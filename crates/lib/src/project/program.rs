use std::rc::Rc;

use xot::Node;

use crate::Result;
use crate::session::Session;
use crate::tag::{TagError, Tags};

/// The programs of a controller.
#[derive(Debug, Clone)]
pub struct Programs {
    session: Rc<Session>,
    element: Option<Node>,
}

impl Programs {
    pub(crate) fn new(session: Rc<Session>) -> Self {
        let element = session.doc().find(session.controller, "Programs");
        Self { session, element }
    }

    /// Program names in document order.
    pub fn names(&self) -> Vec<String> {
        let doc = self.session.doc();
        self.nodes()
            .into_iter()
            .filter_map(|node| doc.attribute(node, "Name").map(str::to_string))
            .collect()
    }

    pub fn get(&self, name: &str) -> Result<Program> {
        let doc = self.session.doc();
        let node = self
            .nodes()
            .into_iter()
            .find(|node| {
                doc.attribute(*node, "Name")
                    .is_some_and(|n| n.eq_ignore_ascii_case(name))
            })
            .ok_or_else(|| TagError::ProgramNotFound {
                name: name.to_string(),
            })?;
        Ok(Program {
            session: Rc::clone(&self.session),
            node,
            name: doc.attribute(node, "Name").unwrap_or(name).to_string(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_ok()
    }

    fn nodes(&self) -> Vec<Node> {
        match self.element {
            Some(element) => self.session.doc().find_all(element, "Program"),
            None => Vec::new(),
        }
    }
}

/// One program and its program-scoped tags.
#[derive(Debug, Clone)]
pub struct Program {
    session: Rc<Session>,
    node: Node,
    name: String,
}

impl Program {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Program-scoped tags.
    pub fn tags(&self) -> Tags {
        let element = self.session.doc().find(self.node, "Tags");
        Tags::new(Rc::clone(&self.session), element, self.name.clone())
    }
}
