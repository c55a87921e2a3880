//! Shared state behind every handle of a loaded project.

use std::cell::{Ref, RefCell, RefMut};

use xot::Node;

use crate::config::ProjectConfig;
use crate::document::Document;

/// The loaded document plus the settings fixed at load time.
///
/// Handles hold an `Rc<Session>` and borrow the document only for the span of
/// a single operation.
#[derive(Debug)]
pub(crate) struct Session {
    doc: RefCell<Document>,
    pub(crate) controller: Node,
    /// Active description language; None for single-language projects.
    pub(crate) language: Option<String>,
    pub(crate) config: ProjectConfig,
}

impl Session {
    pub(crate) fn new(
        doc: Document,
        controller: Node,
        language: Option<String>,
        config: ProjectConfig,
    ) -> Self {
        Self {
            doc: RefCell::new(doc),
            controller,
            language,
            config,
        }
    }

    pub(crate) fn doc(&self) -> Ref<'_, Document> {
        self.doc.borrow()
    }

    pub(crate) fn doc_mut(&self) -> RefMut<'_, Document> {
        self.doc.borrow_mut()
    }

    pub(crate) fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}
