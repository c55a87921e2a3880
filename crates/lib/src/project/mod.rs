//! Loaded projects.
//!
//! [`Project`] owns the document of one export. The controller, its programs,
//! tags and modules are handed out as views sharing that document.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::rc::Rc;

use tracing::{debug, info};

use crate::config::ProjectConfig;
use crate::document::{Document, DocumentError};
use crate::module::Modules;
use crate::session::Session;
use crate::{Error, Result};

mod controller;
mod program;

pub use controller::Controller;
pub use program::{Program, Programs};

/// A project export loaded into memory.
#[derive(Debug, Clone)]
pub struct Project {
    session: Rc<Session>,
}

impl Project {
    /// Loads an export from disk with the default configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_config(path, ProjectConfig::default())
    }

    pub fn load_with_config(path: impl AsRef<Path>, config: ProjectConfig) -> Result<Self> {
        let path = path.as_ref();
        let xml = fs::read_to_string(path)?;
        let project = Self::parse_with_config(&xml, config)?;
        info!(path = %path.display(), "Loaded project");
        Ok(project)
    }

    /// Parses an export from text with the default configuration.
    pub fn parse(xml: &str) -> Result<Self> {
        Self::parse_with_config(xml, ProjectConfig::default())
    }

    pub fn parse_with_config(xml: &str, config: ProjectConfig) -> Result<Self> {
        let doc = Document::parse(xml)?;
        let root = doc.root();
        let controller = doc
            .find(root, "Controller")
            .ok_or_else(|| DocumentError::InvalidFile {
                reason: "no Controller element".to_string(),
            })?;

        // Multi-language projects name their current language on the root.
        let language = doc.attribute(root, "CurrentLanguage").map(|current| {
            config
                .language
                .clone()
                .unwrap_or_else(|| current.to_string())
        });
        debug!(language = ?language, "Resolved description language");

        Ok(Self {
            session: Rc::new(Session::new(doc, controller, language, config)),
        })
    }

    /// Active description language, or None for single-language projects.
    pub fn language(&self) -> Option<&str> {
        self.session.language()
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.session.config
    }

    pub fn controller(&self) -> Controller {
        Controller::new(Rc::clone(&self.session))
    }

    pub fn programs(&self) -> Programs {
        Programs::new(Rc::clone(&self.session))
    }

    pub fn modules(&self) -> Modules {
        Modules::new(Rc::clone(&self.session))
    }

    /// Serializes the current document.
    pub fn to_xml_string(&self) -> Result<String> {
        let xml = self
            .session
            .doc()
            .to_xml_string(self.session.config.crlf_comments)?;
        Ok(xml)
    }

    /// Writes the document to `path`.
    ///
    /// The output goes to a temporary file beside `path` that then replaces
    /// it, so a failed write leaves any existing file intact.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let xml = self.to_xml_string()?;
        let dir = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        file.write_all(xml.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(path).map_err(|e| Error::Io(e.error))?;
        info!(path = %path.display(), bytes = xml.len(), "Wrote project");
        Ok(())
    }
}
