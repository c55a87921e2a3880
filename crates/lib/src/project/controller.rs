use std::rc::Rc;

use tracing::debug;

use crate::Result;
use crate::module::{Module, ModuleError, Modules, Ports};
use crate::session::Session;
use crate::tag::Tags;

/// The controller: controller-scoped tags and the controller's own module.
#[derive(Debug, Clone)]
pub struct Controller {
    session: Rc<Session>,
}

impl Controller {
    pub(crate) fn new(session: Rc<Session>) -> Self {
        Self { session }
    }

    pub fn name(&self) -> String {
        self.session
            .doc()
            .attribute(self.session.controller, "Name")
            .unwrap_or_default()
            .to_string()
    }

    /// Controller-scoped tags.
    pub fn tags(&self) -> Tags {
        let element = self
            .session
            .doc()
            .find(self.session.controller, "Tags");
        Tags::new(Rc::clone(&self.session), element, "controller".to_string())
    }

    /// Communication path used to go online, if one is stored.
    pub fn comm_path(&self) -> Option<String> {
        self.session
            .doc()
            .attribute(self.session.controller, "CommPath")
            .map(str::to_string)
    }

    /// Sets the communication path; None removes it.
    pub fn set_comm_path(&self, path: Option<&str>) {
        let mut doc = self.session.doc_mut();
        match path {
            Some(path) => doc.set_attribute(self.session.controller, "CommPath", path),
            None => doc.remove_attribute(self.session.controller, "CommPath"),
        }
        debug!(comm_path = ?path, "Updated controller communication path");
    }

    /// Safety network number of the controller.
    pub fn snn(&self) -> Result<String> {
        self.module()?.snn()
    }

    pub fn set_snn(&self, snn: &str) -> Result<()> {
        self.module()?.set_snn(snn)
    }

    /// Ports of the controller's own module.
    pub fn ports(&self) -> Result<Ports> {
        Ok(self.module()?.ports())
    }

    fn module(&self) -> std::result::Result<Module, ModuleError> {
        Modules::new(Rc::clone(&self.session))
            .first()
            .ok_or_else(|| ModuleError::SafetyNetworkUnsupported {
                target: format!("Controller {}", self.name()),
            })
    }
}
