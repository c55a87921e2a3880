//! I/O modules and their communication ports.
//!
//! Modules are listed under `Controller/Modules`. The first module is the
//! controller itself. Safety-capable devices carry a safety network number
//! either on the module (single-port devices) or on each port.

use std::rc::Rc;

use tracing::debug;
use xot::Node;

use crate::Result;
use crate::document::Document;
use crate::session::Session;

mod errors;
pub mod snn;

pub use errors::ModuleError;

/// The modules of a controller.
#[derive(Debug, Clone)]
pub struct Modules {
    session: Rc<Session>,
    element: Option<Node>,
}

impl Modules {
    pub(crate) fn new(session: Rc<Session>) -> Self {
        let element = session.doc().find(session.controller, "Modules");
        Self { session, element }
    }

    /// Module names in document order.
    pub fn names(&self) -> Vec<String> {
        let doc = self.session.doc();
        self.nodes()
            .into_iter()
            .filter_map(|node| doc.attribute(node, "Name").map(str::to_string))
            .collect()
    }

    pub fn get(&self, name: &str) -> Result<Module> {
        let doc = self.session.doc();
        let node = self
            .nodes()
            .into_iter()
            .find(|node| doc.attribute(*node, "Name") == Some(name))
            .ok_or_else(|| ModuleError::ModuleNotFound {
                name: name.to_string(),
            })?;
        Ok(Module::new(Rc::clone(&self.session), &doc, node))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names().iter().any(|n| n == name)
    }

    /// Every module, in document order.
    pub fn iter(&self) -> impl Iterator<Item = Module> + '_ {
        self.nodes().into_iter().map(|node| {
            let doc = self.session.doc();
            Module::new(Rc::clone(&self.session), &doc, node)
        })
    }

    /// The controller's own module.
    pub(crate) fn first(&self) -> Option<Module> {
        self.iter().next()
    }

    fn nodes(&self) -> Vec<Node> {
        match self.element {
            Some(element) => self.session.doc().find_all(element, "Module"),
            None => Vec::new(),
        }
    }
}

/// A hardware module.
#[derive(Debug, Clone)]
pub struct Module {
    session: Rc<Session>,
    node: Node,
    name: String,
}

impl Module {
    fn new(session: Rc<Session>, doc: &Document, node: Node) -> Self {
        let name = doc.attribute(node, "Name").unwrap_or_default().to_string();
        Self {
            session,
            node,
            name,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the controller's connection to the module is inhibited.
    pub fn inhibited(&self) -> bool {
        self.session
            .doc()
            .attribute(self.node, "Inhibited")
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }

    pub fn set_inhibited(&self, inhibited: bool) {
        self.session
            .doc_mut()
            .set_attribute(self.node, "Inhibited", inhibited.to_string());
        debug!(module = %self.name, inhibited, "Updated module inhibit");
    }

    /// Safety network number, for modules carrying a single one.
    pub fn snn(&self) -> Result<String> {
        read_snn(&self.session, self.node, || format!("Module {}", self.name))
    }

    pub fn set_snn(&self, snn: &str) -> Result<()> {
        write_snn(&self.session, self.node, snn, || {
            format!("Module {}", self.name)
        })
    }

    /// Communication ports, keyed by port id.
    pub fn ports(&self) -> Ports {
        let element = self.session.doc().find(self.node, "Ports");
        Ports {
            session: Rc::clone(&self.session),
            element,
            module: self.name.clone(),
        }
    }
}

/// The ports of one module.
#[derive(Debug, Clone)]
pub struct Ports {
    session: Rc<Session>,
    element: Option<Node>,
    module: String,
}

impl Ports {
    /// Port ids in document order.
    pub fn ids(&self) -> Vec<u32> {
        let doc = self.session.doc();
        self.nodes()
            .into_iter()
            .filter_map(|node| port_id(&doc, node))
            .collect()
    }

    pub fn get(&self, id: u32) -> Result<Port> {
        let doc = self.session.doc();
        let node = self
            .nodes()
            .into_iter()
            .find(|node| port_id(&doc, *node) == Some(id))
            .ok_or_else(|| ModuleError::PortNotFound {
                module: self.module.clone(),
                id,
            })?;
        Ok(Port {
            session: Rc::clone(&self.session),
            node,
            id,
            module: self.module.clone(),
        })
    }

    /// Every port with a readable id, in document order.
    pub fn iter(&self) -> impl Iterator<Item = Port> + '_ {
        let doc = self.session.doc();
        let ports: Vec<Port> = self
            .nodes()
            .into_iter()
            .filter_map(|node| {
                Some(Port {
                    session: Rc::clone(&self.session),
                    node,
                    id: port_id(&doc, node)?,
                    module: self.module.clone(),
                })
            })
            .collect();
        ports.into_iter()
    }

    fn nodes(&self) -> Vec<Node> {
        match self.element {
            Some(element) => self.session.doc().find_all(element, "Port"),
            None => Vec::new(),
        }
    }
}

/// One communication port of a module.
#[derive(Debug, Clone)]
pub struct Port {
    session: Rc<Session>,
    node: Node,
    id: u32,
    module: String,
}

impl Port {
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Interface kind, such as `ICP` or `Ethernet`. Fixed by the document.
    pub fn port_type(&self) -> Option<String> {
        self.attribute("Type")
    }

    /// Address on the port's network; None when unconfigured.
    pub fn address(&self) -> Option<String> {
        self.attribute("Address")
    }

    pub fn set_address(&self, address: &str) {
        self.session
            .doc_mut()
            .set_attribute(self.node, "Address", address);
        debug!(module = %self.module, port = self.id, address, "Updated port address");
    }

    /// NAT address, present only on ports configured for NAT.
    pub fn nat_address(&self) -> Option<String> {
        self.attribute("NATActualAddress")
    }

    /// Sets the NAT address of a port already configured for NAT.
    pub fn set_nat_address(&self, address: &str) -> Result<()> {
        if self.nat_address().is_none() {
            return Err(ModuleError::NatNotConfigured {
                module: self.module.clone(),
                port: self.id,
            }
            .into());
        }
        self.session
            .doc_mut()
            .set_attribute(self.node, "NATActualAddress", address);
        debug!(module = %self.module, port = self.id, address, "Updated NAT address");
        Ok(())
    }

    /// Safety network number, for safety devices keeping one per port.
    pub fn snn(&self) -> Result<String> {
        read_snn(&self.session, self.node, || self.describe())
    }

    pub fn set_snn(&self, snn: &str) -> Result<()> {
        write_snn(&self.session, self.node, snn, || self.describe())
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.session
            .doc()
            .attribute(self.node, name)
            .map(str::to_string)
    }

    fn describe(&self) -> String {
        format!(
            "Port {}({}) of module {}",
            self.id,
            self.port_type().unwrap_or_default(),
            self.module
        )
    }
}

fn port_id(doc: &Document, node: Node) -> Option<u32> {
    doc.attribute(node, "Id")?.trim().parse().ok()
}

fn read_snn(session: &Session, node: Node, target: impl FnOnce() -> String) -> Result<String> {
    let doc = session.doc();
    match doc.attribute(node, snn::ATTRIBUTE) {
        Some(raw) => Ok(snn::decode(raw)),
        None => Err(ModuleError::SafetyNetworkUnsupported { target: target() }.into()),
    }
}

fn write_snn(
    session: &Session,
    node: Node,
    input: &str,
    target: impl FnOnce() -> String,
) -> Result<()> {
    if session.doc().attribute(node, snn::ATTRIBUTE).is_none() {
        return Err(ModuleError::SafetyNetworkUnsupported { target: target() }.into());
    }
    let stored = snn::encode(input)?;
    debug!(snn = %stored, "Updated safety network number");
    session.doc_mut().set_attribute(node, snn::ATTRIBUTE, stored);
    Ok(())
}
