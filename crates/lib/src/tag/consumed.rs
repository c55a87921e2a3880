//! Consumed tags: data produced by another controller.

use tracing::debug;

use super::{Tag, TagError};
use crate::Result;

impl Tag {
    /// Name of the controller producing this tag.
    pub fn producer(&self) -> Result<String> {
        self.consume_info("Producer")
    }

    pub fn set_producer(&self, producer: &str) -> Result<()> {
        self.set_consume_info("Producer", producer)
    }

    /// Name of the produced tag on the producing controller.
    pub fn remote_tag(&self) -> Result<String> {
        self.consume_info("RemoteTag")
    }

    pub fn set_remote_tag(&self, remote_tag: &str) -> Result<()> {
        self.set_consume_info("RemoteTag", remote_tag)
    }

    fn consume_info(&self, attribute: &str) -> Result<String> {
        let doc = self.session.doc();
        let info = self.consume_info_node(&doc, attribute)?;
        doc.attribute(info, attribute)
            .map(str::to_string)
            .ok_or_else(|| self.malformed(format!("ConsumeInfo without {attribute}")).into())
    }

    fn set_consume_info(&self, attribute: &str, value: &str) -> Result<()> {
        if value.is_empty() {
            return Err(TagError::InvalidValue {
                tag: self.path(),
                reason: format!("{attribute} must not be empty"),
            }
            .into());
        }
        let info = self.consume_info_node(&self.session.doc(), attribute)?;
        self.session.doc_mut().set_attribute(info, attribute, value);
        debug!(tag = %self.name, attribute, value, "Updated consumed tag");
        Ok(())
    }

    fn consume_info_node(
        &self,
        doc: &crate::document::Document,
        attribute: &str,
    ) -> std::result::Result<xot::Node, TagError> {
        if !self.is_top_level() || doc.attribute(self.root, "TagType") != Some("Consumed") {
            return Err(self.unsupported(
                &format!("access {attribute} of"),
                "not a consumed tag",
            ));
        }
        doc.find(self.root, "ConsumeInfo")
            .ok_or_else(|| self.malformed("consumed tag without ConsumeInfo"))
    }
}
