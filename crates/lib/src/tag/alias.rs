//! Alias tags.

use tracing::debug;

use super::{Tag, TagError, comment};
use crate::Result;

impl Tag {
    /// Operand the alias points at, e.g. `Local:1:I.Data.3`.
    pub fn alias_for(&self) -> Result<String> {
        self.require_alias("read the target of")?;
        let doc = self.session.doc();
        let target = doc
            .attribute(self.root, "AliasFor")
            .ok_or_else(|| self.malformed("alias without AliasFor"))?;
        Ok(target.to_string())
    }

    /// Retargets the alias.
    ///
    /// Comments the alias carried for operands of its old target are removed.
    pub fn set_alias_for(&self, target: &str) -> Result<()> {
        self.require_alias("retarget")?;
        let target = target.trim();
        if target.is_empty() {
            return Err(TagError::InvalidValue {
                tag: self.path(),
                reason: "alias target must not be empty".to_string(),
            }
            .into());
        }
        let mut doc = self.session.doc_mut();
        doc.set_attribute(self.root, "AliasFor", target);
        comment::remove_comments(&mut doc, self.root, |_| true)?;
        debug!(tag = %self.name, target, "Retargeted alias");
        Ok(())
    }

    /// Comment stored on the tag for an operand path such as `.PRE` or `[3]`.
    ///
    /// For aliases this reads comments on parts of the aliased target.
    pub fn operand_comment(&self, operand: &str) -> Result<Option<String>> {
        self.require_top_level("read operand comments of")?;
        let doc = self.session.doc();
        Ok(comment::read_comment(
            &doc,
            self.root,
            operand,
            self.session.language(),
        ))
    }

    /// Sets or, with None, deletes the comment for an operand path.
    pub fn set_operand_comment(&self, operand: &str, text: Option<&str>) -> Result<()> {
        self.require_top_level("write operand comments of")?;
        let lang = self.session.language();
        let mut doc = self.session.doc_mut();
        comment::write_comment(&mut doc, self.root, operand, lang, text)?;
        Ok(())
    }

    fn require_alias(&self, operation: &str) -> std::result::Result<(), TagError> {
        if self.is_top_level() && self.is_alias() {
            Ok(())
        } else {
            Err(self.unsupported(operation, "not an alias tag"))
        }
    }

    fn require_top_level(&self, operation: &str) -> std::result::Result<(), TagError> {
        if self.is_top_level() {
            Ok(())
        } else {
            Err(self.unsupported(operation, "operand comments belong to the top-level tag"))
        }
    }
}
