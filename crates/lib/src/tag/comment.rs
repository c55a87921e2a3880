//! Descriptions and operand comments.
//!
//! A top-level tag keeps its own text in `Description`. Every part below it
//! (member, element, bit) keeps its text as a `Comment` in the tag's
//! `Comments` container, keyed by operand path. Multi-language projects nest
//! one `LocalizedDescription`/`LocalizedComment` per language; only the
//! session's active language is read or written.

use tracing::debug;
use xot::Node;

use super::{Origin, Tag};
use crate::Result;
use crate::document::{Document, DocumentError, Position};

impl Tag {
    /// Description in the active language, or None when there is none.
    pub fn description(&self) -> Result<Option<String>> {
        let operand = self.comment_operand("read the description of")?;
        let doc = self.session.doc();
        let lang = self.session.language();
        Ok(match operand {
            None => read_description(&doc, self.root, lang),
            Some(operand) => read_comment(&doc, self.root, &operand, lang),
        })
    }

    /// Sets the description in the active language; None deletes it.
    pub fn set_description(&self, text: Option<&str>) -> Result<()> {
        let operand = self.comment_operand("describe")?;
        let lang = self.session.language();
        let mut doc = self.session.doc_mut();
        match &operand {
            None => write_description(&mut doc, self.root, lang, text)?,
            Some(operand) => write_comment(&mut doc, self.root, operand, lang, text)?,
        }
        debug!(tag = %self.path(), deleted = text.is_none(), "Updated description");
        Ok(())
    }

    /// None for the tag itself, otherwise the operand its comment is keyed by.
    fn comment_operand(&self, operation: &str) -> std::result::Result<Option<String>, super::TagError> {
        match self.origin {
            Origin::TopLevel => Ok(None),
            Origin::SubArray => {
                Err(self.unsupported(operation, "sub-arrays cannot carry descriptions"))
            }
            _ => Ok(Some(self.operand.clone())),
        }
    }
}

pub(crate) fn read_description(doc: &Document, owner: Node, lang: Option<&str>) -> Option<String> {
    let description = doc.find(owner, "Description")?;
    match lang {
        None => doc.cdata(description),
        Some(lang) => doc
            .find_with_attribute(description, "LocalizedDescription", "Lang", lang)
            .and_then(|localized| doc.cdata(localized)),
    }
}

pub(crate) fn write_description(
    doc: &mut Document,
    owner: Node,
    lang: Option<&str>,
    text: Option<&str>,
) -> std::result::Result<(), DocumentError> {
    let existing = doc.find(owner, "Description");
    let Some(text) = text else {
        let Some(description) = existing else {
            return Ok(());
        };
        return remove_localized(doc, description, "LocalizedDescription", lang);
    };

    let description = match existing {
        Some(description) => description,
        None => {
            let position = doc
                .find(owner, "ConsumeInfo")
                .map_or(Position::First, Position::After);
            doc.create_child(owner, "Description", position)?
        }
    };
    let target = localized(doc, description, "LocalizedDescription", lang)?;
    doc.set_cdata(target, text)
}

pub(crate) fn read_comment(
    doc: &Document,
    owner: Node,
    operand: &str,
    lang: Option<&str>,
) -> Option<String> {
    let comments = doc.find(owner, "Comments")?;
    let comment = find_comment(doc, comments, operand)?;
    match lang {
        None => doc.cdata(comment),
        Some(lang) => doc
            .find_with_attribute(comment, "LocalizedComment", "Lang", lang)
            .and_then(|localized| doc.cdata(localized)),
    }
}

pub(crate) fn write_comment(
    doc: &mut Document,
    owner: Node,
    operand: &str,
    lang: Option<&str>,
    text: Option<&str>,
) -> std::result::Result<(), DocumentError> {
    let existing = doc.find(owner, "Comments");
    let Some(text) = text else {
        let Some(comments) = existing else {
            return Ok(());
        };
        if let Some(comment) = find_comment(doc, comments, operand) {
            remove_localized(doc, comment, "LocalizedComment", lang)?;
        }
        return remove_if_empty(doc, comments);
    };

    let comments = match existing {
        Some(comments) => comments,
        None => {
            let position = doc
                .find(owner, "Data")
                .map_or(Position::Last, Position::Before);
            doc.create_child(owner, "Comments", position)?
        }
    };
    let comment = match find_comment(doc, comments, operand) {
        Some(comment) => comment,
        None => {
            let comment = doc.create_child(comments, "Comment", Position::Last)?;
            doc.set_attribute(comment, "Operand", operand);
            comment
        }
    };
    let target = localized(doc, comment, "LocalizedComment", lang)?;
    doc.set_cdata(target, text)
}

/// Removes every comment whose operand satisfies `pred`.
pub(crate) fn remove_comments(
    doc: &mut Document,
    owner: Node,
    pred: impl Fn(&str) -> bool,
) -> std::result::Result<(), DocumentError> {
    let Some(comments) = doc.find(owner, "Comments") else {
        return Ok(());
    };
    let doomed: Vec<Node> = doc
        .find_all(comments, "Comment")
        .into_iter()
        .filter(|comment| doc.attribute(*comment, "Operand").is_some_and(&pred))
        .collect();
    for comment in doomed {
        doc.remove(comment)?;
    }
    remove_if_empty(doc, comments)
}

fn find_comment(doc: &Document, comments: Node, operand: &str) -> Option<Node> {
    doc.find_where(comments, "Comment", |doc, node| {
        doc.attribute(node, "Operand")
            .is_some_and(|o| o.eq_ignore_ascii_case(operand))
    })
}

/// The node holding text for `lang` under `holder`, created when missing.
fn localized(
    doc: &mut Document,
    holder: Node,
    element: &str,
    lang: Option<&str>,
) -> std::result::Result<Node, DocumentError> {
    let Some(lang) = lang else {
        return Ok(holder);
    };
    if let Some(existing) = doc.find_with_attribute(holder, element, "Lang", lang) {
        return Ok(existing);
    }
    let node = doc.create_child(holder, element, Position::Last)?;
    doc.set_attribute(node, "Lang", lang);
    Ok(node)
}

/// Deletes the text for `lang` from `holder`, and `holder` once nothing is left.
fn remove_localized(
    doc: &mut Document,
    holder: Node,
    element: &str,
    lang: Option<&str>,
) -> std::result::Result<(), DocumentError> {
    match lang {
        None => doc.remove(holder),
        Some(lang) => {
            if let Some(node) = doc.find_with_attribute(holder, element, "Lang", lang) {
                doc.remove(node)?;
            }
            remove_if_empty(doc, holder)
        }
    }
}

fn remove_if_empty(doc: &mut Document, node: Node) -> std::result::Result<(), DocumentError> {
    if doc.children(node).is_empty() {
        doc.remove(node)?;
    }
    Ok(())
}
