use std::rc::Rc;

use tracing::trace;
use xot::Node;

use super::{Atomic, DataType, MemberDef, StructDef, builtin};
use crate::document::Document;
use crate::tag::TagError;

/// Resolves a data type name.
///
/// `decorated` is the decorated structure node of the value being typed, used
/// to derive a member list when the name is not declared anywhere.
pub(crate) fn resolve(
    doc: &Document,
    controller: Node,
    name: &str,
    decorated: Option<Node>,
) -> Result<DataType, TagError> {
    if let Some(atomic) = Atomic::from_name(name) {
        return Ok(DataType::Atomic(atomic));
    }
    if let Some(def) = builtin::builtin(name) {
        return Ok(DataType::Structure(Rc::new(def)));
    }
    if let Some(def) = user_defined(doc, controller, name) {
        return Ok(DataType::Structure(Rc::new(def)));
    }
    if let Some(container) = decorated.filter(|node| !doc.children(*node).is_empty()) {
        trace!(data_type = %name, "Deriving member layout from decorated data");
        return Ok(DataType::Structure(Rc::new(derive_from_decorated(
            doc, container, name,
        ))));
    }
    Err(TagError::UnresolvedType {
        data_type: name.to_string(),
    })
}

fn user_defined(doc: &Document, controller: Node, name: &str) -> Option<StructDef> {
    let types = doc.find(controller, "DataTypes")?;
    let declared = doc.find_where(types, "DataType", |doc, node| {
        doc.attribute(node, "Name")
            .is_some_and(|n| n.eq_ignore_ascii_case(name))
    })?;
    let members = doc
        .find(declared, "Members")
        .map(|members| doc.find_all(members, "Member"))
        .unwrap_or_default()
        .into_iter()
        .filter(|member| doc.attribute(*member, "Hidden") != Some("true"))
        .filter_map(|member| {
            let data_type = doc.attribute(member, "DataType")?;
            Some(MemberDef {
                name: doc.attribute(member, "Name")?.to_string(),
                data_type: if data_type.eq_ignore_ascii_case("BIT") {
                    "BOOL".to_string()
                } else {
                    data_type.to_string()
                },
                dimension: doc
                    .attribute(member, "Dimension")
                    .and_then(|d| d.trim().parse().ok())
                    .unwrap_or(0),
            })
        })
        .collect();
    Some(StructDef {
        name: doc
            .attribute(declared, "Name")
            .unwrap_or(name)
            .to_string(),
        members,
    })
}

/// Builds a member list from the children of a decorated structure node.
pub(crate) fn derive_from_decorated(doc: &Document, container: Node, name: &str) -> StructDef {
    let members = doc
        .children(container)
        .into_iter()
        .filter_map(|child| {
            let member_name = doc.attribute(child, "Name")?.to_string();
            let data_type = doc.attribute(child, "DataType")?.to_string();
            let dimension = if doc.is_named(child, "ArrayMember") {
                doc.attribute(child, "Dimensions")
                    .and_then(|d| d.split([',', ' ']).next())
                    .and_then(|d| d.trim().parse().ok())
                    .unwrap_or(0)
            } else if doc.is_named(child, "DataValueMember")
                || doc.is_named(child, "StructureMember")
            {
                0
            } else {
                return None;
            };
            Some(MemberDef {
                name: member_name,
                data_type,
                dimension,
            })
        })
        .collect();
    StructDef {
        name: name.to_string(),
        members,
    }
}
