//! Built-in composite types every controller knows.

use super::{MemberDef, StructDef};

const TIMER: &[(&str, &str)] = &[
    ("PRE", "DINT"),
    ("ACC", "DINT"),
    ("TT", "BOOL"),
    ("EN", "BOOL"),
    ("DN", "BOOL"),
];

const COUNTER: &[(&str, &str)] = &[
    ("PRE", "DINT"),
    ("ACC", "DINT"),
    ("CU", "BOOL"),
    ("CD", "BOOL"),
    ("DN", "BOOL"),
    ("OV", "BOOL"),
    ("UN", "BOOL"),
];

const CONTROL: &[(&str, &str)] = &[
    ("LEN", "DINT"),
    ("POS", "DINT"),
    ("EN", "BOOL"),
    ("EU", "BOOL"),
    ("DN", "BOOL"),
    ("EM", "BOOL"),
    ("ER", "BOOL"),
    ("UL", "BOOL"),
    ("IN", "BOOL"),
    ("FD", "BOOL"),
];

/// Names of the built-in composite types.
pub const BUILTIN_TYPES: &[&str] = &["TIMER", "COUNTER", "CONTROL"];

/// Member layout of a built-in type, ignoring case in `name`.
pub(crate) fn builtin(name: &str) -> Option<StructDef> {
    let (canonical, members) = [("TIMER", TIMER), ("COUNTER", COUNTER), ("CONTROL", CONTROL)]
        .into_iter()
        .find(|(type_name, _)| type_name.eq_ignore_ascii_case(name))?;
    Some(StructDef {
        name: canonical.to_string(),
        members: members
            .iter()
            .map(|(member, data_type)| MemberDef {
                name: member.to_string(),
                data_type: data_type.to_string(),
                dimension: 0,
            })
            .collect(),
    })
}
