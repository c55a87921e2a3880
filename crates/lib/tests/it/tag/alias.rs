use super::helpers::{controller_tag, xml};
use crate::helpers::{project, reload, tag_xml};

#[test]
fn test_alias_target() {
    let project = project();
    let alias = controller_tag(&project, "alias_timer");

    assert!(alias.is_alias());
    assert_eq!(alias.tag_type().as_deref(), Some("Alias"));
    assert_eq!(alias.alias_for().unwrap(), "delay");
    assert_eq!(alias.description().unwrap().as_deref(), Some("alias to delay"));
    assert_eq!(
        alias.operand_comment(".PRE").unwrap().as_deref(),
        Some("preset comment")
    );
}

#[test]
fn test_alias_carries_no_value() {
    let project = project();
    let alias = controller_tag(&project, "alias_timer");

    assert!(alias.value().unwrap_err().is_unsupported_operation());
    assert!(alias.set_value(1).unwrap_err().is_unsupported_operation());
    assert!(alias.member("PRE").unwrap_err().is_unsupported_operation());
}

#[test]
fn test_retarget_clears_operand_comments() {
    let project = project();
    let alias = controller_tag(&project, "alias_timer");

    alias.set_alias_for("  backup_delay  ").unwrap();
    assert_eq!(alias.alias_for().unwrap(), "backup_delay");
    assert_eq!(alias.operand_comment(".PRE").unwrap(), None);
    assert_eq!(alias.description().unwrap().as_deref(), Some("alias to delay"));

    // The old target keeps its own member comment.
    let delay = controller_tag(&project, "delay");
    assert_eq!(
        delay.member("PRE").unwrap().description().unwrap().as_deref(),
        Some("delay preset")
    );

    let out = xml(&project);
    let tag = tag_xml(&out, "alias_timer");
    assert!(tag.contains(r#"AliasFor="backup_delay""#));
    assert!(!tag.contains("<Comments>"));
    assert!(tag_xml(&out, "delay").contains("delay preset"));

    let reloaded = reload(&project);
    assert_eq!(
        controller_tag(&reloaded, "alias_timer").alias_for().unwrap(),
        "backup_delay"
    );
    assert_eq!(
        controller_tag(&reloaded, "delay")
            .member("PRE")
            .unwrap()
            .description()
            .unwrap()
            .as_deref(),
        Some("delay preset")
    );
}

#[test]
fn test_retarget_rejects_empty_target() {
    let project = project();
    let alias = controller_tag(&project, "alias_timer");

    assert!(alias.set_alias_for("   ").unwrap_err().is_invalid_value());
    assert_eq!(alias.alias_for().unwrap(), "delay");
    assert!(alias.operand_comment(".PRE").unwrap().is_some());
}

#[test]
fn test_alias_operations_require_alias() {
    let project = project();
    let count = controller_tag(&project, "count");

    assert!(!count.is_alias());
    assert!(count.alias_for().unwrap_err().is_unsupported_operation());
    assert!(count.set_alias_for("delay").unwrap_err().is_unsupported_operation());
}

#[test]
fn test_operand_comments() {
    let project = project();
    let alias = controller_tag(&project, "alias_timer");

    alias.set_operand_comment(".DN", Some("done")).unwrap();
    assert_eq!(alias.operand_comment(".dn").unwrap().as_deref(), Some("done"));
    alias.set_operand_comment(".DN", None).unwrap();
    assert_eq!(alias.operand_comment(".DN").unwrap(), None);

    let delay = controller_tag(&project, "delay");
    let pre = delay.member("PRE").unwrap();
    assert!(pre.operand_comment(".PRE").unwrap_err().is_unsupported_operation());
}
