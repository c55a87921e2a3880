use l5x::Project;

use crate::helpers::{MULTI_LANGUAGE, PROJECT, project};

#[test]
fn test_output_keeps_declaration_and_content() {
    let out = project().to_xml_string().unwrap();

    assert!(out.starts_with(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#));
    assert!(out.contains(r#"SafetyNetwork="16#0000_4544_03d1_e91a""#));
    assert!(out.contains("<![CDATA[Cycle counter]]>"));
    assert!(out.contains("<Data>00 00 00 00</Data>"));
    assert!(!out.contains("CDATAContent"));
}

#[test]
fn test_untouched_output_is_stable() {
    for fixture in [PROJECT, MULTI_LANGUAGE] {
        let first = Project::parse(fixture).unwrap().to_xml_string().unwrap();
        let second = Project::parse(&first).unwrap().to_xml_string().unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_edits_only_touch_their_tag() {
    let project = project();
    let before = project.to_xml_string().unwrap();

    project
        .controller()
        .tags()
        .get("level")
        .unwrap()
        .set_value(3.0)
        .unwrap();
    let after = project.to_xml_string().unwrap();

    assert_ne!(before, after);
    assert_eq!(
        before.replace(r#"Value="1.5""#, r#"Value="3.0""#),
        after
    );
}

#[test]
fn test_byte_order_mark_is_accepted() {
    let with_bom = format!("\u{feff}{PROJECT}");
    let project = Project::parse(&with_bom).unwrap();
    assert_eq!(project.controller().name(), "plc");
}

#[test]
fn test_crlf_document_keeps_crlf() {
    let lf = Project::parse(PROJECT).unwrap().to_xml_string().unwrap();
    let source = PROJECT.replace('\n', "\r\n");
    let project = Project::parse(&source).unwrap();

    let out = project.to_xml_string().unwrap();
    assert_eq!(out, lf.replace("\r\n", "\n").replace('\n', "\r\n"));

    project
        .controller()
        .tags()
        .get("count")
        .unwrap()
        .set_description(Some("first\nsecond"))
        .unwrap();
    let out = project.to_xml_string().unwrap();
    assert!(out.contains("<![CDATA[first\r\nsecond]]>"));
    assert!(!out.replace("\r\n", "").contains('\n'));
}
