use l5x::Value;

use super::helpers::{controller_tag, xml};
use crate::helpers::{project, reload, tag_xml};

#[test]
fn test_dint_round_trip() {
    let project = project();
    let count = controller_tag(&project, "count");

    for v in [0, 1, -1, 123_456, i64::from(i32::MAX), i64::from(i32::MIN)] {
        count.set_value(v).unwrap();
        assert_eq!(count.value().unwrap(), Value::Int(v));
    }

    let reloaded = reload(&project);
    assert_eq!(
        controller_tag(&reloaded, "count").value().unwrap(),
        Value::Int(i64::from(i32::MIN))
    );
}

#[test]
fn test_integer_out_of_range_is_rejected() {
    let project = project();
    let count = controller_tag(&project, "count");
    let small = controller_tag(&project, "small");

    let err = count.set_value(i64::from(i32::MAX) + 1).unwrap_err();
    assert!(err.is_type_mismatch());
    let err = small.set_value(128).unwrap_err();
    assert!(err.is_type_mismatch());
    small.set_value(-128).unwrap();
    assert_eq!(small.value().unwrap(), Value::Int(-128));

    // Failed writes leave the stored value alone.
    assert_eq!(count.value().unwrap(), Value::Int(0));
}

#[test]
fn test_integer_rejects_other_value_kinds() {
    let project = project();
    let count = controller_tag(&project, "count");

    assert!(count.set_value(1.0).unwrap_err().is_type_mismatch());
    assert!(count.set_value(vec![1, 2]).unwrap_err().is_type_mismatch());
}

#[test]
fn test_bool_accepts_only_zero_or_one() {
    let project = project();
    let running = controller_tag(&project, "running");

    running.set_value(true).unwrap();
    assert_eq!(running.value().unwrap(), Value::Int(1));
    running.set_value(0).unwrap();
    assert_eq!(running.value().unwrap(), Value::Int(0));
    assert!(running.set_value(2).unwrap_err().is_type_mismatch());
    assert!(running.bit(0).unwrap_err().is_unsupported_operation());
}

#[test]
fn test_real_values() {
    let project = project();
    let level = controller_tag(&project, "level");

    assert_eq!(level.value().unwrap(), Value::Real(1.5));
    level.set_value(-2.25).unwrap();
    assert_eq!(level.value().unwrap(), Value::Real(-2.25));

    assert!(level.set_value(2).unwrap_err().is_type_mismatch());
    assert!(level.set_value(f64::NAN).unwrap_err().is_invalid_value());
    assert!(level.set_value(f64::INFINITY).unwrap_err().is_invalid_value());
    assert_eq!(level.value().unwrap(), Value::Real(-2.25));

    assert!(level.bit(0).unwrap_err().is_unsupported_operation());
}

#[test]
fn test_real_outside_range_is_rejected() {
    let project = project();
    let level = controller_tag(&project, "level");

    assert!(level.set_value(1e300).unwrap_err().is_invalid_value());
    assert!(level.set_value(-1e39).unwrap_err().is_invalid_value());
    assert_eq!(level.value().unwrap(), Value::Real(1.5));

    let max = f64::from(f32::MAX);
    level.set_value(max).unwrap();
    assert_eq!(level.value().unwrap(), Value::Real(max));
}

#[test]
fn test_exponential_real_round_trip() {
    let project = project();
    let gain = controller_tag(&project, "gain");

    assert_eq!(gain.value().unwrap(), Value::Real(0.25));
    gain.set_value(1.2345678901234).unwrap();
    assert_eq!(gain.value().unwrap(), Value::Real(1.2345678901234));
    assert!(tag_xml(&xml(&project), "gain").contains(r#"Value="1.2345678901234e+000""#));

    gain.set_value(0.5).unwrap();
    assert!(tag_xml(&xml(&project), "gain").contains(r#"Value="5.00000000e-001""#));

    gain.set_value(-1.2345678901234e-20).unwrap();
    let reloaded = reload(&project);
    assert_eq!(
        controller_tag(&reloaded, "gain").value().unwrap(),
        Value::Real(-1.2345678901234e-20)
    );
}

#[test]
fn test_hex_radix_is_preserved() {
    let project = project();
    let flags = controller_tag(&project, "flags");

    flags.set_value(-1).unwrap();
    assert_eq!(flags.value().unwrap(), Value::Int(-1));
    assert!(tag_xml(&xml(&project), "flags").contains(r#"Value="16#ffff""#));

    flags.set_value(0x1234).unwrap();
    assert!(tag_xml(&xml(&project), "flags").contains(r#"Value="16#1234""#));
}

#[test]
fn test_bit_access() {
    let project = project();
    let count = controller_tag(&project, "count");

    count.bit(3).unwrap().set_value(1).unwrap();
    assert_eq!(count.value().unwrap(), Value::Int(8));
    assert_eq!(count.bit(3).unwrap().value().unwrap(), Value::Int(1));
    assert_eq!(count.get(2usize).unwrap().value().unwrap(), Value::Int(0));

    count.bit(3).unwrap().set_value(false).unwrap();
    assert_eq!(count.value().unwrap(), Value::Int(0));

    assert!(count.bit(3).unwrap().set_value(2).unwrap_err().is_type_mismatch());
    assert!(count.bit(32).unwrap_err().is_index_out_of_range());
    assert_eq!(count.bit(31).unwrap().path(), "count.31");
}

#[test]
fn test_sign_bit_makes_value_negative() {
    let project = project();
    let small = controller_tag(&project, "small");

    small.bit(7).unwrap().set_value(1).unwrap();
    assert_eq!(small.value().unwrap(), Value::Int(-128));
}

#[test]
fn test_member_access_on_atomic_is_unsupported() {
    let project = project();
    let count = controller_tag(&project, "count");

    assert!(count.member("PRE").unwrap_err().is_unsupported_operation());
    assert!(count.names().unwrap_err().is_unsupported_operation());
    assert!(count.shape().unwrap_err().is_unsupported_operation());
}

#[test]
fn test_value_write_strips_raw_data() {
    let project = project();
    let count = controller_tag(&project, "count");

    assert!(tag_xml(&xml(&project), "count").contains("<Data>00 00 00 00</Data>"));
    count.set_value(5).unwrap();
    let after = xml(&project);
    let tag = tag_xml(&after, "count");
    assert!(!tag.contains("<Data>00 00 00 00</Data>"));
    assert!(tag.contains(r#"<Data Format="Decorated">"#));
}
