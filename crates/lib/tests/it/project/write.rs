use l5x::{Project, Value};
use tempfile::TempDir;

use crate::helpers::{PROJECT, project};

#[test]
fn test_write_then_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plc.L5X");

    let project = project();
    let count = project.controller().tags().get("count").unwrap();
    count.set_value(1234).unwrap();
    project.write(&path).unwrap();

    let loaded = Project::load(&path).unwrap();
    let count = loaded.controller().tags().get("count").unwrap();
    assert_eq!(count.value().unwrap(), Value::Int(1234));
}

#[test]
fn test_write_replaces_existing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plc.L5X");
    std::fs::write(&path, "stale").unwrap();

    project().write(&path).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("<?xml"));
    assert!(written.contains("<RSLogix5000Content"));

    let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(leftovers, 1);
}

#[test]
fn test_write_to_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("plc.L5X");

    let err = project().write(&path).unwrap_err();
    assert!(err.is_io_error());
    assert!(!path.exists());
}

#[test]
fn test_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = Project::load(dir.path().join("absent.L5X")).unwrap_err();
    assert!(err.is_io_error());
    assert_eq!(err.module(), "io");
}

#[test]
fn test_load_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plc.L5X");
    std::fs::write(&path, PROJECT).unwrap();

    let loaded = Project::load(&path).unwrap();
    assert_eq!(loaded.controller().name(), "plc");
}
