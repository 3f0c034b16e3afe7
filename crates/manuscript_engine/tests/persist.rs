use std::fs;

use manuscript_engine::{OutputDir, PersistError};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn prepare_creates_missing_directories() {
    let temp = TempDir::new().unwrap();
    let nested = temp.path().join("public").join("feeds");
    assert!(!nested.exists());

    OutputDir::new(&nested).prepare().unwrap();
    assert!(nested.is_dir());
}

#[test]
fn write_replaces_previous_artifact() {
    let temp = TempDir::new().unwrap();
    let output = OutputDir::new(temp.path());

    let first = output.write_atomic("rss.xml", b"<rss/>").unwrap();
    assert_eq!(first, temp.path().join("rss.xml"));
    assert_eq!(fs::read_to_string(&first).unwrap(), "<rss/>");

    let second = output.write_atomic("rss.xml", b"<rss>v2</rss>").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "<rss>v2</rss>");

    // Only the artifact remains; the temp file was renamed away.
    let entries = fs::read_dir(temp.path()).unwrap().count();
    assert_eq!(entries, 1);
}

#[test]
fn file_in_place_of_directory_is_rejected() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("public");
    fs::write(&blocker, "x").unwrap();

    let result = OutputDir::new(&blocker).write_atomic("rss.xml", b"data");
    assert!(matches!(result, Err(PersistError::OutputDir { .. })));
    assert!(!temp.path().join("rss.xml").exists());
    assert_eq!(fs::read_to_string(&blocker).unwrap(), "x");
}
