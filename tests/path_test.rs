//! Tests for relative path computation

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use vvkit::util::path::relative_path;

#[test]
fn given_sibling_dirs_when_computing_relative_path_then_walks_up_and_down() {
    let temp = TempDir::new().unwrap();
    let from = temp.path().join("a/b");
    let to = temp.path().join("c/d.txt");
    fs::create_dir_all(&from).unwrap();
    fs::create_dir_all(to.parent().unwrap()).unwrap();
    fs::write(&to, "x").unwrap();

    let rel = relative_path(&from, &to).unwrap();

    assert_eq!(rel, PathBuf::from("../../c/d.txt"));
}

#[test]
fn given_nested_target_when_computing_relative_path_then_descends() {
    let temp = TempDir::new().unwrap();
    let to = temp.path().join("x/y");
    fs::create_dir_all(&to).unwrap();

    assert_eq!(relative_path(temp.path(), &to).unwrap(), PathBuf::from("x/y"));
}

#[test]
fn given_same_path_when_computing_relative_path_then_empty() {
    let temp = TempDir::new().unwrap();
    assert_eq!(relative_path(temp.path(), temp.path()).unwrap(), PathBuf::new());
}

#[test]
fn given_missing_path_when_computing_relative_path_then_not_found() {
    let temp = TempDir::new().unwrap();
    let err = relative_path(temp.path(), &temp.path().join("ghost")).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}
