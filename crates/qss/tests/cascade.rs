//! Integration tests for the cascade store: file loading, merging, custom
//! marks, and aliases.

use std::io::Write;

use qss::cascade::CascadeStore;
use qss::emitter::render;
use qss::property::Canonical;
use qss::types::Color;
use qss::QssError;
use tempfile::NamedTempFile;

fn style_file(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(text.as_bytes()).expect("write temp file");
    file
}

#[test]
fn test_get_resolves_variable_to_color() {
    let file = style_file("$c: #112233;\nFoo { color: $c; }");
    let mut store = CascadeStore::new();
    store.load_from_file(file.path(), true).unwrap();

    assert_eq!(store.color("Foo", "color"), Some(Color::rgb(0x11, 0x22, 0x33)));
    assert_eq!(
        store.get("Foo", "color").unwrap().canonical(),
        &Canonical::Color(Color::rgb(0x11, 0x22, 0x33))
    );
}

#[test]
fn test_overwrite_leaves_no_residue() {
    let first = style_file("A { color: red; } B { color: blue; }");
    let second = style_file("C { color: green; }");

    let mut store = CascadeStore::new();
    store.load_from_file(first.path(), true).unwrap();
    store.load_from_file(second.path(), true).unwrap();

    let selectors: Vec<_> = store.iter().map(|(selector, _)| selector).collect();
    assert_eq!(selectors, vec!["C"]);
    assert!(store.get("A", "color").is_none());
}

#[test]
fn test_merge_preserves_untouched_selectors_and_keys() {
    let base = style_file("A { color: red; width: px(10); } B { color: blue; }");
    let overlay = style_file("A { color: black; height: px(3); }");

    let mut store = CascadeStore::new();
    store.load_from_file(base.path(), true).unwrap();
    store.load_from_file(overlay.path(), false).unwrap();

    assert_eq!(store.color("A", "color"), Some(Color::rgb(0, 0, 0)));
    assert_eq!(store.get("A", "width").unwrap().serialize(), "10px");
    assert_eq!(store.get("A", "height").unwrap().serialize(), "3px");
    assert_eq!(store.color("B", "color"), Some(Color::rgb(0, 0, 255)));
}

#[test]
fn test_missing_file_is_an_io_error_and_keeps_state() {
    let mut store = CascadeStore::new();
    store.load_str("A { color: red; }", true);

    let dir = tempfile::tempdir().unwrap();
    let result = store.load_from_file(dir.path().join("missing.style"), true);

    assert!(matches!(result, Err(QssError::Io { .. })));
    assert!(store.get("A", "color").is_some());
}

#[test]
fn test_malformed_value_does_not_abort_the_file() {
    let mut store = CascadeStore::new();
    store.load_str("A { color: #nothex; broken; width: px(2); }\nB { x: y; }", true);

    assert_eq!(store.color("A", "color"), Some(Color::black()));
    assert_eq!(store.get("A", "width").unwrap().serialize(), "2px");
    assert!(store.contains_selector("B"));
}

#[test]
fn test_mark_as_custom_hides_key_but_keeps_value() {
    let mut store = CascadeStore::new();
    store.load_str("Foo { color: red; width: px(1); }", true);
    assert!(store.mark_as_custom("Foo", "color"));

    let text = render(&store);
    assert!(!text.contains("color"));
    assert!(text.contains("width: px(1);"));
    assert_eq!(store.color("Foo", "color"), Some(Color::rgb(255, 0, 0)));
}

#[test]
fn test_alias_renames_emitted_block() {
    let mut store = CascadeStore::new();
    store.load_str("Foo { color: red; }", true);
    assert!(store.alias("Foo", "Foo#1"));

    assert_eq!(render(&store), "Foo#1 {\n    color: red;\n}");
    assert!(store.get("Foo", "color").is_none());
    assert_eq!(store.color("Foo#1", "color"), Some(Color::rgb(255, 0, 0)));
    assert_eq!(store.alias_target("Foo#1"), Some("Foo"));
}

#[test]
fn test_alias_carries_custom_marks() {
    let mut store = CascadeStore::new();
    store.load_str("Foo { color: red; x: 1; }", true);
    store.mark_as_custom("Foo", "color");
    store.alias("Foo", "Foo#1");

    assert_eq!(store.custom_keys().collect::<Vec<_>>(), vec!["Foo#1->color"]);
}

#[test]
fn test_merge_after_alias_recreates_old_selector() {
    let mut store = CascadeStore::new();
    store.load_str("Foo { color: red; }", true);
    store.alias("Foo", "Foo#1");
    store.load_str("Foo { color: blue; }", false);

    assert_eq!(store.color("Foo", "color"), Some(Color::rgb(0, 0, 255)));
    assert_eq!(store.color("Foo#1", "color"), Some(Color::rgb(255, 0, 0)));
}
