//! Namespaced style objects.
//!
//! Where the [`CascadeStore`](crate::cascade::CascadeStore) feeds the
//! toolkit's stylesheet, the [`StyleBook`] serves widgets that paint
//! themselves: each widget family gets a namespace, and within it an item
//! such as `"Tab:selected:hover"` addresses a [`StyleObject`] named `Tab`
//! with the state path `["selected", "hover"]`.
//!
//! Values loaded into a book go through the property registry when they are
//! colors (`#hex`, a color name, `transparent`) or calls to a registered
//! constructor. Everything else keeps its source text.

use std::path::Path;

use indexmap::IndexMap;

use crate::error::{QssError, Result};
use crate::parser::{ValueKind, parse_stylesheet};
use crate::property::{Canonical, PropertyValue, cast, is_registered};

/// A named set of property values for one widget part and state path.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleObject {
    name: String,
    path: Vec<String>,
    values: IndexMap<String, PropertyValue>,
}

impl StyleObject {
    pub fn new(name: impl Into<String>, path: Vec<String>) -> Self {
        Self {
            name: name.into(),
            path,
            values: IndexMap::new(),
        }
    }

    /// Splits an item like `"Tab:selected"` into name and state path.
    pub fn from_item(item: &str) -> Self {
        let mut parts = item.split(':');
        let name = parts.next().unwrap_or_default();
        Self::new(name, parts.map(str::to_string).collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Stores a value; dashes in the key become underscores.
    pub fn set_value(&mut self, key: &str, value: PropertyValue) {
        self.values.insert(key.replace('-', "_"), value);
    }

    /// Reads a value by its key, with dashes or underscores.
    pub fn value(&self, key: &str) -> Option<&PropertyValue> {
        self.values.get(&key.replace('-', "_"))
    }

    pub fn values(&self) -> &IndexMap<String, PropertyValue> {
        &self.values
    }

    /// Renders `key: value;` lines using each value's canonical text.
    pub fn to_declarations(&self) -> String {
        self.values
            .iter()
            .map(|(key, value)| format!("{}: {};", key, value.serialize()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Style objects grouped by namespace, then item.
#[derive(Clone, Debug, Default)]
pub struct StyleBook {
    namespaces: IndexMap<String, IndexMap<String, StyleObject>>,
}

impl StyleBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exists(&self, namespace: &str, item: &str) -> bool {
        self.get(namespace, item).is_some()
    }

    pub fn get(&self, namespace: &str, item: &str) -> Option<&StyleObject> {
        self.namespaces.get(namespace)?.get(item)
    }

    /// Returns the object for `item`, registering an empty one if needed.
    pub fn entry(&mut self, namespace: &str, item: &str) -> &mut StyleObject {
        self.namespaces
            .entry(namespace.to_string())
            .or_default()
            .entry(item.to_string())
            .or_insert_with(|| StyleObject::from_item(item))
    }

    /// Registers (or replaces) an object and returns it.
    pub fn register(
        &mut self,
        namespace: &str,
        item: &str,
        object: StyleObject,
    ) -> &mut StyleObject {
        let items = self.namespaces.entry(namespace.to_string()).or_default();
        items.insert(item.to_string(), object);
        &mut items[item]
    }

    /// All objects of a namespace; empty when the namespace is unknown.
    pub fn namespace(&self, namespace: &str) -> impl Iterator<Item = (&str, &StyleObject)> {
        self.namespaces
            .get(namespace)
            .into_iter()
            .flat_map(|items| items.iter().map(|(item, object)| (item.as_str(), object)))
    }

    /// Loads stylesheet text into a namespace, upserting per item and key.
    pub fn load_str(&mut self, namespace: &str, text: &str) {
        let sheet = parse_stylesheet(text);

        for rule in &sheet.rules {
            for (key, descriptor) in &rule.declarations {
                let value = match &descriptor.kind {
                    ValueKind::FunctionCall { name, .. } if !is_registered(name) => {
                        verbatim(&descriptor.serialized)
                    }
                    ValueKind::Unknown { .. } => verbatim(&descriptor.serialized),
                    _ => cast(descriptor),
                };

                for selector in &rule.selectors {
                    self.entry(namespace, selector).set_value(key, value.clone());
                }
            }
        }
    }

    pub fn load_from_file(&mut self, namespace: &str, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| QssError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_str(namespace, &text);
        log::debug!("loaded {} into style namespace `{}`", path.display(), namespace);
        Ok(())
    }
}

fn source_text(canonical: &Canonical) -> String {
    match canonical {
        Canonical::Text(text) => text.clone(),
        _ => String::new(),
    }
}

/// A property that writes back exactly the given source text.
fn verbatim(serialized: &str) -> PropertyValue {
    PropertyValue::new(Canonical::Text(serialized.to_string()), None, source_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    #[test]
    fn test_item_path_split() {
        let object = StyleObject::from_item("Tab:selected:hover");
        assert_eq!(object.name(), "Tab");
        assert_eq!(object.path(), ["selected", "hover"]);
        assert!(StyleObject::from_item("Tab").path().is_empty());
    }

    #[test]
    fn test_entry_registers_once() {
        let mut book = StyleBook::new();
        assert!(!book.exists("tabs", "Tab"));
        book.entry("tabs", "Tab");
        assert!(book.exists("tabs", "Tab"));
        assert!(!book.exists("other", "Tab"));
        assert_eq!(book.namespace("tabs").count(), 1);
        assert_eq!(book.namespace("missing").count(), 0);
    }

    #[test]
    fn test_load_constructs_registered_calls() {
        let mut book = StyleBook::new();
        book.load_str(
            "editor",
            "LineNumbers, Minimap { background-color: color(10, 20, 30); padding: px(4); }",
        );
        let numbers = book.get("editor", "LineNumbers").unwrap();
        assert_eq!(
            numbers.value("background-color").and_then(PropertyValue::as_color),
            Some(Color::rgb(10, 20, 30))
        );
        assert_eq!(numbers.value("padding").unwrap().serialize(), "4px");
        assert!(book.exists("editor", "Minimap"));
    }

    #[test]
    fn test_load_builds_colors_from_hex_names_and_transparent() {
        let mut book = StyleBook::new();
        book.load_str(
            "editor",
            "LineNumbers { color: #FF00AA; background: red; border-color: transparent; }",
        );
        let numbers = book.get("editor", "LineNumbers").unwrap();
        assert_eq!(
            numbers.value("color").and_then(PropertyValue::as_color),
            Some(Color::rgb(255, 0, 170))
        );
        assert_eq!(
            numbers.value("background").and_then(PropertyValue::as_color),
            Some(Color::rgb(255, 0, 0))
        );
        assert_eq!(
            numbers.value("border-color").and_then(PropertyValue::as_color),
            Some(Color::transparent())
        );
        assert_eq!(numbers.value("color").unwrap().serialize(), "rgba(255,0,170,255)");
    }

    #[test]
    fn test_load_keeps_other_values_verbatim() {
        let mut book = StyleBook::new();
        book.load_str(
            "editor",
            "Gutter { font: \"Fira Code\"; shadow: glow(2, 4); color: #FF00AA; }",
        );
        let gutter = book.get("editor", "Gutter").unwrap();
        assert_eq!(gutter.value("font").unwrap().serialize(), "\"Fira Code\"");
        assert_eq!(gutter.value("shadow").unwrap().serialize(), "glow(2, 4)");
        assert_eq!(
            gutter.value("color").and_then(PropertyValue::as_color),
            Some(Color::rgb(255, 0, 170))
        );
        assert_eq!(
            gutter.to_declarations(),
            "font: \"Fira Code\";\nshadow: glow(2, 4);\ncolor: rgba(255,0,170,255);"
        );
    }

    #[test]
    fn test_keys_are_normalized() {
        let mut object = StyleObject::new("Tab", vec![]);
        object.set_value("border-radius", verbatim("4"));
        assert!(object.values().contains_key("border_radius"));
        assert!(object.value("border-radius").is_some());
    }
}
