//! The cascade store.
//!
//! The store maps a selector to its declarations, and each declaration key
//! to a [`CascadeEntry`]. Both levels keep insertion order, which is the
//! order the emitter writes them in.
//!
//! ## Loading
//!
//! - `overwrite = true`: the file is parsed into a fresh store which then
//!   replaces this one wholesale (aliases and custom marks included)
//! - `overwrite = false`: each `(selector, key)` in the file is upserted;
//!   untouched selectors and keys survive
//!
//! In both modes a declaration replaces the whole entry, so a re-loaded key
//! loses any custom mark it had.
//!
//! Within one document, "last write wins" per selector and key.
//!
//! ## Custom keys and aliases
//!
//! - [`CascadeStore::mark_as_custom`] keeps a value in the store but out of
//!   the emitted stylesheet; the consumer applies it directly
//! - [`CascadeStore::alias`] moves a selector's declarations under a new
//!   name; the old name no longer resolves
//!
//! Both are silent no-ops when the target does not exist, so generic widget
//! code can call them speculatively.

use std::collections::HashMap;
use std::path::Path;

use indexmap::IndexMap;

use crate::error::{QssError, Result};
use crate::parser::{StyleSheet, parse_stylesheet};
use crate::property::{PropertyValue, cast};
use crate::types::Color;

/// Separator between selector and key in path-form addresses.
pub const PATH_SEPARATOR: &str = "->";

/// Splits a `selector->key` path.
pub fn split_path(path: &str) -> Result<(&str, &str)> {
    path.split_once(PATH_SEPARATOR)
        .ok_or_else(|| QssError::InvalidPath(path.to_string()))
}

/// Joins a selector and key into a `selector->key` path.
pub fn join_path(selector: &str, key: &str) -> String {
    format!("{}{}{}", selector, PATH_SEPARATOR, key)
}

/// One stored declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct CascadeEntry {
    /// The registry-constructed value.
    pub cast: PropertyValue,
    /// The declaration's source text, emitted verbatim.
    pub serialized: String,
    /// Custom entries are never emitted.
    pub custom: bool,
}

impl CascadeEntry {
    /// The registry's canonical text for this entry, wrap included.
    pub fn canonical_text(&self) -> String {
        self.cast.serialize()
    }
}

/// Declarations of a single selector, in insertion order.
pub type Declarations = IndexMap<String, CascadeEntry>;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CascadeStore {
    selectors: IndexMap<String, Declarations>,
    /// New name -> the selector it was aliased from.
    aliases: HashMap<String, String>,
}

impl CascadeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from already-parsed rules.
    pub fn from_stylesheet(sheet: &StyleSheet) -> Self {
        let mut store = Self::new();
        store.merge_stylesheet(sheet);
        store
    }

    /// Loads a stylesheet file.
    ///
    /// I/O failures are returned untouched and leave the store as it was.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>, overwrite: bool) -> Result<()> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| QssError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        self.load_str(&text, overwrite);
        log::debug!(
            "loaded {} (overwrite={}): {} selectors in store",
            path.display(),
            overwrite,
            self.selectors.len()
        );
        Ok(())
    }

    /// Loads stylesheet text; see the module docs for `overwrite`.
    pub fn load_str(&mut self, text: &str, overwrite: bool) {
        let sheet = parse_stylesheet(text);
        if overwrite {
            *self = Self::from_stylesheet(&sheet);
        } else {
            self.merge_stylesheet(&sheet);
        }
    }

    fn merge_stylesheet(&mut self, sheet: &StyleSheet) {
        for rule in &sheet.rules {
            for selector in &rule.selectors {
                let declarations = self.selectors.entry(selector.clone()).or_default();
                for (key, descriptor) in &rule.declarations {
                    declarations.insert(
                        key.clone(),
                        CascadeEntry {
                            cast: cast(descriptor),
                            serialized: descriptor.serialized.clone(),
                            custom: false,
                        },
                    );
                }
            }
        }
    }

    /// Point lookup of a canonical value.
    pub fn get(&self, selector: &str, key: &str) -> Option<&PropertyValue> {
        self.entry(selector, key).map(|entry| &entry.cast)
    }

    /// Point lookup with a caller-supplied fallback.
    pub fn get_or<'a>(
        &'a self,
        selector: &str,
        key: &str,
        default: &'a PropertyValue,
    ) -> &'a PropertyValue {
        self.get(selector, key).unwrap_or(default)
    }

    /// Lookup by `selector->key` path.
    pub fn get_path(&self, path: &str) -> Result<Option<&PropertyValue>> {
        let (selector, key) = split_path(path)?;
        Ok(self.get(selector, key))
    }

    /// Typed color lookup; `None` if absent or not a color.
    pub fn color(&self, selector: &str, key: &str) -> Option<Color> {
        self.get(selector, key).and_then(PropertyValue::as_color)
    }

    pub fn entry(&self, selector: &str, key: &str) -> Option<&CascadeEntry> {
        self.selectors.get(selector)?.get(key)
    }

    pub fn declarations(&self, selector: &str) -> Option<&Declarations> {
        self.selectors.get(selector)
    }

    pub fn contains_selector(&self, selector: &str) -> bool {
        self.selectors.contains_key(selector)
    }

    /// All selectors with their declarations, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Declarations)> {
        self.selectors
            .iter()
            .map(|(selector, declarations)| (selector.as_str(), declarations))
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    /// Excludes an existing entry from emitted text. Returns whether an
    /// entry was marked; a missing entry is left missing.
    pub fn mark_as_custom(&mut self, selector: &str, key: &str) -> bool {
        match self
            .selectors
            .get_mut(selector)
            .and_then(|declarations| declarations.get_mut(key))
        {
            Some(entry) => {
                entry.custom = true;
                log::debug!("marked {} as custom", join_path(selector, key));
                true
            }
            None => {
                log::debug!("mark_as_custom: no entry {}", join_path(selector, key));
                false
            }
        }
    }

    /// [`mark_as_custom`](Self::mark_as_custom) by `selector->key` path.
    pub fn mark_path_as_custom(&mut self, path: &str) -> Result<bool> {
        let (selector, key) = split_path(path)?;
        Ok(self.mark_as_custom(selector, key))
    }

    /// Paths of all custom-marked entries.
    pub fn custom_keys(&self) -> impl Iterator<Item = String> + '_ {
        self.selectors.iter().flat_map(|(selector, declarations)| {
            declarations
                .iter()
                .filter(|(_, entry)| entry.custom)
                .map(move |(key, _)| join_path(selector, key))
        })
    }

    /// Moves `selector`'s declarations under `new_name`.
    ///
    /// The moved block keeps its position in emission order. Afterwards
    /// lookups go through `new_name` and `selector` no longer resolves. If
    /// `new_name` already had declarations they are replaced. Returns
    /// whether anything moved.
    // TODO: decide whether the original selector should stay resolvable
    // once widget instance selectors are generated for every tab.
    pub fn alias(&mut self, selector: &str, new_name: &str) -> bool {
        if selector == new_name {
            return self.selectors.contains_key(selector);
        }

        let Some((index, _, declarations)) = self.selectors.shift_remove_full(selector) else {
            log::debug!("alias: no selector `{}` to rename to `{}`", selector, new_name);
            return false;
        };

        self.selectors.shift_remove(new_name);
        let index = index.min(self.selectors.len());
        self.selectors
            .shift_insert(index, new_name.to_string(), declarations);

        // An aliased alias still points at the first selector.
        let original = self
            .aliases
            .remove(selector)
            .unwrap_or_else(|| selector.to_string());
        log::debug!("aliased `{}` as `{}`", original, new_name);
        self.aliases.insert(new_name.to_string(), original);
        true
    }

    /// The selector a name was aliased from, if any.
    pub fn alias_target(&self, new_name: &str) -> Option<&str> {
        self.aliases.get(new_name).map(String::as_str)
    }

    /// All `(new name, original selector)` alias records.
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases
            .iter()
            .map(|(new_name, original)| (new_name.as_str(), original.as_str()))
    }
}
