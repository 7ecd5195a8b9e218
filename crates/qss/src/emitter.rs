//! Flattens a [`CascadeStore`] back into stylesheet text.
//!
//! Output layout, with the default [`RenderOptions`]:
//!
//! ```text
//! QPushButton {
//!     color: #FF00AA;
//!     border: border(1, white, gray);
//! }
//! QLabel {
//!     margin: margin(2,4,6,8);
//! }
//! ```
//!
//! Values are the declarations' source text. Custom-marked keys are left
//! out; [`custom_entries`] lists them for the consumer to apply itself.
//! Selectors with nothing to emit produce no block.

use crate::cascade::{CascadeEntry, CascadeStore, join_path};

/// Formatting knobs for [`render_with`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Prefix of every declaration line.
    pub indent: String,
    /// Placed between consecutive blocks.
    pub block_separator: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: "    ".to_string(),
            block_separator: "\n".to_string(),
        }
    }
}

impl RenderOptions {
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    pub fn with_block_separator(mut self, separator: impl Into<String>) -> Self {
        self.block_separator = separator.into();
        self
    }
}

/// Renders the store with the default options.
pub fn render(store: &CascadeStore) -> String {
    render_with(store, &RenderOptions::default())
}

pub fn render_with(store: &CascadeStore, options: &RenderOptions) -> String {
    let mut blocks = Vec::new();

    for (selector, declarations) in store.iter() {
        let lines: Vec<String> = declarations
            .iter()
            .filter(|(_, entry)| !entry.custom)
            .map(|(key, entry)| format!("{}{}: {};", options.indent, key, entry.serialized))
            .collect();

        if lines.is_empty() {
            log::trace!("skipping `{}`: nothing to emit", selector);
            continue;
        }

        let skipped = declarations.len() - lines.len();
        if skipped > 0 {
            log::debug!("`{}`: {} custom keys left to the consumer", selector, skipped);
        }

        blocks.push(format!("{} {{\n{}\n}}", selector, lines.join("\n")));
    }

    blocks.join(&options.block_separator)
}

/// Custom-marked entries as `(selector->key, entry)` pairs, in store order.
pub fn custom_entries(store: &CascadeStore) -> Vec<(String, &CascadeEntry)> {
    store
        .iter()
        .flat_map(|(selector, declarations)| {
            declarations
                .iter()
                .filter(|(_, entry)| entry.custom)
                .map(move |(key, entry)| (join_path(selector, key), entry))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(text: &str) -> CascadeStore {
        let mut store = CascadeStore::new();
        store.load_str(text, true);
        store
    }

    #[test]
    fn test_render_single_block() {
        let store = store("A { color: red; width: px(2); }");
        assert_eq!(render(&store), "A {\n    color: red;\n    width: px(2);\n}");
    }

    #[test]
    fn test_render_skips_fully_custom_selector() {
        let mut store = store("A { color: red; } B { x: 1; }");
        store.mark_as_custom("A", "color");
        assert_eq!(render(&store), "B {\n    x: 1;\n}");
    }

    #[test]
    fn test_render_empty_block_is_omitted() {
        let store = store("A { } B { x: 1; }");
        assert_eq!(render(&store), "B {\n    x: 1;\n}");
    }

    #[test]
    fn test_render_with_options() {
        let store = store("A { x: 1; } B { y: 2; }");
        let options = RenderOptions::default()
            .with_indent("\t")
            .with_block_separator("\n\n");
        assert_eq!(
            render_with(&store, &options),
            "A {\n\tx: 1;\n}\n\nB {\n\ty: 2;\n}"
        );
    }

    #[test]
    fn test_custom_entries() {
        let mut store = store("A { color: red; x: 1; }");
        store.mark_as_custom("A", "color");
        let custom = custom_entries(&store);
        assert_eq!(custom.len(), 1);
        assert_eq!(custom[0].0, "A->color");
        assert_eq!(custom[0].1.canonical_text(), "rgba(255,0,0,255)");
    }
}
