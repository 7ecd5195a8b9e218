//! Loading stylesheets and handing them to the host toolkit.
//!
//! The loader owns the application's [`CascadeStore`] and a [`StyleSink`],
//! the host's global "set stylesheet" call. The application root builds one
//! loader and passes it by reference to whatever needs style lookups.
//!
//! ```
//! use qss::loader::{StyleLoader, StyleSink};
//!
//! #[derive(Default)]
//! struct Captured(String);
//!
//! impl StyleSink for Captured {
//!     fn apply_stylesheet(&mut self, text: &str) {
//!         self.0 = text.to_string();
//!     }
//! }
//!
//! let mut loader = StyleLoader::new(Captured::default());
//! loader.store_mut().load_str("QLabel { color: red; }", true);
//! loader.apply();
//! assert_eq!(loader.sink().0, "QLabel {\n    color: red;\n}");
//! ```

use std::path::{Path, PathBuf};

use crate::cascade::CascadeStore;
use crate::emitter::{RenderOptions, custom_entries, render_with};
use crate::error::Result;

/// Receives the emitted stylesheet text.
pub trait StyleSink {
    fn apply_stylesheet(&mut self, text: &str);
}

impl StyleSink for String {
    fn apply_stylesheet(&mut self, text: &str) {
        self.clear();
        self.push_str(text);
    }
}

/// Loader configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoaderOptions {
    /// Stylesheet loaded at construction, if any.
    pub path: Option<PathBuf>,
    /// Whether [`StyleLoader::update`] replaces the store or merges into it.
    pub overwrite: bool,
    pub render: RenderOptions,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            path: None,
            overwrite: true,
            render: RenderOptions::default(),
        }
    }
}

impl LoaderOptions {
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn with_render(mut self, render: RenderOptions) -> Self {
        self.render = render;
        self
    }
}

pub struct StyleLoader<S: StyleSink> {
    store: CascadeStore,
    sink: S,
    options: LoaderOptions,
}

impl<S: StyleSink> StyleLoader<S> {
    /// A loader with an empty store. Nothing is applied until [`apply`](Self::apply).
    pub fn new(sink: S) -> Self {
        Self {
            store: CascadeStore::new(),
            sink,
            options: LoaderOptions::default(),
        }
    }

    /// Loads `options.path` (if set) and applies the result.
    pub fn with_options(sink: S, options: LoaderOptions) -> Result<Self> {
        let mut loader = Self {
            store: CascadeStore::new(),
            sink,
            options,
        };
        if let Some(path) = loader.options.path.clone() {
            loader.store.load_from_file(&path, true)?;
        }
        loader.apply();
        Ok(loader)
    }

    /// Switches to a new stylesheet file and re-applies.
    ///
    /// The store is replaced or merged according to `options.overwrite`.
    pub fn update(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.store.load_from_file(path, self.options.overwrite)?;
        self.options.path = Some(path.to_path_buf());
        self.apply();
        Ok(())
    }

    /// Merges another stylesheet file on top of the store and re-applies.
    pub fn merge(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.store.load_from_file(path, false)?;
        self.apply();
        Ok(())
    }

    /// Re-reads the current path, if any, and re-applies.
    pub fn reload(&mut self) -> Result<()> {
        match self.options.path.clone() {
            Some(path) => self.update(path),
            None => {
                self.apply();
                Ok(())
            }
        }
    }

    /// Renders the store and hands the text to the sink.
    pub fn apply(&mut self) {
        for (path, entry) in custom_entries(&self.store) {
            log::debug!("custom {} = {} (applied by widget)", path, entry.canonical_text());
        }

        let text = render_with(&self.store, &self.options.render);
        log::trace!("applying stylesheet ({} bytes)", text.len());
        self.sink.apply_stylesheet(&text);
    }

    pub fn store(&self) -> &CascadeStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut CascadeStore {
        &mut self.store
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn path(&self) -> Option<&Path> {
        self.options.path.as_deref()
    }

    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }
}
