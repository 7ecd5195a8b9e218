//! Error types for stylesheet loading.
//!
//! Parsing never fails: malformed blocks are dropped and malformed values
//! degrade to an opaque representation. The only failures that surface are
//! environmental (the file could not be read) or misuse of the path-form
//! accessors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or addressing styles.
///
/// # Examples
///
/// ```rust
/// use qss::cascade::CascadeStore;
/// use qss::QssError;
///
/// let mut store = CascadeStore::new();
/// let result = store.load_from_file("does/not/exist.style", true);
/// assert!(matches!(result, Err(QssError::Io { .. })));
/// ```
#[derive(Error, Debug)]
pub enum QssError {
    /// A stylesheet file could not be read.
    #[error("I/O error reading stylesheet {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A `selector->key` path was missing its `->` separator.
    #[error("invalid style path (expected `selector->key`): {0}")]
    InvalidPath(String),
}

pub type Result<T> = std::result::Result<T, QssError>;
