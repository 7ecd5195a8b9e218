//! # QSS - Quof stylesheet engine
//!
//! Reads Quof's `.style` files (a small Qt-stylesheet dialect with
//! variables and typed constructor calls), keeps the resulting declarations
//! in a mergeable cascade store, and writes the store back out as plain
//! stylesheet text for the widget toolkit.
//!
//! ## Quick Start
//!
//! ```rust
//! use qss::cascade::CascadeStore;
//! use qss::emitter::render;
//! use qss::types::Color;
//!
//! let source = r#"
//!     $accent: #3d7eff;
//!
//!     QPushButton, QToolButton {
//!         color: $accent;
//!         margin: margin(2, 4, 2, 4);
//!     }
//! "#;
//!
//! let mut store = CascadeStore::new();
//! store.load_str(source, true);
//!
//! assert_eq!(store.color("QToolButton", "color"), Some(Color::rgb(0x3d, 0x7e, 0xff)));
//! assert_eq!(store.get("QPushButton", "margin").unwrap().serialize(), "2px 4px 2px 4px");
//!
//! store.mark_as_custom("QToolButton", "color");
//! assert!(!render(&store).contains("QToolButton {\n    color"));
//! ```
//!
//! ## Stylesheet Format
//!
//! ```text
//! document     := (variable | rule)*
//! variable     := "$" name ":" value ";"
//! rule         := selector ("," selector)* "{" (key ":" value ";")* "}"
//! value        := functionCall | "#hex" | colorName | "transparent" | text
//! functionCall := name "(" arg ("," arg)* ")"
//! ```
//!
//! Double-quoted strings may contain any structural character. There are no
//! comments, no nested blocks, and no selector combinators.
//!
//! ## Modules
//!
//! - [`parser`]: sectioning, variables, and value classification
//! - [`property`]: the constructor registry and canonical values
//! - [`cascade`]: the selector/key store with custom marks and aliases
//! - [`emitter`]: store to stylesheet text
//! - [`loader`]: store ownership and delivery to the toolkit
//! - [`book`]: namespaced style objects for self-painting widgets
//! - [`types`]: colors and the named color table
//! - [`error`]: error types

pub mod book;
pub mod cascade;
pub mod emitter;
pub mod error;
pub mod loader;
pub mod parser;
pub mod property;
pub mod types;

pub use cascade::{CascadeEntry, CascadeStore};
pub use emitter::render;
pub use error::QssError;
pub use loader::{LoaderOptions, StyleLoader, StyleSink};
pub use property::PropertyValue;
pub use types::Color;
