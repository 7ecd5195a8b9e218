//! Stylesheet parsing.
//!
//! The pipeline runs in two passes:
//!
//! - [`sectioner::section`] walks the text once and produces raw
//!   `(selectors, body)` blocks plus the document's variable bindings
//! - [`values::parse_declarations`] splits each body and classifies every
//!   value, substituting variables
//!
//! [`parse_stylesheet`] runs both and returns a [`StyleSheet`].
//!
//! ## Submodules
//!
//! - [`quotes`]: quote spans and quote-aware splitting
//! - [`sectioner`]: block and variable sectioning
//! - [`values`]: value descriptors and declaration splitting
//! - [`variables`]: document-scoped `$name` bindings
//!
//! ## Example
//!
//! ```rust
//! use qss::parser::{parse_stylesheet, ValueKind};
//!
//! let sheet = parse_stylesheet("$c: #112233;\nQLabel, QLineEdit { color: $c; }");
//! let rule = &sheet.rules[0];
//!
//! assert_eq!(rule.selectors, vec!["QLabel", "QLineEdit"]);
//! assert_eq!(
//!     rule.declarations["color"].kind,
//!     ValueKind::HexColor { text: "#112233".into() }
//! );
//! ```

pub mod quotes;
pub mod sectioner;
pub mod values;
pub mod variables;

use indexmap::IndexMap;

pub use crate::parser::quotes::{QuoteSpans, split_outside_quotes};
pub use crate::parser::sectioner::{RawDeclaration, Sections, section};
pub use crate::parser::values::{
    Argument, Arguments, ValueDescriptor, ValueKind, parse_declarations, parse_value,
};
pub use crate::parser::variables::VariableBindings;

/// A block with its declarations parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    pub selectors: Vec<String>,
    /// Declarations in first-seen key order.
    pub declarations: IndexMap<String, ValueDescriptor>,
}

impl Rule {
    pub fn new(selectors: Vec<String>, declarations: IndexMap<String, ValueDescriptor>) -> Self {
        Self {
            selectors,
            declarations,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleSheet {
    pub rules: Vec<Rule>,
    pub variables: VariableBindings,
}

/// Parses a full stylesheet. Never fails: malformed input degrades.
pub fn parse_stylesheet(source: &str) -> StyleSheet {
    let Sections { blocks, variables } = section(source);

    let rules: Vec<Rule> = blocks
        .into_iter()
        .map(|block| {
            let declarations = parse_declarations(&block.body, &variables);
            Rule::new(block.selectors, declarations)
        })
        .collect();

    log::debug!(
        "parsed stylesheet: {} rules, {} variables",
        rules.len(),
        variables.len()
    );

    StyleSheet { rules, variables }
}
