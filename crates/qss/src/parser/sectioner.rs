//! Splits raw stylesheet text into selector blocks and variable statements.
//!
//! The sectioner is a single left-to-right scan with three states:
//!
//! | State         | Trigger              | Effect                                  |
//! |---------------|----------------------|-----------------------------------------|
//! | `Selector`    | `{`                  | start the declaration body              |
//! | `Declaration` | `}`                  | emit the block, back to `Selector`      |
//! | not `Declaration` | `$`              | start a variable statement              |
//! | `Variable`    | `;`                  | record the binding, back to `Selector`  |
//!
//! Every other character is appended to the buffer of the current state.
//! Characters inside double-quoted strings never trigger a transition.
//! Braces do not nest; a block still open at the end of input is dropped.

use crate::parser::quotes::{QuoteSpans, split_outside_quotes};
use crate::parser::variables::VariableBindings;

/// One `selector-list { body }` block as it appeared in the source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawDeclaration {
    /// Selectors in source order. `a, b { .. }` yields `["a", "b"]`.
    pub selectors: Vec<String>,
    /// The trimmed text between the braces.
    pub body: String,
}

/// The sectioned document: blocks plus the document-wide variable bindings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sections {
    pub blocks: Vec<RawDeclaration>,
    pub variables: VariableBindings,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Selector,
    Declaration,
    Variable,
}

/// Sections a stylesheet. Never fails; see the module docs for recovery.
pub fn section(text: &str) -> Sections {
    let quotes = QuoteSpans::scan(text);
    let mut sections = Sections::default();

    let mut state = State::Selector;
    let mut selector = String::new();
    let mut body = String::new();
    let mut variable = String::new();

    for (i, c) in text.char_indices() {
        if !quotes.contains(i) {
            match (c, state) {
                ('{', State::Selector) => {
                    state = State::Declaration;
                    continue;
                }
                ('}', State::Declaration) => {
                    let block = RawDeclaration {
                        selectors: split_outside_quotes(&selector, ',')
                            .into_iter()
                            .map(str::to_string)
                            .collect(),
                        body: body.trim().to_string(),
                    };
                    log::trace!("sectioned block {:?}", block.selectors);
                    sections.blocks.push(block);

                    selector.clear();
                    body.clear();
                    state = State::Selector;
                    continue;
                }
                ('$', State::Selector | State::Variable) => {
                    state = State::Variable;
                    continue;
                }
                (';', State::Variable) => {
                    if !sections.variables.define_statement(&variable) {
                        log::warn!("ignoring variable statement without ':': ${}", variable.trim());
                    }
                    variable.clear();
                    state = State::Selector;
                    continue;
                }
                _ => {}
            }
        }

        match state {
            State::Selector => selector.push(c),
            State::Declaration => body.push(c),
            State::Variable => variable.push(c),
        }
    }

    match state {
        State::Declaration => {
            log::warn!("dropping unterminated block `{}`", selector.trim());
        }
        State::Variable => {
            log::warn!("dropping unterminated variable statement `${}`", variable.trim());
        }
        State::Selector if !selector.trim().is_empty() => {
            log::warn!("dropping trailing text without a block: `{}`", selector.trim());
        }
        State::Selector => {}
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_block() {
        let sections = section("QWidget { color: red; }");
        assert_eq!(
            sections.blocks,
            vec![RawDeclaration {
                selectors: vec!["QWidget".to_string()],
                body: "color: red;".to_string(),
            }]
        );
    }

    #[test]
    fn test_selector_list_expands_in_order() {
        let sections = section("b , a,,c { x: 1; }");
        assert_eq!(sections.blocks[0].selectors, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_variables_are_collected() {
        let sections = section("$fg: #112233;\n$bg : white ;\nA { color: $fg; }");
        assert_eq!(sections.variables.resolve("fg"), Some("#112233"));
        assert_eq!(sections.variables.resolve("bg"), Some("white"));
        assert_eq!(sections.blocks.len(), 1);
        assert_eq!(sections.blocks[0].selectors, vec!["A"]);
    }

    #[test]
    fn test_dollar_inside_declaration_is_text() {
        let sections = section("A { color: $fg; }");
        assert_eq!(sections.blocks[0].body, "color: $fg;");
        assert!(sections.variables.is_empty());
    }

    #[test]
    fn test_quoted_braces_are_not_structural() {
        let sections = section(r#"A { content: "}{$"; } B { x: 1; }"#);
        assert_eq!(sections.blocks.len(), 2);
        assert_eq!(sections.blocks[0].body, r#"content: "}{$";"#);
        assert_eq!(sections.blocks[1].selectors, vec!["B"]);
    }

    #[test]
    fn test_unterminated_block_is_dropped() {
        let sections = section("A { x: 1; } B { y: 2;");
        assert_eq!(sections.blocks.len(), 1);
        assert_eq!(sections.blocks[0].selectors, vec!["A"]);
    }

    #[test]
    fn test_stray_closing_brace_is_selector_text() {
        let sections = section("} A { x: 1; }");
        assert_eq!(sections.blocks.len(), 1);
        assert_eq!(sections.blocks[0].selectors, vec!["} A"]);
    }
}
