//! Declaration value parsing.
//!
//! A declaration's right-hand side is classified into a [`ValueDescriptor`].
//! Rules are tried in order:
//!
//! 1. `$name` bound in the document is replaced by its raw text (once)
//! 2. `name(arg, ...)` becomes a function call
//! 3. `#...` becomes a hex color
//! 4. an exact X11/CSS color name becomes a named color
//! 5. `transparent`
//! 6. anything else is kept as opaque text
//!
//! Function arguments are split on commas outside quotes. An argument made
//! only of digits (with an optional leading `-`) is an integer; anything
//! else is kept as trimmed text, quotes included.

use std::fmt;

use indexmap::IndexMap;
use nom::{
    IResult,
    bytes::complete::take_while1,
    character::complete::{char, digit1},
    combinator::{all_consuming, map_res, opt, recognize},
    sequence::{pair, terminated},
};

use crate::parser::quotes::split_outside_quotes;
use crate::parser::variables::VariableBindings;
use crate::types::named;

/// A single function argument.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Argument {
    Int(i64),
    Text(String),
}

impl Argument {
    /// Parses an argument chunk, preferring an integer reading.
    pub fn parse(chunk: &str) -> Self {
        match all_consuming(parse_integer)(chunk) {
            Ok((_, value)) => Argument::Int(value),
            Err(_) => Argument::Text(chunk.to_string()),
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Argument::Int(value) => Some(*value),
            Argument::Text(text) => text.trim().parse().ok(),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Argument::Int(value) => Some(*value as f64),
            Argument::Text(text) => text.trim().parse().ok(),
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Int(value) => write!(f, "{}", value),
            Argument::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for Argument {
    fn from(value: i64) -> Self {
        Argument::Int(value)
    }
}

impl From<&str> for Argument {
    fn from(value: &str) -> Self {
        Argument::Text(value.to_string())
    }
}

/// Function-call arguments: a bare scalar when exactly one was given.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Arguments {
    Single(Argument),
    List(Vec<Argument>),
}

impl Arguments {
    pub fn from_vec(mut arguments: Vec<Argument>) -> Self {
        if arguments.len() == 1 {
            Arguments::Single(arguments.remove(0))
        } else {
            Arguments::List(arguments)
        }
    }

    /// Positional access; a single scalar sits at index 0.
    pub fn get(&self, index: usize) -> Option<&Argument> {
        match self {
            Arguments::Single(argument) => (index == 0).then_some(argument),
            Arguments::List(arguments) => arguments.get(index),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Arguments::Single(_) => 1,
            Arguments::List(arguments) => arguments.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Argument> {
        (0..self.len()).filter_map(move |i| self.get(i))
    }
}

impl fmt::Display for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, argument) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", argument)?;
        }
        Ok(())
    }
}

/// The classified shape of a declaration value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValueKind {
    FunctionCall { name: String, arguments: Arguments },
    HexColor { text: String },
    NamedColor { rgb: (u8, u8, u8) },
    Transparent,
    Unknown { text: String },
}

/// A parsed declaration value together with its source text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueDescriptor {
    pub kind: ValueKind,
    /// The value text after variable substitution, kept verbatim for
    /// emission.
    pub serialized: String,
}

/// Classifies a declaration value, substituting a `$variable` first.
pub fn parse_value(text: &str, bindings: &VariableBindings) -> ValueDescriptor {
    let text = bindings.substitute(text.trim()).trim();
    ValueDescriptor {
        kind: classify(text),
        serialized: text.to_string(),
    }
}

fn classify(text: &str) -> ValueKind {
    if let Ok((_, (name, arguments))) = parse_function_call(text) {
        return ValueKind::FunctionCall {
            name: name.to_string(),
            arguments,
        };
    }

    if text.starts_with('#') {
        return ValueKind::HexColor {
            text: text.to_string(),
        };
    }

    if let Some(rgb) = named::lookup(text) {
        return ValueKind::NamedColor { rgb };
    }

    if text == "transparent" {
        return ValueKind::Transparent;
    }

    ValueKind::Unknown {
        text: text.to_string(),
    }
}

fn parse_integer(input: &str) -> IResult<&str, i64> {
    map_res(recognize(pair(opt(char('-')), digit1)), str::parse::<i64>)(input)
}

/// Function names are word characters: letters, digits, and `_`.
pub fn parse_function_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_')(input)
}

/// Recognizes `name(arguments)` spanning the whole input.
///
/// The argument text runs to the final `)`, so `f(a)b(c)` has the single
/// argument `a)b(c`.
pub fn parse_function_call(input: &str) -> IResult<&str, (&str, Arguments)> {
    let (rest, name) = terminated(parse_function_name, char('('))(input)?;
    let Some(inner) = rest.strip_suffix(')') else {
        return Err(nom::Err::Error(nom::error::Error::new(
            rest,
            nom::error::ErrorKind::Char,
        )));
    };

    let arguments = split_outside_quotes(inner, ',')
        .into_iter()
        .map(Argument::parse)
        .collect();

    Ok(("", (name, Arguments::from_vec(arguments))))
}

/// Splits a block body into `key -> value` pairs.
///
/// Statements are separated by `;` outside quotes. A later statement with
/// the same key replaces the earlier value but keeps its position. A
/// statement without a `:` is skipped.
pub fn parse_declarations(
    body: &str,
    bindings: &VariableBindings,
) -> IndexMap<String, ValueDescriptor> {
    let mut declarations = IndexMap::new();

    for statement in split_outside_quotes(body, ';') {
        let Some((key, value)) = statement.split_once(':') else {
            log::warn!("skipping declaration without ':': `{}`", statement);
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            log::warn!("skipping declaration without a key: `{}`", statement);
            continue;
        }

        let descriptor = parse_value(value, bindings);
        if let ValueKind::Unknown { text } = &descriptor.kind {
            log::trace!("{}: passing through opaque value `{}`", key, text);
        }
        declarations.insert(key.to_string(), descriptor);
    }

    declarations
}
