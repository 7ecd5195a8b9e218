//! The property registry.
//!
//! A fixed catalog maps constructor names (`color`, `px`, `margin`, ...) to
//! functions that turn parsed [`Arguments`] into a [`PropertyValue`]: a
//! canonical in-memory value plus the rule for writing it back as text.
//!
//! Construction never fails. Missing positional arguments take each
//! constructor's default, unreadable numbers become zero, and unregistered
//! names fall back to [`unknown`] without a wrap.
//!
//! ```
//! use qss::parser::{Argument, Arguments};
//! use qss::property::construct;
//!
//! let margin = construct(
//!     "margin",
//!     &Arguments::List(vec![2.into(), 4.into(), 6.into(), 8.into()]),
//! );
//! assert_eq!(margin.serialize(), "2px 4px 6px 8px");
//!
//! let link = construct("url", &Arguments::Single(Argument::from("icons/close.svg")));
//! assert_eq!(link.serialize(), "url(icons/close.svg)");
//! ```

use std::fmt;

use phf::phf_map;

use crate::parser::{Argument, Arguments, ValueDescriptor, ValueKind};
use crate::types::Color;

/// The canonical in-memory form of a property.
#[derive(Clone, Debug, PartialEq)]
pub enum Canonical {
    Integer(i64),
    Number(f64),
    Color(Color),
    Text(String),
    /// Top, right, bottom, left in pixels.
    Margin([i64; 4]),
    Border {
        width: i64,
        background: String,
        color: String,
    },
    None,
    /// Arguments kept as parsed, for values no constructor understands.
    Raw(Arguments),
}

/// Writes a canonical value as stylesheet text (without the wrap).
pub type Serializer = fn(&Canonical) -> String;

/// Builds a property from function arguments.
pub type Constructor = fn(&Arguments) -> PropertyValue;

/// A registry-constructed property value.
#[derive(Clone, Debug)]
pub struct PropertyValue {
    canonical: Canonical,
    wrap: Option<String>,
    to_text: Serializer,
}

impl PropertyValue {
    pub fn new(canonical: Canonical, wrap: Option<String>, to_text: Serializer) -> Self {
        Self {
            canonical,
            wrap,
            to_text,
        }
    }

    pub fn canonical(&self) -> &Canonical {
        &self.canonical
    }

    pub fn wrap(&self) -> Option<&str> {
        self.wrap.as_deref()
    }

    /// The unwrapped text form of the canonical value.
    pub fn to_text(&self) -> String {
        (self.to_text)(&self.canonical)
    }

    /// The full text form, e.g. `rgba(255,0,170,255)` or `url(a.png)`.
    pub fn serialize(&self) -> String {
        match &self.wrap {
            Some(wrap) => format!("{}({})", wrap, self.to_text()),
            None => self.to_text(),
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self.canonical {
            Canonical::Color(color) => Some(color),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self.canonical {
            Canonical::Integer(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self.canonical {
            Canonical::Number(value) => Some(value),
            Canonical::Integer(value) => Some(value as f64),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.canonical {
            Canonical::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl PartialEq for PropertyValue {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
            && self.wrap == other.wrap
            && self.to_text() == other.to_text()
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

/// The constructor catalog.
pub static CONSTRUCTORS: phf::Map<&'static str, Constructor> = phf_map! {
    "integer" => integer as Constructor,
    "color" => color as Constructor,
    "radius" => radius as Constructor,
    "px" => px as Constructor,
    "url" => url as Constructor,
    "margin" => margin as Constructor,
    "border" => border as Constructor,
    "none" => none as Constructor,
    "unknown" => unregistered as Constructor,
};

/// Looks up a constructor by name.
pub fn constructor(name: &str) -> Option<Constructor> {
    CONSTRUCTORS.get(name).copied()
}

pub fn is_registered(name: &str) -> bool {
    CONSTRUCTORS.contains_key(name)
}

/// Constructs a property by constructor name, falling back to [`unknown`].
pub fn construct(name: &str, arguments: &Arguments) -> PropertyValue {
    match constructor(name) {
        Some(build) => build(arguments),
        None => {
            log::trace!("no constructor named `{}`, keeping raw arguments", name);
            unknown(arguments, None)
        }
    }
}

/// Builds the canonical property for a parsed declaration value.
///
/// Hex colors, named colors, and `transparent` go through the `color`
/// constructor; opaque text goes through `unknown`.
pub fn cast(descriptor: &ValueDescriptor) -> PropertyValue {
    match &descriptor.kind {
        ValueKind::FunctionCall { name, arguments } => construct(name, arguments),
        ValueKind::HexColor { text } => color(&Arguments::Single(Argument::Text(text.clone()))),
        ValueKind::NamedColor { rgb: (r, g, b) } => color(&Arguments::List(vec![
            Argument::Int(i64::from(*r)),
            Argument::Int(i64::from(*g)),
            Argument::Int(i64::from(*b)),
        ])),
        ValueKind::Transparent => color(&Arguments::List(vec![Argument::Int(0); 4])),
        ValueKind::Unknown { text } => {
            unregistered(&Arguments::Single(Argument::Text(text.clone())))
        }
    }
}

fn int_at(arguments: &Arguments, index: usize, default: i64, constructor: &str) -> i64 {
    match arguments.get(index) {
        None => default,
        Some(argument) => argument.as_int().unwrap_or_else(|| {
            log::warn!("{}: argument {} `{}` is not an integer", constructor, index, argument);
            default
        }),
    }
}

fn text_at(arguments: &Arguments, index: usize, default: &str) -> String {
    arguments
        .get(index)
        .map(ToString::to_string)
        .unwrap_or_else(|| default.to_string())
}

fn number_at(arguments: &Arguments, index: usize, constructor: &str) -> f64 {
    match arguments.get(index) {
        None => 0.0,
        Some(argument) => argument.as_f64().unwrap_or_else(|| {
            log::warn!("{}: argument {} `{}` is not a number", constructor, index, argument);
            0.0
        }),
    }
}

fn plain_text(canonical: &Canonical) -> String {
    match canonical {
        Canonical::Integer(value) => value.to_string(),
        Canonical::Number(value) => value.to_string(),
        Canonical::Color(color) => color.to_string(),
        Canonical::Text(text) => text.clone(),
        Canonical::Margin(sides) => sides.map(|side| side.to_string()).join(" "),
        Canonical::Border {
            width,
            background,
            color,
        } => format!("{} {} {}", width, background, color),
        Canonical::None => String::new(),
        Canonical::Raw(arguments) => arguments.to_string(),
    }
}

fn channels_text(canonical: &Canonical) -> String {
    match canonical {
        Canonical::Color(color) => format!("{},{},{},{}", color.r, color.g, color.b, color.a),
        other => plain_text(other),
    }
}

fn pixels_text(canonical: &Canonical) -> String {
    format!("{}px", plain_text(canonical))
}

fn margin_text(canonical: &Canonical) -> String {
    match canonical {
        Canonical::Margin(sides) => sides.map(|side| format!("{}px", side)).join(" "),
        other => plain_text(other),
    }
}

fn border_text(canonical: &Canonical) -> String {
    match canonical {
        Canonical::Border {
            width,
            background,
            color,
        } => format!("{}px {} {}", width, background, color),
        other => plain_text(other),
    }
}

fn none_text(_: &Canonical) -> String {
    "none".to_string()
}

/// `integer(n)`; defaults to 0.
pub fn integer(arguments: &Arguments) -> PropertyValue {
    let value = int_at(arguments, 0, 0, "integer");
    PropertyValue::new(Canonical::Integer(value), None, plain_text)
}

/// `color("#rrggbb")`, `color(name)`, or `color(r, g, b[, a])`.
///
/// Serializes as `rgba(r,g,b,a)`. A single integer is read as packed
/// `0xRRGGBB`. An unreadable color becomes opaque black.
pub fn color(arguments: &Arguments) -> PropertyValue {
    let value = match arguments {
        Arguments::Single(Argument::Text(text)) => {
            let text = text.trim_matches('"');
            Color::parse(text).unwrap_or_else(|err| {
                log::warn!("color: {}, using black", err);
                Color::black()
            })
        }
        Arguments::Single(Argument::Int(packed)) => Color::from_packed(*packed as u32),
        Arguments::List(_) => {
            let channel = |index: usize, default: i64| {
                int_at(arguments, index, default, "color").clamp(0, 255) as u8
            };
            Color::rgba(channel(0, 0), channel(1, 0), channel(2, 0), channel(3, 255))
        }
    };

    PropertyValue::new(Canonical::Color(value), Some("rgba".to_string()), channels_text)
}

/// `radius(n)`; serialized as the bare number.
pub fn radius(arguments: &Arguments) -> PropertyValue {
    let value = number_at(arguments, 0, "radius");
    PropertyValue::new(Canonical::Number(value), None, plain_text)
}

/// `px(n)`; serialized as `<n>px`.
pub fn px(arguments: &Arguments) -> PropertyValue {
    let value = number_at(arguments, 0, "px");
    PropertyValue::new(Canonical::Number(value), None, pixels_text)
}

/// `url(link)`; serialized as `url(link)`.
pub fn url(arguments: &Arguments) -> PropertyValue {
    let link = text_at(arguments, 0, "");
    PropertyValue::new(Canonical::Text(link), Some("url".to_string()), plain_text)
}

/// `margin(top, right, bottom, left)`; each side defaults to 0.
pub fn margin(arguments: &Arguments) -> PropertyValue {
    let sides = [0, 1, 2, 3].map(|index| int_at(arguments, index, 0, "margin"));
    PropertyValue::new(Canonical::Margin(sides), None, margin_text)
}

/// `border(width, background, color)`; defaults `0`, `transparent`, `black`.
pub fn border(arguments: &Arguments) -> PropertyValue {
    let canonical = Canonical::Border {
        width: int_at(arguments, 0, 0, "border"),
        background: text_at(arguments, 1, "transparent"),
        color: text_at(arguments, 2, "black"),
    };
    PropertyValue::new(canonical, None, border_text)
}

/// `none(..)`; always serialized as `none`.
pub fn none(_: &Arguments) -> PropertyValue {
    PropertyValue::new(Canonical::None, None, none_text)
}

/// Keeps the arguments as they are, optionally wrapped.
///
/// A single text argument is stored as [`Canonical::Text`]; anything else
/// as [`Canonical::Raw`].
pub fn unknown(arguments: &Arguments, wrap: Option<&str>) -> PropertyValue {
    let canonical = match arguments {
        Arguments::Single(Argument::Text(text)) => Canonical::Text(text.clone()),
        other => Canonical::Raw(other.clone()),
    };
    PropertyValue::new(canonical, wrap.map(str::to_string), plain_text)
}

fn unregistered(arguments: &Arguments) -> PropertyValue {
    unknown(arguments, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{VariableBindings, parse_value};

    fn cast_text(text: &str) -> PropertyValue {
        cast(&parse_value(text, &VariableBindings::new()))
    }

    #[test]
    fn test_hex_color_serializes_as_rgba() {
        let value = cast_text("#FF00AA");
        assert_eq!(value.as_color(), Some(Color::rgb(255, 0, 170)));
        assert_eq!(value.serialize(), "rgba(255,0,170,255)");
    }

    #[test]
    fn test_named_and_transparent() {
        assert_eq!(cast_text("red").serialize(), "rgba(255,0,0,255)");
        assert_eq!(cast_text("transparent").serialize(), "rgba(0,0,0,0)");
    }

    #[test]
    fn test_color_tuple_defaults_alpha() {
        assert_eq!(cast_text("color(1, 2, 3)").as_color(), Some(Color::rgb(1, 2, 3)));
        assert_eq!(
            cast_text("color(1, 2, 3, 4)").as_color(),
            Some(Color::rgba(1, 2, 3, 4))
        );
        assert_eq!(cast_text("color(300)").as_color(), Some(Color::rgb(0, 1, 44)));
    }

    #[test]
    fn test_color_quoted_name() {
        assert_eq!(
            cast_text(r#"color("navy")"#).as_color(),
            Some(Color::rgb(0, 0, 128))
        );
    }

    #[test]
    fn test_bad_hex_degrades_to_black() {
        assert_eq!(cast_text("#zz").as_color(), Some(Color::black()));
    }

    #[test]
    fn test_px_and_radius() {
        assert_eq!(cast_text("px(4)").serialize(), "4px");
        assert_eq!(cast_text("px(1.5)").serialize(), "1.5px");
        assert_eq!(cast_text("radius(6)").as_number(), Some(6.0));
        assert_eq!(cast_text("px(wide)").serialize(), "0px");
    }

    #[test]
    fn test_margin_defaults_missing_sides() {
        assert_eq!(cast_text("margin(2,4,6,8)").serialize(), "2px 4px 6px 8px");
        assert_eq!(cast_text("margin(5)").serialize(), "5px 0px 0px 0px");
    }

    #[test]
    fn test_border() {
        assert_eq!(cast_text("border(1, white, gray)").serialize(), "1px white gray");
        assert_eq!(cast_text("border(2)").serialize(), "2px transparent black");
    }

    #[test]
    fn test_none_ignores_arguments() {
        assert_eq!(cast_text("none(5)").serialize(), "none");
        assert_eq!(*cast_text("none()").canonical(), Canonical::None);
    }

    #[test]
    fn test_integer() {
        assert_eq!(cast_text("integer(12)").as_integer(), Some(12));
        assert_eq!(cast_text("integer()").as_integer(), Some(0));
    }

    #[test]
    fn test_unregistered_falls_back_unwrapped() {
        let value = cast_text("rgba(1, 2, 3, 4)");
        assert_eq!(value.wrap(), None);
        assert_eq!(value.serialize(), "1, 2, 3, 4");

        let value = cast_text("solid 1px");
        assert_eq!(value.as_text(), Some("solid 1px"));
    }

    #[test]
    fn test_unknown_with_wrap() {
        let value = unknown(&Arguments::Single(Argument::from("a.png")), Some("url"));
        assert_eq!(value.serialize(), "url(a.png)");
    }

    #[test]
    fn test_catalog() {
        for name in [
            "integer", "color", "radius", "px", "url", "margin", "border", "none", "unknown",
        ] {
            assert!(is_registered(name), "{} should be registered", name);
        }
        assert!(!is_registered("rgba"));
    }
}
