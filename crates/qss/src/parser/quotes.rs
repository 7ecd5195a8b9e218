//! Quote-aware scanning primitives.
//!
//! Double-quoted strings (with `\"` escapes) are opaque to the stylesheet
//! structure: braces, dollars, semicolons, and commas inside them are plain
//! text. Both the sectioner and the value parser go through this module so
//! they agree on what "inside quotes" means.
//!
//! An opening quote with no matching close does not form a span; the rest
//! of the text is scanned as if the quote were an ordinary character.

use std::ops::Range;

use nom::{
    IResult,
    branch::alt,
    character::complete::{anychar, char, none_of},
    combinator::recognize,
    multi::many0_count,
    sequence::{delimited, preceded},
};

/// Recognizes a complete double-quoted string, including its quotes.
pub fn quoted_string(input: &str) -> IResult<&str, &str> {
    recognize(delimited(
        char('"'),
        many0_count(alt((preceded(char('\\'), anychar), none_of("\"\\")))),
        char('"'),
    ))(input)
}

/// Byte ranges of every quoted string in a piece of text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuoteSpans {
    spans: Vec<Range<usize>>,
}

impl QuoteSpans {
    /// Collects the spans of all quoted strings, scanning left to right.
    pub fn scan(text: &str) -> Self {
        let mut spans = Vec::new();
        let mut next = 0;

        for (i, c) in text.char_indices() {
            if i < next || c != '"' {
                continue;
            }
            if let Ok((_, quoted)) = quoted_string(&text[i..]) {
                spans.push(i..i + quoted.len());
                next = i + quoted.len();
            }
        }

        Self { spans }
    }

    /// Returns true if the byte offset falls inside a quoted string.
    pub fn contains(&self, offset: usize) -> bool {
        // Spans are sorted and disjoint.
        let idx = self.spans.partition_point(|span| span.end <= offset);
        self.spans
            .get(idx)
            .is_some_and(|span| span.start <= offset)
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Range<usize>> {
        self.spans.iter()
    }
}

/// Splits `text` on `delimiter` wherever the delimiter is outside quotes.
///
/// Each piece is trimmed and empty pieces are dropped, so `"a,,b, "` yields
/// `["a", "b"]`.
pub fn split_outside_quotes(text: &str, delimiter: char) -> Vec<&str> {
    let quotes = QuoteSpans::scan(text);
    let mut pieces = Vec::new();
    let mut start = 0;

    for (i, c) in text.char_indices() {
        if c == delimiter && !quotes.contains(i) {
            push_piece(&mut pieces, &text[start..i]);
            start = i + c.len_utf8();
        }
    }
    push_piece(&mut pieces, &text[start..]);

    pieces
}

fn push_piece<'a>(pieces: &mut Vec<&'a str>, piece: &'a str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        pieces.push(piece);
    }
}
