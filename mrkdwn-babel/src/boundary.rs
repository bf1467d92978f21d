//! Marker boundary classification
//!
//! An emphasis marker only counts when the code point just outside it is not part of a word.
//! "Word" follows the usual `\w` notion over Unicode: letters, digits and `_`. Everything else,
//! including whitespace, line edges and any Unicode punctuation or quotation mark (`«`, `」`, `›`,
//! ...), is a valid boundary.
//!
//! A neighbour that is itself an emphasis marker is always a boundary, `_` included, so the
//! outer marker of `~a~_*b*_` closes the same way it does once `_*b*_` has become `***b***`.
//!
//! Italic openers have one extra rule: a left neighbour that introduces a mention (by default
//! `@`) rejects the opener, so `@_name_` keeps its underscores.

use crate::span::Style;

/// Characters that block an italic opener when they sit immediately to its left.
pub const DEFAULT_MENTION_PREFIXES: &[char] = &['@'];

/// Unicode letter, digit or underscore.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Left boundary check using the default mention prefixes.
pub fn is_valid_left_boundary(c: Option<char>, style: Style) -> bool {
    left_boundary(c, style, DEFAULT_MENTION_PREFIXES)
}

/// Right boundary check. `None` stands for the end of the line or text.
pub fn is_valid_right_boundary(c: Option<char>, _style: Style) -> bool {
    c.map_or(true, |c| is_marker(c) || !is_word_char(c))
}

fn is_marker(c: char) -> bool {
    Style::from_marker(c).is_some()
}

fn left_boundary(c: Option<char>, style: Style, mention_prefixes: &[char]) -> bool {
    match c {
        None => true,
        Some(c) if is_marker(c) => true,
        Some(c) if is_word_char(c) => false,
        Some(c) => !(style == Style::Italic && mention_prefixes.contains(&c)),
    }
}

/// Boundary rules with a configurable set of mention prefixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryClassifier {
    mention_prefixes: Vec<char>,
}

impl BoundaryClassifier {
    pub fn new(mention_prefixes: impl IntoIterator<Item = char>) -> Self {
        BoundaryClassifier {
            mention_prefixes: mention_prefixes.into_iter().collect(),
        }
    }

    pub fn mention_prefixes(&self) -> &[char] {
        &self.mention_prefixes
    }

    pub fn is_valid_left_boundary(&self, c: Option<char>, style: Style) -> bool {
        left_boundary(c, style, &self.mention_prefixes)
    }

    pub fn is_valid_right_boundary(&self, c: Option<char>, style: Style) -> bool {
        is_valid_right_boundary(c, style)
    }
}

impl Default for BoundaryClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_MENTION_PREFIXES.iter().copied())
    }
}
