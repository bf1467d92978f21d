//! Bracket links
//!
//!     Slack writes every link as a bracket token `<PAYLOAD>`:
//!
//!     - `<https://foo.com>` becomes the bare URL `https://foo.com`
//!     - `<https://foo.com|foo>` becomes the Markdown link `[foo](https://foo.com)`; only the first
//!       `|` splits, so `<https://foo.com|foo|oof>` becomes `[foo|oof](https://foo.com)`
//!     - `<mailto:a@b.com>` and `<mailto:a@b.com|anything>` both become `mailto:a@b.com`; the
//!       display text of a mail link is dropped
//!
//!     A payload must be non-empty, stay on one line and contain no unescaped `<` or `>`. Its
//!     address must neither start nor end with whitespace; the display text may. Anything else
//!     is literal text.
//!
//!     Whatever this stage writes must read the same way when the output is converted again:
//!
//!     - A bare URL (`scheme://…`, `mailto:…`) is protected up to the next whitespace, `<` or
//!       `>`, whether it came from a token or was already bare in the input. Its path keeps any
//!       `_`, `~` or `*` it contains.
//!     - Markdown links that are already well formed in the input are reported as identity
//!       spans. Display text is escaped so its brackets stay balanced, and a target must have
//!       balanced parentheses and no whitespace to be written as one.
//!     - A bare payload that is not a URL is written with backslash escapes.
//!
//!     Payloads that are mention syntax (`@U…`, `#C…`, `!here`, ...) are handed to
//!     [`crate::mentions`] when mentions are enabled.

use std::ops::Range;

use tracing::trace;

use crate::directory::Directory;
use crate::escape::{escape_inline, escape_label, find_unescaped, is_escaped};
use crate::mentions::{self, Mention};
use crate::rewriter::Rewriter;
use crate::span::{Kind, Protected, Span};

const MAILTO: &str = "mailto:";

/// What sits at a `<`, `[` or `:`.
enum Token {
    Rewrite(Span),
    /// A token that stays as it is and must not be re-scanned.
    Literal(Range<usize>),
}

/// Rewrites `<…>` tokens.
#[derive(Debug, Clone)]
pub struct LinkRewriter {
    mentions: bool,
    directory: Directory,
}

impl LinkRewriter {
    /// A rewriter that resolves mentions against `directory`.
    pub fn new(directory: Directory) -> Self {
        LinkRewriter {
            mentions: true,
            directory,
        }
    }

    /// A rewriter that applies the plain link rules to every payload.
    pub fn without_mentions() -> Self {
        LinkRewriter {
            mentions: false,
            directory: Directory::default(),
        }
    }

    fn bracket_token(&self, text: &str, at: usize, protected: Protected<'_>) -> Option<Token> {
        let end = find_unescaped(text, at + 1, |c| c == '<' || c == '>' || c == '\n')?;
        if text.as_bytes()[end] != b'>' {
            trace!(offset = at, "unterminated link token");
            return None;
        }

        let payload = &text[at + 1..end];
        let address = payload.split_once('|').map_or(payload, |(address, _)| address);
        if payload.is_empty()
            || address.starts_with(char::is_whitespace)
            || address.ends_with(char::is_whitespace)
        {
            trace!(offset = at, "malformed link token");
            return None;
        }

        let range = at..end + 1;
        if self.mentions {
            match mentions::resolve(payload, &self.directory) {
                Some(Mention::Resolved { kind, text }) => {
                    return Some(Token::Rewrite(Span::new(range, kind, text)))
                }
                Some(Mention::Unresolved) => return Some(Token::Literal(range)),
                None => {}
            }
        }

        let (kind, mut replacement) = rewrite_payload(payload)?;
        if !is_autolink(&replacement) {
            return Some(Token::Rewrite(Span::new(range, kind, replacement)));
        }

        // The URL runs on into whatever follows the token, as it will when read back bare.
        let tail = autolink_end(text, range.end, protected);
        replacement.push_str(&text[range.end..tail]);
        Some(Token::Rewrite(Span::new(range.start..tail, kind, replacement)))
    }
}

impl Default for LinkRewriter {
    fn default() -> Self {
        Self::new(Directory::default())
    }
}

/// The link rules for one payload.
///
/// Returns `None` for a payload without an address (`<|text>`) and for a labelled payload whose
/// address cannot be a Markdown link target.
pub fn rewrite_payload(payload: &str) -> Option<(Kind, String)> {
    let (address, display) = payload.split_once('|').unwrap_or((payload, ""));
    if address.is_empty() {
        return None;
    }

    let kind = if address.starts_with(MAILTO) {
        Kind::Mailto
    } else {
        Kind::Link
    };
    if kind == Kind::Mailto || display.is_empty() {
        let bare = if is_autolink(address) {
            address.to_string()
        } else {
            escape_inline(address)
        };
        return Some((kind, bare));
    }

    if !is_link_target(address) {
        trace!(address, "address cannot be a link target");
        return None;
    }
    Some((kind, format!("[{}]({address})", escape_label(display))))
}

fn is_scheme_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'+' | b'.' | b'-')
}

fn is_url_scheme(scheme: &str, rest: &str) -> bool {
    !scheme.is_empty()
        && (rest.starts_with("//")
            || (scheme.len() >= 6 && scheme[scheme.len() - 6..].eq_ignore_ascii_case("mailto")))
}

/// Whether `address`, written bare, is picked up again by [`bare_link`] from its first byte.
fn is_autolink(address: &str) -> bool {
    let Some((scheme, rest)) = address.split_once(':') else {
        return false;
    };
    scheme.bytes().all(is_scheme_byte)
        && is_url_scheme(scheme, rest)
        && !address.contains(|c: char| c.is_whitespace() || c == '<' || c == '>')
}

/// Whether `address` can sit between the parentheses of `[display](address)`.
fn is_link_target(address: &str) -> bool {
    let mut depth = 0usize;
    for c in address.chars() {
        match c {
            '(' => depth += 1,
            ')' => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            c if c.is_whitespace() => return false,
            _ => {}
        }
    }
    depth == 0
}

/// Where a bare URL that reaches `from` ends.
fn autolink_end(text: &str, from: usize, protected: Protected<'_>) -> usize {
    let limit = protected.next_start(from).unwrap_or(text.len());
    text[from..limit]
        .find(|c: char| c.is_whitespace() || c == '<' || c == '>')
        .map_or(limit, |i| from + i)
}

/// A bare URL whose scheme ends at the `:` at `colon`. The scheme reaches back no further than
/// `floor`.
fn bare_link(text: &str, colon: usize, floor: usize, protected: Protected<'_>) -> Option<Span> {
    let bytes = text.as_bytes();
    let mut start = colon;
    while start > floor && is_scheme_byte(bytes[start - 1]) {
        start -= 1;
    }
    if !is_url_scheme(&text[start..colon], &text[colon + 1..]) {
        return None;
    }

    let kind = if text[start..].starts_with(MAILTO) {
        Kind::Mailto
    } else {
        Kind::Link
    };
    let end = autolink_end(text, colon + 1, protected);
    Some(Span::identity(text, start..end, kind))
}

/// The extent of a Markdown link `[display](address)` starting at `at`.
fn markdown_link(text: &str, at: usize) -> Option<Range<usize>> {
    let close = find_unescaped(text, at + 1, |c| c == ']' || c == '[' || c == '\n')?;
    if text.as_bytes()[close] != b']' || text.as_bytes().get(close + 1) != Some(&b'(') {
        return None;
    }

    let target = close + 2;
    let mut depth = 0usize;
    for (i, c) in text[target..].char_indices() {
        match c {
            ')' if depth == 0 => return (i > 0).then(|| at..target + i + 1),
            ')' => depth -= 1,
            '(' => depth += 1,
            c if c.is_whitespace() => return None,
            _ => {}
        }
    }
    None
}

impl Rewriter for LinkRewriter {
    fn name(&self) -> &str {
        "links"
    }

    fn description(&self) -> &str {
        "Bracket links, mailto tokens and mentions to Markdown"
    }

    fn scan(&self, text: &str, protected: Protected<'_>) -> Vec<Span> {
        let mut spans = Vec::new();
        let mut pos = 0;

        while let Some(offset) = text[pos..].find(|c: char| matches!(c, '<' | '[' | ':')) {
            let at = pos + offset;
            if let Some(range) = protected.covering(at) {
                pos = range.end;
                continue;
            }
            if is_escaped(text, at) {
                pos = at + 1;
                continue;
            }

            let token = match text.as_bytes()[at] {
                b'<' => self.bracket_token(text, at, protected),
                b'[' => markdown_link(text, at)
                    .map(|range| Token::Rewrite(Span::identity(text, range, Kind::Link))),
                _ => {
                    let floor = pos.max(protected.gap_around(at, 0..text.len()).start);
                    bare_link(text, at, floor, protected).map(Token::Rewrite)
                }
            };

            match token {
                Some(Token::Rewrite(span)) if !protected.overlaps(&span.range) => {
                    pos = span.range.end;
                    spans.push(span);
                }
                Some(Token::Literal(range)) if !protected.overlaps(&range) => pos = range.end,
                _ => pos = at + 1,
            }
        }
        spans
    }
}
