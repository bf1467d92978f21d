//! Code protection
//!
//! Slack renders nothing inside code, so neither links nor emphasis may be rewritten there.
//! This stage does not change any text; it only reports code as identity spans, which the
//! pipeline then protects from every later stage. A backslash-escaped backtick neither opens nor
//! closes inline code.

use crate::escape::{find_unescaped, is_escaped};
use crate::rewriter::Rewriter;
use crate::span::{Kind, Protected, Span};

const FENCE: &str = "```";

/// Marks fenced (```` ``` ````) and inline (`` ` ``) code as protected.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeGuard;

impl Rewriter for CodeGuard {
    fn name(&self) -> &str {
        "code"
    }

    fn description(&self) -> &str {
        "Protects inline and fenced code from rewriting"
    }

    fn scan(&self, text: &str, protected: Protected<'_>) -> Vec<Span> {
        let mut spans = Vec::new();
        let mut pos = 0;

        while let Some(offset) = text[pos..].find('`') {
            let at = pos + offset;
            if let Some(range) = protected.covering(at) {
                pos = range.end;
                continue;
            }
            if is_escaped(text, at) {
                pos = at + 1;
                continue;
            }

            let ticks = text[at..].bytes().take_while(|b| *b == b'`').count();
            let end = match ticks {
                1 => find_unescaped(text, at + 1, |c| c == '`' || c == '\n')
                    .filter(|i| text.as_bytes()[*i] == b'`')
                    .map(|i| i + 1),
                n if n >= 3 => text[at + n..].find(FENCE).map(|i| {
                    let close = at + n + i;
                    close + text[close..].bytes().take_while(|b| *b == b'`').count()
                }),
                _ => None,
            };

            match end {
                Some(end) if !protected.overlaps(&(at..end)) => {
                    spans.push(Span::identity(text, at..end, Kind::Code));
                    pos = end;
                }
                _ => pos = at + ticks,
            }
        }
        spans
    }
}
