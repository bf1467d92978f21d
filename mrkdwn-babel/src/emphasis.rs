//! Single-marker emphasis
//!
//!     Slack marks emphasis with one character on each side (`*bold*`, `_italic_`, `~strike~`),
//!     the target dialect with two (`**bold**`, `__italic__`, `~~strike~~`). The rewriter is a
//!     left-to-right scanner over the whole message:
//!
//!     1. A candidate opener is a marker whose run is exactly one long, whose left neighbour is a
//!        valid boundary for that marker and which is followed by a non-whitespace character.
//!     2. The closer is the next single-length run of the same marker whose right neighbour is a
//!        valid boundary. The search gives up at the end of the line and at any run of two or
//!        more markers, whatever the marker: such a run is either already target syntax or the
//!        delimiter of a span, and a span must not reach across one.
//!     3. Without a closer the opener is literal and scanning resumes one byte later. With one,
//!        the span is claimed and scanning resumes after the closer, so `*a* *b*` yields two spans.
//!        Closers are looked up in a table built once per window, which keeps the scan linear.
//!     4. The content is scanned again on its own, bounded by the span. A content that is exactly
//!        one span of a different marker forms a combination: `*_x_*` and `_*x*_` become `***x***`,
//!        while `~*x*~` stays nested as `~~**x**~~`.
//!
//!     Runs of two or more markers are never openers or closers, so text that is already in the
//!     target form passes through untouched. With doubled italics, that and step 2 make a second
//!     conversion of the output a no-op. A backslash-escaped marker is plain text.

use std::ops::Range;

use tracing::trace;

use crate::boundary::BoundaryClassifier;
use crate::options::ItalicStyle;
use crate::rewriter::Rewriter;
use crate::span::{splice_within, Emphasis, Kind, MarkerRun, Protected, Span, Style};

const BOLD_ITALIC: &str = "***";

fn slot(style: Style) -> usize {
    match style {
        Style::Bold => 0,
        Style::Italic => 1,
        Style::Strike => 2,
    }
}

/// Per-offset closer lookup for one window.
struct Closers {
    start: usize,
    table: Vec<[Option<usize>; 3]>,
}

impl Closers {
    fn find(&self, at: usize, style: Style) -> Option<usize> {
        self.table.get(at - self.start)?[slot(style)]
    }
}

/// Rewrites `*x*`, `_x_` and `~x~` spans.
#[derive(Debug, Clone, Default)]
pub struct EmphasisRewriter {
    boundaries: BoundaryClassifier,
    italic_style: ItalicStyle,
}

impl EmphasisRewriter {
    pub fn new(boundaries: BoundaryClassifier, italic_style: ItalicStyle) -> Self {
        EmphasisRewriter {
            boundaries,
            italic_style,
        }
    }

    /// The target-dialect delimiter for one marker.
    pub fn delimiter(&self, style: Style) -> &'static str {
        match style {
            Style::Bold => "**",
            Style::Italic => match self.italic_style {
                ItalicStyle::Doubled => "__",
                ItalicStyle::Star => "*",
            },
            Style::Strike => "~~",
        }
    }

    fn scan_range(&self, text: &str, window: Range<usize>, protected: Protected<'_>) -> Vec<Span> {
        let bytes = text.as_bytes();
        let closers = self.closers(text, &window, protected);
        let mut spans = Vec::new();
        let mut pos = window.start;

        while pos < window.end {
            if let Some(range) = protected.covering(pos) {
                pos = range.end;
                continue;
            }
            let Some(style) = Style::from_marker(bytes[pos] as char) else {
                pos += 1;
                continue;
            };
            let limits = protected.gap_around(pos, window.clone());
            let Some(run) = MarkerRun::at(text, pos, limits) else {
                pos += 1;
                continue;
            };
            if !run.is_single() {
                pos = run.end;
                continue;
            }

            match self.try_span(text, pos, style, &window, protected, &closers) {
                Some(span) => {
                    pos = span.range.end;
                    spans.push(span);
                }
                None => pos += 1,
            }
        }
        spans
    }

    fn try_span(
        &self,
        text: &str,
        open: usize,
        style: Style,
        window: &Range<usize>,
        protected: Protected<'_>,
        closers: &Closers,
    ) -> Option<Span> {
        let before = text[window.start..open].chars().next_back();
        if !self.boundaries.is_valid_left_boundary(before, style) {
            trace!(offset = open, marker = %style.marker(), "opener rejected by left boundary");
            return None;
        }

        let content_start = open + 1;
        match text[content_start..window.end].chars().next() {
            Some(c) if !c.is_whitespace() => {}
            _ => return None,
        }

        let Some(close) = closers.find(content_start, style) else {
            trace!(offset = open, marker = %style.marker(), "opener abandoned without closer");
            return None;
        };

        Some(self.build_span(text, open, content_start..close, style, protected))
    }

    /// Closer positions for every offset of `window`, built right to left in one pass.
    ///
    /// The entry at `i` holds, per marker, the first single-length run at or after `i` whose
    /// right neighbour is a valid boundary. A line break or a run of two or more markers of any
    /// kind ends the search; protected ranges are stepped over.
    fn closers(&self, text: &str, window: &Range<usize>, protected: Protected<'_>) -> Closers {
        let bytes = text.as_bytes();
        let mut next = [None; 3];
        let mut table = vec![[None; 3]; window.len()];
        let mut at = window.end;

        while at > window.start {
            at -= 1;
            if let Some(range) = protected.covering(at) {
                let start = range.start.max(window.start);
                table[start - window.start..=at - window.start].fill(next);
                at = start;
                continue;
            }

            let run = Style::from_marker(bytes[at] as char).and_then(|style| {
                let limits = protected.gap_around(at, window.clone());
                MarkerRun::at(text, at, limits).map(|run| (style, run))
            });
            match run {
                Some((_, run)) if !run.is_single() => {
                    next = [None; 3];
                    table[run.start - window.start..=at - window.start].fill(next);
                    at = run.start;
                    continue;
                }
                Some((style, _)) => {
                    let after = text[at + 1..window.end].chars().next();
                    if self.boundaries.is_valid_right_boundary(after, style) {
                        next[slot(style)] = Some(at);
                    }
                }
                None if bytes[at] == b'\n' => next = [None; 3],
                None => {}
            }
            table[at - window.start] = next;
        }

        Closers {
            start: window.start,
            table,
        }
    }

    fn build_span(
        &self,
        text: &str,
        open: usize,
        content: Range<usize>,
        style: Style,
        protected: Protected<'_>,
    ) -> Span {
        let range = open..content.end + 1;
        let inner = self.scan_range(text, content.clone(), protected);

        let combined = match inner.as_slice() {
            [only] if only.range == content => match &only.kind {
                Kind::Emphasis(emphasis) => Emphasis::combine(style, *emphasis)
                    .map(|combined| (combined, only, *emphasis)),
                _ => None,
            },
            _ => None,
        };

        let delimiter = self.delimiter(style);
        match combined {
            Some((Emphasis::BoldItalic, only, inner_emphasis)) => {
                let inner_delimiter = match inner_emphasis {
                    Emphasis::Bold => self.delimiter(Style::Bold),
                    _ => self.delimiter(Style::Italic),
                };
                let body = &only.replacement
                    [inner_delimiter.len()..only.replacement.len() - inner_delimiter.len()];
                Span::new(
                    range,
                    Kind::Emphasis(Emphasis::BoldItalic),
                    format!("{BOLD_ITALIC}{body}{BOLD_ITALIC}"),
                )
            }
            Some((emphasis, only, _)) => Span::new(
                range,
                Kind::Emphasis(emphasis),
                format!("{delimiter}{}{delimiter}", only.replacement),
            ),
            None => {
                let body = splice_within(text, content, &inner).text;
                Span::new(
                    range,
                    Kind::Emphasis(style.into()),
                    format!("{delimiter}{body}{delimiter}"),
                )
            }
        }
    }
}

impl Rewriter for EmphasisRewriter {
    fn name(&self) -> &str {
        "emphasis"
    }

    fn description(&self) -> &str {
        "Single-marker bold, italic and strikethrough to doubled markers"
    }

    fn scan(&self, text: &str, protected: Protected<'_>) -> Vec<Span> {
        self.scan_range(text, 0..text.len(), protected)
    }
}
