//! Spans, span kinds and the splice pass
//!
//! Every rewriter stage reports its matches as a list of [`Span`]s over the text it was given.
//! Spans of one stage are sorted and never overlap. The pipeline then builds the next text with a
//! single [`splice`], which also reports where each replacement landed so that later stages can
//! treat those regions as opaque (see [`Protected`]).
//!
//! All offsets are byte offsets that fall on UTF-8 character boundaries.

use std::ops::Range;

use crate::escape::is_escaped;

/// Emphasis marker in the Slack dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    /// `*text*`
    Bold,
    /// `_text_`
    Italic,
    /// `~text~`
    Strike,
}

impl Style {
    /// Maps a marker character to its style.
    pub fn from_marker(c: char) -> Option<Style> {
        match c {
            '*' => Some(Style::Bold),
            '_' => Some(Style::Italic),
            '~' => Some(Style::Strike),
            _ => None,
        }
    }

    /// The marker character of this style.
    pub fn marker(self) -> char {
        match self {
            Style::Bold => '*',
            Style::Italic => '_',
            Style::Strike => '~',
        }
    }
}

/// A resolved emphasis construct, including the two-marker combinations.
///
/// Combinations that involve strikethrough remember which marker was outside so the output
/// nesting mirrors the input nesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emphasis {
    Bold,
    Italic,
    Strike,
    BoldItalic,
    BoldStrike { bold_outside: bool },
    ItalicStrike { italic_outside: bool },
}

impl Emphasis {
    /// Combines an outer marker with the single construct that fills its whole content.
    ///
    /// Returns `None` when the pair does not form one of the known combinations: the same marker
    /// twice, or an inner construct that is already a combination.
    pub fn combine(outer: Style, inner: Emphasis) -> Option<Emphasis> {
        match (outer, inner) {
            (Style::Bold, Emphasis::Italic) | (Style::Italic, Emphasis::Bold) => {
                Some(Emphasis::BoldItalic)
            }
            (Style::Bold, Emphasis::Strike) => Some(Emphasis::BoldStrike { bold_outside: true }),
            (Style::Strike, Emphasis::Bold) => Some(Emphasis::BoldStrike {
                bold_outside: false,
            }),
            (Style::Italic, Emphasis::Strike) => Some(Emphasis::ItalicStrike {
                italic_outside: true,
            }),
            (Style::Strike, Emphasis::Italic) => Some(Emphasis::ItalicStrike {
                italic_outside: false,
            }),
            (Style::Bold, Emphasis::Bold)
            | (Style::Italic, Emphasis::Italic)
            | (Style::Strike, Emphasis::Strike)
            | (_, Emphasis::BoldItalic)
            | (_, Emphasis::BoldStrike { .. })
            | (_, Emphasis::ItalicStrike { .. }) => None,
        }
    }
}

impl From<Style> for Emphasis {
    fn from(style: Style) -> Self {
        match style {
            Style::Bold => Emphasis::Bold,
            Style::Italic => Emphasis::Italic,
            Style::Strike => Emphasis::Strike,
        }
    }
}

/// What a span matched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Inline or fenced code, kept verbatim.
    Code,
    /// A bracket link, or a Markdown link that was already well formed.
    Link,
    /// A `mailto:` bracket token.
    Mailto,
    /// `<@U…>`, carrying the Slack user id.
    UserMention(String),
    /// `<#C…>`
    ChannelMention,
    /// `<!here>`, `<!channel>` and `<!everyone>`.
    BroadcastMention,
    /// `<!subteam^…|@handle>`
    GroupMention,
    /// `<!date^…|fallback>`
    Date,
    Emphasis(Emphasis),
}

/// A matched region of the input and the text that replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub range: Range<usize>,
    pub kind: Kind,
    pub replacement: String,
}

impl Span {
    pub fn new(range: Range<usize>, kind: Kind, replacement: impl Into<String>) -> Self {
        Span {
            range,
            kind,
            replacement: replacement.into(),
        }
    }

    /// A span that protects `range` without changing it.
    pub fn identity(text: &str, range: Range<usize>, kind: Kind) -> Self {
        let replacement = text[range.clone()].to_string();
        Span {
            range,
            kind,
            replacement,
        }
    }
}

/// A maximal run of one marker character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerRun {
    pub marker: char,
    pub start: usize,
    pub end: usize,
}

impl MarkerRun {
    /// The run of `text[at]` bounded by `limits`.
    ///
    /// Returns `None` when the byte at `at` is not a marker or is backslash-escaped. An escaped
    /// marker is never part of a run, so `\**` holds a run of one.
    pub fn at(text: &str, at: usize, limits: Range<usize>) -> Option<MarkerRun> {
        let bytes = text.as_bytes();
        let byte = *bytes.get(at)?;
        let marker = Style::from_marker(byte as char)?.marker();
        if is_escaped(text, at) {
            return None;
        }

        let mut start = at;
        while start > limits.start && bytes[start - 1] == byte && !is_escaped(text, start - 1) {
            start -= 1;
        }
        let mut end = at + 1;
        while end < limits.end && bytes[end] == byte {
            end += 1;
        }
        Some(MarkerRun { marker, start, end })
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Only runs of exactly one marker are rewrite candidates.
    pub fn is_single(&self) -> bool {
        self.len() == 1
    }
}

/// Sorted, disjoint regions that a stage must neither match inside nor split.
#[derive(Debug, Clone, Copy, Default)]
pub struct Protected<'a> {
    ranges: &'a [Range<usize>],
}

impl<'a> Protected<'a> {
    pub fn new(ranges: &'a [Range<usize>]) -> Self {
        debug_assert!(
            ranges.windows(2).all(|w| w[0].end <= w[1].start),
            "protected ranges must be sorted and disjoint"
        );
        Protected { ranges }
    }

    pub fn none() -> Self {
        Protected { ranges: &[] }
    }

    /// The protected range containing `pos`, if any.
    pub fn covering(&self, pos: usize) -> Option<Range<usize>> {
        let idx = self.ranges.partition_point(|r| r.start <= pos);
        let candidate = self.ranges.get(idx.checked_sub(1)?)?;
        (candidate.end > pos).then(|| candidate.clone())
    }

    /// Whether `range` shares at least one byte with a protected range.
    pub fn overlaps(&self, range: &Range<usize>) -> bool {
        let idx = self.ranges.partition_point(|r| r.end <= range.start);
        self.ranges[idx..]
            .iter()
            .take_while(|r| r.start < range.end)
            .any(|r| !r.is_empty())
    }

    /// The largest unprotected stretch around `pos`, clipped to `within`.
    pub fn gap_around(&self, pos: usize, within: Range<usize>) -> Range<usize> {
        let idx = self.ranges.partition_point(|r| r.end <= pos);
        let start = idx
            .checked_sub(1)
            .map_or(within.start, |i| self.ranges[i].end.max(within.start));
        let end = self.ranges[idx..]
            .iter()
            .find(|r| r.start > pos)
            .map_or(within.end, |r| r.start.min(within.end));
        start..end
    }

    /// Start of the first protected range that begins at or after `pos`.
    pub fn next_start(&self, pos: usize) -> Option<usize> {
        let idx = self.ranges.partition_point(|r| r.start < pos);
        self.ranges.get(idx).map(|r| r.start)
    }

    pub fn ranges(&self) -> &'a [Range<usize>] {
        self.ranges
    }
}

/// Output of [`splice`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spliced {
    pub text: String,
    /// Where each span's replacement landed in `text`, in span order.
    pub regions: Vec<Range<usize>>,
}

/// Rebuilds `text` with every span replaced.
pub fn splice(text: &str, spans: &[Span]) -> Spliced {
    splice_within(text, 0..text.len(), spans)
}

/// Like [`splice`], restricted to `window`; span ranges stay in `text` coordinates.
pub fn splice_within(text: &str, window: Range<usize>, spans: &[Span]) -> Spliced {
    let mut out = String::with_capacity(window.len());
    let mut regions = Vec::with_capacity(spans.len());
    let mut cursor = window.start;

    for span in spans {
        debug_assert!(
            span.range.start >= cursor && span.range.end <= window.end,
            "spans must be sorted, disjoint and inside the window"
        );
        out.push_str(&text[cursor..span.range.start]);
        let start = out.len();
        out.push_str(&span.replacement);
        regions.push(start..out.len());
        cursor = span.range.end;
    }
    out.push_str(&text[cursor..window.end]);

    Spliced {
        text: out,
        regions,
    }
}

/// Maps protected ranges through the splice of `spans`.
///
/// A range that lies inside a span is dropped; the span's own region covers it afterwards.
pub fn shift_ranges(ranges: &[Range<usize>], spans: &[Span]) -> Vec<Range<usize>> {
    let mut shifted = Vec::with_capacity(ranges.len());
    let mut grown = 0usize;
    let mut shrunk = 0usize;
    let mut next = 0;

    for range in ranges {
        while let Some(span) = spans.get(next) {
            if span.range.end > range.start {
                break;
            }
            grown += span.replacement.len();
            shrunk += span.range.len();
            next += 1;
        }
        if spans
            .get(next)
            .is_some_and(|span| span.range.start <= range.start && range.end <= span.range.end)
        {
            continue;
        }
        shifted.push(range.start + grown - shrunk..range.end + grown - shrunk);
    }
    shifted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_markers_round_trip() {
        for style in [Style::Bold, Style::Italic, Style::Strike] {
            assert_eq!(Style::from_marker(style.marker()), Some(style));
        }
        assert_eq!(Style::from_marker('#'), None);
    }

    #[test]
    fn test_combine_keeps_strike_nesting_order() {
        assert_eq!(
            Emphasis::combine(Style::Strike, Emphasis::Bold),
            Some(Emphasis::BoldStrike {
                bold_outside: false
            })
        );
        assert_eq!(
            Emphasis::combine(Style::Bold, Emphasis::Strike),
            Some(Emphasis::BoldStrike { bold_outside: true })
        );
        assert_eq!(
            Emphasis::combine(Style::Italic, Emphasis::Bold),
            Some(Emphasis::BoldItalic)
        );
        assert_eq!(Emphasis::combine(Style::Bold, Emphasis::Bold), None);
        assert_eq!(Emphasis::combine(Style::Strike, Emphasis::BoldItalic), None);
    }

    #[test]
    fn test_marker_run_is_maximal() {
        let text = "a***b*c";
        let run = MarkerRun::at(text, 2, 0..text.len()).unwrap();
        assert_eq!((run.start, run.end), (1, 4));
        assert!(!run.is_single());

        let single = MarkerRun::at(text, 5, 0..text.len()).unwrap();
        assert!(single.is_single());
        assert!(MarkerRun::at(text, 0, 0..text.len()).is_none());
    }

    #[test]
    fn test_marker_run_skips_escaped_markers() {
        let text = r"a\**b";
        assert!(MarkerRun::at(text, 2, 0..text.len()).is_none());
        let run = MarkerRun::at(text, 3, 0..text.len()).unwrap();
        assert_eq!((run.start, run.end), (3, 4));
        assert!(run.is_single());
    }

    #[test]
    fn test_marker_run_stops_at_limits() {
        let text = "**";
        let run = MarkerRun::at(text, 1, 1..2).unwrap();
        assert!(run.is_single());
    }

    #[test]
    fn test_protected_lookup() {
        let ranges = [2..5, 8..8, 10..12];
        let protected = Protected::new(&ranges);
        assert_eq!(protected.covering(2), Some(2..5));
        assert_eq!(protected.covering(4), Some(2..5));
        assert_eq!(protected.covering(5), None);
        assert_eq!(protected.covering(8), None);
        assert!(protected.overlaps(&(4..6)));
        assert!(!protected.overlaps(&(5..10)));
        assert_eq!(protected.gap_around(6, 0..20), 5..8);
        assert_eq!(protected.gap_around(9, 0..20), 8..10);
        assert_eq!(protected.gap_around(0, 0..20), 0..2);
        assert_eq!(protected.gap_around(15, 0..13), 12..13);
        assert_eq!(protected.next_start(5), Some(8));
        assert_eq!(protected.next_start(10), Some(10));
        assert_eq!(protected.next_start(11), None);
    }

    #[test]
    fn test_splice_reports_output_regions() {
        let text = "a <x> b <y> c";
        let spans = vec![
            Span::new(2..5, Kind::Link, "xx"),
            Span::new(8..11, Kind::Link, "yyyy"),
        ];
        let spliced = splice(text, &spans);
        assert_eq!(spliced.text, "a xx b yyyy c");
        assert_eq!(spliced.regions, vec![2..4, 7..11]);
        assert_eq!(&spliced.text[spliced.regions[1].clone()], "yyyy");
    }

    #[test]
    fn test_splice_within_window() {
        let text = "[*a* b]";
        let spans = vec![Span::new(1..4, Kind::Emphasis(Emphasis::Bold), "**a**")];
        assert_eq!(splice_within(text, 1..6, &spans).text, "**a** b");
    }

    #[test]
    fn test_shift_ranges_follows_replacements() {
        let spans = vec![Span::new(0..3, Kind::Link, "a"), Span::new(10..11, Kind::Link, "bbb")];
        let shifted = shift_ranges(&[4..6, 12..13], &spans);
        assert_eq!(shifted, vec![2..4, 12..13]);
    }

    #[test]
    fn test_shift_ranges_drops_enclosed_ranges() {
        let spans = vec![Span::new(0..10, Kind::Emphasis(Emphasis::Bold), "**see [x](y)**")];
        let shifted = shift_ranges(&[5..8, 11..12], &spans);
        assert_eq!(shifted, vec![15..16]);
    }
}
