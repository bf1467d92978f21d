//! Rewriter trait definition
//!
//! A pipeline is an ordered list of rewriter stages. Each stage looks at the text produced by the
//! stages before it and reports what it wants to replace; it never builds strings for the whole
//! message itself. That keeps every stage a pure scanner and leaves splicing to one place.

use crate::span::{splice, Protected, Span};

/// A single stage of the conversion pipeline
///
/// # Examples
///
/// ```ignore
/// struct Shout;
///
/// impl Rewriter for Shout {
///     fn name(&self) -> &str {
///         "shout"
///     }
///
///     fn scan(&self, text: &str, _protected: Protected<'_>) -> Vec<Span> {
///         text.match_indices('!')
///             .map(|(at, _)| Span::new(at..at + 1, Kind::Link, "!!"))
///             .collect()
///     }
/// }
/// ```
pub trait Rewriter: Send + Sync {
    /// The name of this stage (e.g., "links", "emphasis")
    fn name(&self) -> &str;

    /// Optional one-line description, used by `--list-rewriters`
    fn description(&self) -> &str {
        ""
    }

    /// Find everything this stage rewrites in `text`.
    ///
    /// Returned spans must be sorted by start and must not overlap each other. A span may enclose
    /// a protected range whole but never start or end inside one.
    fn scan(&self, text: &str, protected: Protected<'_>) -> Vec<Span>;

    /// Run this stage alone over `text`.
    fn rewrite(&self, text: &str) -> String {
        splice(text, &self.scan(text, Protected::none())).text
    }
}
