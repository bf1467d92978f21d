use serde::{Deserialize, Serialize};

use crate::boundary::DEFAULT_MENTION_PREFIXES;

/// How italic spans are written in the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItalicStyle {
    /// `__text__`; every emitted marker run is at least two long, so re-running the pipeline
    /// leaves its own output alone
    #[default]
    Doubled,
    /// `*text*`, for dialects that spell italics with one star. A second conversion reads that
    /// star as Slack bold, so converting the output again is not a no-op in this style.
    Star,
}

/// Knobs for a conversion pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionOptions {
    /// Rewrite `<…>` link tokens
    pub links: bool,

    /// Resolve `<@U…>`, `<#C…>` and `<!…>` payloads as mentions instead of links
    pub mentions: bool,

    /// Rewrite single-marker emphasis
    pub emphasis: bool,

    /// Never rewrite inside inline or fenced code
    pub protect_code: bool,

    /// Output form of italic spans
    pub italic_style: ItalicStyle,

    /// Left neighbours that stop an italic opener
    pub mention_prefixes: Vec<char>,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            links: true,
            mentions: true,
            emphasis: true,
            protect_code: true,
            italic_style: ItalicStyle::Doubled,
            mention_prefixes: DEFAULT_MENTION_PREFIXES.to_vec(),
        }
    }
}
