//! Conversion pipeline
//!
//! The pipeline owns an ordered list of [`Rewriter`] stages and runs them over one message body.
//! Between stages it splices once and carries the protected regions forward: code found by the
//! first stage and every replacement made by any stage are opaque to the stages after it.
//!
//! The default order is `code`, `links`, `emphasis`.

use std::ops::Range;

use tracing::debug;

use crate::boundary::BoundaryClassifier;
use crate::code::CodeGuard;
use crate::directory::Directory;
use crate::emphasis::EmphasisRewriter;
use crate::error::BabelError;
use crate::links::LinkRewriter;
use crate::options::ConversionOptions;
use crate::rewriter::Rewriter;
use crate::span::{shift_ranges, splice, Kind, Protected, Span};

/// Result of converting one message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversion {
    pub text: String,
    /// Resolved user mentions in order of first appearance.
    pub mentioned_user_ids: Vec<String>,
    /// Whether the output contains a link or mail address.
    pub has_link: bool,
}

impl Conversion {
    fn record(&mut self, span: &Span) {
        match &span.kind {
            Kind::Link | Kind::Mailto => self.has_link = true,
            Kind::UserMention(id) => {
                if !self.mentioned_user_ids.contains(id) {
                    self.mentioned_user_ids.push(id.clone());
                }
            }
            Kind::Code
            | Kind::ChannelMention
            | Kind::BroadcastMention
            | Kind::GroupMention
            | Kind::Date
            | Kind::Emphasis(_) => {}
        }
    }
}

/// Ordered rewriter stages.
///
/// # Examples
///
/// ```ignore
/// let pipeline = Pipeline::default();
/// assert_eq!(pipeline.convert("*hi* <https://a.io|there>"), "**hi** [there](https://a.io)");
/// ```
pub struct Pipeline {
    stages: Vec<Box<dyn Rewriter>>,
}

impl Pipeline {
    /// A pipeline without stages; `convert` returns its input unchanged.
    pub fn new() -> Self {
        Pipeline { stages: Vec::new() }
    }

    /// Append a stage. Stages run in registration order.
    pub fn register<R: Rewriter + 'static>(&mut self, stage: R) {
        self.stages.push(Box::new(stage));
    }

    /// The stages `options` enable, with mentions resolved against `directory`.
    pub fn with_options(options: &ConversionOptions, directory: Directory) -> Self {
        let mut pipeline = Self::new();

        if options.protect_code {
            pipeline.register(CodeGuard);
        }
        if options.links {
            let links = if options.mentions {
                LinkRewriter::new(directory)
            } else {
                LinkRewriter::without_mentions()
            };
            pipeline.register(links);
        }
        if options.emphasis {
            pipeline.register(EmphasisRewriter::new(
                BoundaryClassifier::new(options.mention_prefixes.iter().copied()),
                options.italic_style,
            ));
        }

        pipeline
    }

    /// The default stages with an empty directory.
    pub fn with_defaults() -> Self {
        Self::with_options(&ConversionOptions::default(), Directory::default())
    }

    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    pub fn stages(&self) -> impl Iterator<Item = &dyn Rewriter> {
        self.stages.iter().map(|stage| stage.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.stages.iter().any(|stage| stage.name() == name)
    }

    pub fn get(&self, name: &str) -> Result<&dyn Rewriter, BabelError> {
        self.stages()
            .find(|stage| stage.name() == name)
            .ok_or_else(|| BabelError::StageNotFound(name.to_string()))
    }

    /// Convert one message body.
    pub fn convert(&self, text: &str) -> String {
        self.run(text).text
    }

    /// Convert one message body and report what was found.
    pub fn run(&self, text: &str) -> Conversion {
        let mut conversion = Conversion::default();
        let mut current = text.to_string();
        let mut protected: Vec<Range<usize>> = Vec::new();

        for stage in &self.stages {
            let spans = stage.scan(&current, Protected::new(&protected));
            debug!(stage = stage.name(), spans = spans.len(), "rewriter stage");
            if spans.is_empty() {
                continue;
            }

            for span in &spans {
                conversion.record(span);
            }

            let spliced = splice(&current, &spans);
            let mut next = shift_ranges(&protected, &spans);
            next.extend(spliced.regions);
            next.sort_by_key(|range| (range.start, range.end));

            protected = next;
            current = spliced.text;
        }

        conversion.text = current;
        conversion
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Convert one Slack message body with the default pipeline.
pub fn convert(text: &str) -> String {
    Pipeline::with_defaults().convert(text)
}
