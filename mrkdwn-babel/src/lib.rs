//! Slack mrkdwn to Markdown conversion
//!
//!     Slack stores message bodies in its own markup ("mrkdwn"): single-marker emphasis
//!     (`*bold*`, `_italic_`, `~strike~`) and angle-bracket links (`<https://x.io|label>`). This
//!     crate rewrites a message body into the Markdown dialect of the importing system:
//!     `**bold**`, `__italic__`, `~~strike~~` and `[label](https://x.io)`.
//!
//!     This is a pure lib: it powers the mrkdwn cli but never prints, reads the environment or
//!     touches the file system. Converting a message body is total; malformed markup passes
//!     through as literal text.
//!
//! Architecture
//!
//!     A conversion is a [`Pipeline`] of [`Rewriter`] stages run in order. Each stage scans the
//!     current text and reports [`span::Span`]s (a byte range plus its replacement). The pipeline
//!     splices them in one pass and marks every replaced region as protected, so later stages
//!     never rewrite the output of earlier ones. Converting the output a second time changes
//!     nothing, with the default italic style.
//!
//!     The file structure :
//!     .
//!     ├── boundary.rs      # Which neighbours may surround an emphasis marker
//!     ├── code.rs          # Inline and fenced code protection
//!     ├── directory.rs     # User and channel names for mentions
//!     ├── emphasis.rs      # Single-marker emphasis rewriter
//!     ├── error.rs
//!     ├── escape.rs        # Backslash escapes for inserted text
//!     ├── export.rs        # Slack export records (users, channels, day files)
//!     ├── links.rs         # Bracket link rewriter
//!     ├── mentions.rs      # <@U…>, <#C…>, <!here> payloads
//!     ├── options.rs
//!     ├── pipeline.rs      # Stage ordering and the conversion report
//!     ├── rewriter.rs      # Rewriter trait
//!     └── span.rs          # Spans, marker runs, splicing
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     ├── conversion
//!     │   ├── <area>.rs
//!     │   └── snapshots
//!     └── properties.rs
//!
//!     Rust does not discover tests in subdirectories, so tests/lib.rs includes them.

pub mod boundary;
pub mod code;
pub mod directory;
pub mod emphasis;
pub mod error;
pub mod escape;
pub mod export;
pub mod links;
pub mod mentions;
pub mod options;
pub mod pipeline;
pub mod rewriter;
pub mod span;

pub use directory::Directory;
pub use error::BabelError;
pub use options::{ConversionOptions, ItalicStyle};
pub use pipeline::{convert, Conversion, Pipeline};
pub use rewriter::Rewriter;
