//! Conversion tests
//!
//! End-to-end tests over the default pipeline and the Slack export surface.

mod export;
mod fixtures_snapshot;
mod mentions;
mod scenarios;
