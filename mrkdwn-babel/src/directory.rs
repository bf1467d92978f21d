//! Lookup tables for mention resolution
//!
//! Slack messages refer to people and channels by opaque ids (`U024BE7LH`, `C024BE91L`). The
//! importer fills a [`Directory`] from the export's `users.json` and `channels.json` (see
//! [`crate::export`]) so that mentions can be written with readable names.

use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    users: HashMap<String, String>,
    channels: HashMap<String, String>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user. A later entry for the same id replaces the earlier one.
    pub fn insert_user(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.users.insert(id.into(), name.into());
    }

    /// Register a channel. A later entry for the same id replaces the earlier one.
    pub fn insert_channel(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.channels.insert(id.into(), name.into());
    }

    pub fn user_name(&self, id: &str) -> Option<&str> {
        self.users.get(id).map(String::as_str)
    }

    pub fn channel_name(&self, id: &str) -> Option<&str> {
        self.channels.get(id).map(String::as_str)
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.channels.is_empty()
    }
}
