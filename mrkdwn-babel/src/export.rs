//! Slack export records
//!
//!     A Slack workspace export is a zip of JSON files. Three of them matter here:
//!
//!     - `users.json`: the member list, used to name `<@U…>` mentions
//!     - `channels.json`: the channel list, used to name `<#C…>` mentions
//!     - `<channel>/<day>.json`: the messages of one channel on one day
//!
//!     Only the fields the importer reads are modelled. Messages stay `serde_json::Value` so that
//!     every other field passes through unchanged.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::directory::Directory;
use crate::error::BabelError;
use crate::pipeline::Pipeline;

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Profile {
    #[serde(default)]
    pub real_name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub real_name: Option<String>,
    #[serde(default)]
    pub profile: Profile,
}

impl User {
    /// The name mentions of this user are written with.
    pub fn display_name(&self) -> &str {
        [
            self.profile.real_name.as_deref(),
            self.real_name.as_deref(),
            self.profile.display_name.as_deref(),
        ]
        .into_iter()
        .flatten()
        .find(|name| !name.trim().is_empty())
        .unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Channel {
    pub id: String,
    pub name: String,
}

pub fn parse_users(json: &str) -> Result<Vec<User>, BabelError> {
    parse_records(json, "users")
}

pub fn parse_channels(json: &str) -> Result<Vec<Channel>, BabelError> {
    parse_records(json, "channels")
}

fn parse_records<T: DeserializeOwned>(json: &str, what: &str) -> Result<Vec<T>, BabelError> {
    let value: Value = serde_json::from_str(json)?;
    if !value.is_array() {
        return Err(BabelError::InvalidRecord(format!("{what} must be a JSON array")));
    }
    serde_json::from_value(value).map_err(|e| BabelError::InvalidRecord(format!("{what}: {e}")))
}

impl Directory {
    /// Build a directory from the contents of `users.json` and `channels.json`.
    pub fn from_export(users: Option<&str>, channels: Option<&str>) -> Result<Self, BabelError> {
        let mut directory = Directory::new();
        if let Some(json) = users {
            for user in parse_users(json)? {
                let name = user.display_name().to_string();
                directory.insert_user(user.id, name);
            }
        }
        if let Some(json) = channels {
            for channel in parse_channels(json)? {
                directory.insert_channel(channel.id, channel.name);
            }
        }
        Ok(directory)
    }
}

/// Convert the `text` of every message in a channel day file.
///
/// Each message gains `has_link` and `mentioned_user_ids`. Messages without a `text` string
/// (joins, file shares) are passed through untouched.
pub fn convert_messages(json: &str, pipeline: &Pipeline) -> Result<Vec<Value>, BabelError> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Array(messages) = value else {
        return Err(BabelError::InvalidRecord(
            "channel file must be a JSON array of messages".to_string(),
        ));
    };

    messages
        .into_iter()
        .enumerate()
        .map(|(index, mut message)| {
            let Some(object) = message.as_object_mut() else {
                return Err(BabelError::InvalidRecord(format!(
                    "message {index} is not an object"
                )));
            };
            let Some(text) = object.get("text").and_then(Value::as_str) else {
                return Ok(message);
            };

            let conversion = pipeline.run(text);
            object.insert("text".to_string(), Value::String(conversion.text));
            object.insert("has_link".to_string(), Value::Bool(conversion.has_link));
            object.insert(
                "mentioned_user_ids".to_string(),
                Value::from(conversion.mentioned_user_ids),
            );
            Ok(message)
        })
        .collect()
}
