//! Mention payloads
//!
//! Slack reuses the `<…>` token syntax for mentions. The payload's first character says what it
//! is: `@` for a user, `#` for a channel and `!` for special commands (`here`, `channel`,
//! `everyone`, user groups and formatted dates). An optional `|label` carries the text Slack
//! showed at export time.
//!
//! Names, handles and date fallbacks are written with [`escape_inline`], so a name such as
//! `_ops_` cannot turn into emphasis when the output is converted again. Group handles render in
//! the same `@**…**` form as users.

use crate::directory::Directory;
use crate::escape::escape_inline;
use crate::span::Kind;

const BROADCAST: &str = "@**all**";

/// How a mention payload resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mention {
    /// Write `text` in place of the token.
    Resolved { kind: Kind, text: String },
    /// A mention we cannot name; the token stays as it is.
    Unresolved,
}

/// Resolve a bracket payload as a mention.
///
/// Returns `None` when the payload is not mention syntax at all, in which case the ordinary
/// link rules apply.
pub fn resolve(payload: &str, directory: &Directory) -> Option<Mention> {
    let (head, label) = match payload.split_once('|') {
        Some((head, label)) => (head, Some(label).filter(|l| !l.is_empty())),
        None => (payload, None),
    };

    if let Some(id) = head.strip_prefix('@') {
        return is_slack_id(id).then(|| resolve_user(id, label, directory));
    }
    if let Some(id) = head.strip_prefix('#') {
        return is_slack_id(id).then(|| resolve_channel(id, label, directory));
    }
    head.strip_prefix('!').map(|command| resolve_command(command, label))
}

fn resolve_user(id: &str, label: Option<&str>, directory: &Directory) -> Mention {
    let name = directory
        .user_name(id)
        .or_else(|| label.map(|l| l.trim_start_matches('@')));
    match name {
        Some(name) if !name.is_empty() => Mention::Resolved {
            kind: Kind::UserMention(id.to_string()),
            text: format!("@**{}**", escape_inline(name)),
        },
        _ => Mention::Unresolved,
    }
}

fn resolve_channel(id: &str, label: Option<&str>, directory: &Directory) -> Mention {
    let name = label
        .map(|l| l.trim_start_matches('#'))
        .or_else(|| directory.channel_name(id));
    match name {
        Some(name) if !name.is_empty() => Mention::Resolved {
            kind: Kind::ChannelMention,
            text: format!("#**{}**", escape_inline(name)),
        },
        _ => Mention::Unresolved,
    }
}

fn resolve_command(command: &str, label: Option<&str>) -> Mention {
    match command {
        "here" | "channel" | "everyone" => Mention::Resolved {
            kind: Kind::BroadcastMention,
            text: BROADCAST.to_string(),
        },
        _ if command.starts_with("subteam^") => match label.map(|l| l.trim_start_matches('@')) {
            Some(handle) if !handle.is_empty() => Mention::Resolved {
                kind: Kind::GroupMention,
                text: format!("@**{}**", escape_inline(handle)),
            },
            _ => Mention::Unresolved,
        },
        _ if command.starts_with("date^") => match label {
            Some(fallback) => Mention::Resolved {
                kind: Kind::Date,
                text: escape_inline(fallback),
            },
            None => Mention::Unresolved,
        },
        _ => Mention::Unresolved,
    }
}

fn is_slack_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric())
}
