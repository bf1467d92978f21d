//! Slack export day files

use mrkdwn_babel::export::convert_messages;
use mrkdwn_babel::{BabelError, ConversionOptions, Directory, Pipeline};
use serde_json::json;

const USERS: &str = r#"[
    {"id": "U1", "name": "ada", "profile": {"real_name": "Ada Lovelace", "display_name": "ada"}},
    {"id": "U2", "name": "grace", "profile": {"display_name": "Grace"}}
]"#;

const CHANNELS: &str = r#"[{"id": "C1", "name": "general", "created": 1360782804}]"#;

const DAY: &str = r#"[
    {"type": "message", "user": "U1", "ts": "1.1", "text": "<@U2> see <#C1>, *urgent*"},
    {"type": "message", "user": "U2", "ts": "1.2", "text": "on it _now_ <https://status.io>",
     "reactions": [{"name": "+1", "count": 1}]}
]"#;

#[test]
fn test_day_file_round_trip() {
    let directory = Directory::from_export(Some(USERS), Some(CHANNELS)).expect("export to load");
    let pipeline = Pipeline::with_options(&ConversionOptions::default(), directory);

    let messages = convert_messages(DAY, &pipeline).expect("day file to convert");
    assert_eq!(messages.len(), 2);

    assert_eq!(messages[0]["text"], "@**Grace** see #**general**, **urgent**");
    assert_eq!(messages[0]["mentioned_user_ids"], json!(["U2"]));
    assert_eq!(messages[0]["has_link"], json!(false));

    assert_eq!(messages[1]["text"], "on it __now__ https://status.io");
    assert_eq!(messages[1]["has_link"], json!(true));
    assert_eq!(messages[1]["reactions"][0]["name"], "+1");
}

#[test]
fn test_malformed_export_files() {
    match Directory::from_export(Some("not json"), None) {
        Err(BabelError::Parse(_)) => {}
        other => panic!("Expected parse error, got {other:?}"),
    }
    match convert_messages(r#"{"messages": []}"#, &Pipeline::default()) {
        Err(BabelError::InvalidRecord(msg)) => assert!(msg.contains("array")),
        other => panic!("Expected invalid record error, got {other:?}"),
    }
}
