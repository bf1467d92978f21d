//! Mention resolution through the pipeline

use mrkdwn_babel::{ConversionOptions, Directory, Pipeline};

fn pipeline() -> Pipeline {
    let mut directory = Directory::new();
    directory.insert_user("U024BE7LH", "Ada Lovelace");
    directory.insert_channel("C024BE91L", "general");
    Pipeline::with_options(&ConversionOptions::default(), directory)
}

#[test]
fn test_user_and_channel_mentions() {
    let conversion = pipeline().run("<@U024BE7LH> posted in <#C024BE91L>");
    assert_eq!(conversion.text, "@**Ada Lovelace** posted in #**general**");
    assert_eq!(conversion.mentioned_user_ids, vec!["U024BE7LH"]);
    assert!(!conversion.has_link);
}

#[test]
fn test_broadcasts_and_groups() {
    let pipeline = pipeline();
    assert_eq!(pipeline.convert("<!channel> lunch"), "@**all** lunch");
    assert_eq!(pipeline.convert("<!everyone>"), "@**all**");
    assert_eq!(pipeline.convert("<!subteam^SAZ94GDB8|@devs> ping"), "@**devs** ping");
    assert_eq!(
        pipeline.convert("due <!date^1392734382^{date_short}|Feb 18, 2014>"),
        "due Feb 18, 2014"
    );
}

#[test]
fn test_inserted_names_convert_once() {
    let mut directory = Directory::new();
    directory.insert_user("U1", "_ops_ bot");
    let pipeline = Pipeline::with_options(&ConversionOptions::default(), directory);

    for (text, expected) in [
        ("<@U1> *hi*", r"@**\_ops\_ bot** **hi**"),
        ("<!subteam^S1|@*leads*>", r"@**\*leads\***"),
        ("<!date^1392734382^{date}|*Feb* 18>", r"\*Feb\* 18"),
    ] {
        let once = pipeline.convert(text);
        assert_eq!(once, expected);
        assert_eq!(pipeline.convert(&once), once, "{text}");
    }
}

#[test]
fn test_unknown_mentions_stay_literal() {
    let conversion = pipeline().run("<@U999> and <!nonsense>");
    assert_eq!(conversion.text, "<@U999> and <!nonsense>");
    assert!(conversion.mentioned_user_ids.is_empty());
}

#[test]
fn test_mention_output_is_not_emphasis_input() {
    let mut directory = Directory::new();
    directory.insert_user("U1", "snake_case_bot");
    let pipeline = Pipeline::with_options(&ConversionOptions::default(), directory);
    assert_eq!(pipeline.convert("<@U1> *hi*"), "@**snake_case_bot** **hi**");
}

#[test]
fn test_disabled_mentions_use_link_rules() {
    let options = ConversionOptions {
        mentions: false,
        ..Default::default()
    };
    let pipeline = Pipeline::with_options(&options, Directory::default());
    assert_eq!(pipeline.convert("<!here>"), "!here");
    assert_eq!(pipeline.convert("<@U1|ada>"), "[ada](@U1)");
}
