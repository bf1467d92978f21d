//! Snapshot of a full multi-line message

use insta::assert_snapshot;
use mrkdwn_babel::{ConversionOptions, Directory, ItalicStyle, Pipeline};
use std::path::PathBuf;

fn load_fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("conversion")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"))
}

fn pipeline(options: &ConversionOptions) -> Pipeline {
    let mut directory = Directory::new();
    directory.insert_user("U1", "Ada Lovelace");
    Pipeline::with_options(options, directory)
}

#[test]
fn test_release_thread() {
    let text = load_fixture("release_thread.txt");
    let output = pipeline(&ConversionOptions::default()).convert(&text);
    assert_snapshot!(output.trim_end(), @r"
    **Release notes** for [v1.2](https://example.com/releases/1.2)
    - __faster__ startup, see https://example.com/perf
    - ~~removed~~ the `*legacy*` flag
    - thanks @**Ada Lovelace** and @**all**
    Mid~word~ stays, ~~done~~ too
    ");
}

#[test]
fn test_release_thread_star_italic() {
    let text = load_fixture("release_thread.txt");
    let options = ConversionOptions {
        italic_style: ItalicStyle::Star,
        ..Default::default()
    };
    let output = pipeline(&options).convert(&text);
    assert_snapshot!(output.trim_end(), @r"
    **Release notes** for [v1.2](https://example.com/releases/1.2)
    - *faster* startup, see https://example.com/perf
    - ~~removed~~ the `*legacy*` flag
    - thanks @**Ada Lovelace** and @**all**
    Mid~word~ stays, ~~done~~ too
    ");
}
