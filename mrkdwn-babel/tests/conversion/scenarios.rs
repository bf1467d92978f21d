//! Message-level conversions over the default pipeline

use mrkdwn_babel::convert;

#[test]
fn test_multi_pipe_link_keeps_trailing_pipes() {
    assert_eq!(
        convert("<https://foo.com|foo|oof>"),
        "[foo|oof](https://foo.com)"
    );
}

#[test]
fn test_mailto_collapses_to_address() {
    assert_eq!(
        convert("<mailto:random@gmail.com|random@gmail.com>"),
        "mailto:random@gmail.com"
    );
}

#[test]
fn test_strike_inside_punctuation() {
    assert_eq!(
        convert("(~str ike!~, text. ~Also ~)"),
        "(~~str ike!~~, text. ~~Also ~~)"
    );
}

#[test]
fn test_mid_word_and_doubled_tilde_unchanged() {
    let text = "Mid~word~ strike. Also ~~strike~~)";
    assert_eq!(convert(text), text);
}

#[test]
fn test_bold_italic_either_nesting() {
    let expected = "***test bold and italic message***";
    assert_eq!(convert("*_test bold and italic message_*"), expected);
    assert_eq!(convert("_*test bold and italic message*_"), expected);
}

#[test]
fn test_strike_nesting_order_is_kept() {
    assert_eq!(
        convert("~*bold*~ and *~strike~*."),
        "~~**bold**~~ and **~~strike~~**."
    );
}

#[test]
fn test_adjacent_spans_are_not_greedy() {
    assert_eq!(convert("*foo* *baz* *bar*"), "**foo** **baz** **bar**");
}

#[test]
fn test_triple_run_is_never_a_candidate() {
    assert_eq!(convert("***word***"), "***word***");
}

#[test]
fn test_italic_after_mention_prefix_unchanged() {
    assert_eq!(convert("@_italics_"), "@_italics_");
    assert_eq!(convert("@*bold*"), "@**bold**");
}

#[test]
fn test_emphasis_does_not_cross_lines() {
    assert_eq!(convert("*one\ntwo*"), "*one\ntwo*");
    assert_eq!(convert("*one*\n_two_"), "**one**\n__two__");
}

#[test]
fn test_unbalanced_markers_are_literal() {
    assert_eq!(convert("2 * 3 = 6"), "2 * 3 = 6");
    assert_eq!(convert("snake_case_name"), "snake_case_name");
    assert_eq!(convert("* not bold*"), "* not bold*");
    assert_eq!(convert("*"), "*");
    assert_eq!(convert(""), "");
}

#[test]
fn test_emphasis_inside_link_label_is_kept() {
    assert_eq!(
        convert("<https://foo.com|*docs*> and *more*"),
        "[*docs*](https://foo.com) and **more**"
    );
}

#[test]
fn test_code_is_protected() {
    assert_eq!(
        convert("run `make *all*` then *ship*"),
        "run `make *all*` then **ship**"
    );
    assert_eq!(
        convert("```\n*x* <https://a.io>\n```\n_y_"),
        "```\n*x* <https://a.io>\n```\n__y__"
    );
}

#[test]
fn test_bare_url_paths_keep_their_markers() {
    assert_eq!(
        convert("see <https://en.wikipedia.org/wiki/_Foo_>"),
        "see https://en.wikipedia.org/wiki/_Foo_"
    );
    assert_eq!(
        convert("https://x.io/~a~/b and ~c~"),
        "https://x.io/~a~/b and ~~c~~"
    );
}

#[test]
fn test_crossing_markers() {
    assert_eq!(convert("~*a~*"), "~~*a~~*");
    assert_eq!(convert("*~*~"), "**~**~");
}

#[test]
fn test_link_display_with_trailing_space() {
    assert_eq!(convert("<https://x.io|label >"), "[label ](https://x.io)");
    assert_eq!(convert("<https://x.io |label>"), "<https://x.io |label>");
}

#[test]
fn test_converted_output_is_stable() {
    for text in [
        "*foo* _bar_ ~baz~ <https://foo.com|foo>",
        "~*bold*~ and *~strike~*.",
        "*_mixed_* <mailto:a@b.io|a>",
        "<https://en.wikipedia.org/wiki/_Foo_> _x_",
        "<https://x.io/~a~/b>",
        "~*a~* *~*~ *a _b* c_",
        "<https://x.io|label >",
        "<https://x.io|[1] *a*>",
    ] {
        let once = convert(text);
        assert_eq!(convert(&once), once, "{text}");
    }
}
