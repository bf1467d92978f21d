//! Backslash escapes
//!
//! Text that a stage inserts from outside the message (names, group handles, date fallbacks,
//! link labels) must not read as markup when the output is converted again. It is written with
//! Markdown backslash escapes, and every scanner treats an escaped character as plain text.

/// Whether the character at byte `at` follows an odd number of backslashes.
pub fn is_escaped(text: &str, at: usize) -> bool {
    text.as_bytes()[..at]
        .iter()
        .rev()
        .take_while(|b| **b == b'\\')
        .count()
        % 2
        == 1
}

/// The first unescaped character from `from` on that satisfies `pred`.
///
/// `from` must not itself follow a backslash.
pub fn find_unescaped(text: &str, from: usize, pred: impl Fn(char) -> bool) -> Option<usize> {
    let mut chars = text[from..].char_indices();
    while let Some((offset, c)) = chars.next() {
        if c == '\\' {
            chars.next();
            continue;
        }
        if pred(c) {
            return Some(from + offset);
        }
    }
    None
}

/// Escapes text that lands in running prose: a display name, a handle or a date fallback.
///
/// Emphasis markers are left alone when a letter or digit sits on both sides, since they can
/// neither open nor close a span there (`snake_case` stays readable). Line breaks become spaces.
pub fn escape_inline(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 8);

    for (i, &c) in chars.iter().enumerate() {
        let escape = match c {
            '\\' | '`' | '<' | '>' | '[' | ']' => true,
            '*' | '_' | '~' => {
                let word = |j: Option<usize>| {
                    j.and_then(|j| chars.get(j)).is_some_and(|c| c.is_alphanumeric())
                };
                !(word(i.checked_sub(1)) && word(Some(i + 1)))
            }
            ':' => {
                let slashes = chars[i + 1..].starts_with(&['/', '/']);
                let mailto = i >= 6
                    && chars[i - 6..]
                        .iter()
                        .take(6)
                        .collect::<String>()
                        .eq_ignore_ascii_case("mailto");
                slashes || mailto
            }
            '\n' => {
                out.push(' ');
                continue;
            }
            _ => false,
        };
        if escape {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Escapes the display text of a Markdown link so that its brackets stay balanced.
pub fn escape_label(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 4);
    for c in text.chars() {
        if matches!(c, '\\' | '[' | ']' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
