//! Escaping shared by the text formats and the parsers.
//!
//! Stack traces are line-delimited and tab-indented, so any backslash, tab,
//! newline, or double quote inside a function name or file path would make a
//! multi-frame dump ambiguous. Every text format escapes these characters on
//! output and the parsers reverse the mapping on input.

use std::borrow::Cow;

/// Characters rewritten by [`escape`]; the inverse table is implicit in
/// [`unescape`].
const ESCAPED: [char; 4] = ['\\', '\t', '\n', '"'];

/// Escapes the characters in [`ESCAPED`], borrowing when nothing needs to
/// change.
pub(crate) fn escape(input: &str) -> Cow<'_, str> {
    if !input.contains(ESCAPED) {
        return Cow::Borrowed(input);
    }
    let mut out = String::with_capacity(input.len() + 4);
    for ch in input.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '"' => out.push_str("\\\""),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Reverses [`escape`] in a single pass. Escape sequences outside the table
/// are preserved verbatim, including a trailing lone backslash.
pub(crate) fn unescape(input: &str) -> Cow<'_, str> {
    if !input.contains('\\') {
        return Cow::Borrowed(input);
    }
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    Cow::Owned(out)
}
