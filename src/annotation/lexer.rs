//! Tokenizer and lenient pair scanner for directive text.
//!
//! Directive text is whatever follows the marker on a comment line, e.g.
//! `validate=true,max=10 desc="a, b"`. The scanner extracts every complete
//! `key=value` pair and silently drops anything else.

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum DirectiveToken {
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    _Whitespace,

    #[token("=")]
    Assign,

    #[token(",")]
    Comma,

    // Raw string: no escapes, may contain commas and spaces.
    #[regex(r"`[^`]*`")]
    RawString,

    // Interpreted string with backslash escapes.
    #[regex(r#""([^"\\]|\\.)*""#)]
    String,

    #[regex(r#"[^\s,="`]+"#)]
    Word,
}

/// Where the scanner is inside a candidate `key=value` pair.
#[derive(Debug, Clone, Copy)]
enum ScanState<'a> {
    Start,
    Key(&'a str),
    Value(&'a str),
}

/// Scan directive text into `(key, value)` pairs in source order.
///
/// Never fails: unlexable input and incomplete pairs are skipped.
pub(crate) fn scan_pairs(text: &str) -> Vec<(String, String)> {
    let mut lexer = DirectiveToken::lexer(text);
    let mut pairs = Vec::new();
    let mut state = ScanState::Start;

    while let Some(token) = lexer.next() {
        let slice = lexer.slice();
        state = match (state, token) {
            (ScanState::Value(key), Ok(DirectiveToken::Word)) => {
                pairs.push((key.to_owned(), slice.to_owned()));
                ScanState::Start
            }
            (ScanState::Value(key), Ok(DirectiveToken::RawString)) => {
                pairs.push((key.to_owned(), slice[1..slice.len() - 1].to_owned()));
                ScanState::Start
            }
            (ScanState::Value(key), Ok(DirectiveToken::String)) => {
                pairs.push((key.to_owned(), unescape(&slice[1..slice.len() - 1])));
                ScanState::Start
            }
            (ScanState::Key(key), Ok(DirectiveToken::Assign)) => ScanState::Value(key),
            (_, Ok(DirectiveToken::Word)) => ScanState::Key(slice),
            (_, Ok(DirectiveToken::Comma)) => ScanState::Start,
            (_, _) => {
                tracing::trace!(fragment = slice, "ignoring directive fragment");
                ScanState::Start
            }
        };
    }

    if let ScanState::Key(key) | ScanState::Value(key) = state {
        tracing::trace!(key, "ignoring incomplete directive pair");
    }

    pairs
}

/// True when `key` lexes as a single bare word, so a `key=value` pair
/// written with it scans back to the same key.
pub(crate) fn is_key(key: &str) -> bool {
    !key.is_empty()
        && !key.contains(|c: char| c.is_whitespace() || matches!(c, ',' | '=' | '"' | '`'))
}

fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Quote a value so that [`scan_pairs`] reads it back unchanged.
pub(crate) fn quote(value: &str) -> String {
    if !value.contains(['`', '\n', '\r']) {
        return format!("`{value}`");
    }
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}
