//! Directive line syntax: comment prefix and marker token.

use smol_str::SmolStr;

use super::lexer::{is_key, quote, scan_pairs};
use super::tags::Tags;

/// The fixed literals that make a comment line a directive line.
///
/// A line like `// @tg key=value` is a directive when, after stripping the
/// comment prefix and surrounding whitespace, it starts with the marker
/// followed by whitespace or end of line.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DirectiveSyntax {
    /// Token that opens a directive (`@tg`).
    pub marker: SmolStr,
    /// Line comment marker stripped before matching (`//`).
    pub comment_prefix: SmolStr,
}

impl DirectiveSyntax {
    /// The `// @tg` syntax.
    pub const DEFAULT: DirectiveSyntax = DirectiveSyntax {
        marker: SmolStr::new_static("@tg"),
        comment_prefix: SmolStr::new_static("//"),
    };

    /// Create a syntax with a custom marker and comment prefix.
    pub fn new(marker: impl Into<SmolStr>, comment_prefix: impl Into<SmolStr>) -> Self {
        Self {
            marker: marker.into(),
            comment_prefix: comment_prefix.into(),
        }
    }

    /// Return the directive text after the marker, or `None` for ordinary lines.
    pub fn directive_body<'a>(&self, line: &'a str) -> Option<&'a str> {
        let line = line.trim();
        let line = line.strip_prefix(self.comment_prefix.as_str()).unwrap_or(line);
        let rest = line.trim().strip_prefix(self.marker.as_str())?;
        match rest.chars().next() {
            None => Some(rest),
            Some(c) if c.is_whitespace() => Some(rest),
            Some(_) => None,
        }
    }

    /// Parse one comment line into a mapping.
    ///
    /// Repeated keys on the same line are joined with a comma. Unmarked lines
    /// and malformed fragments yield nothing.
    pub fn parse_comment(&self, line: &str) -> Tags {
        let mut tags = Tags::new();
        let Some(body) = self.directive_body(line) else {
            return tags;
        };
        for (key, value) in scan_pairs(body) {
            tracing::trace!(key = %key, value = %value, "directive pair");
            tags.append(key, &value);
        }
        tags
    }

    /// Parse a block of comment text line by line.
    ///
    /// Per-line mappings are merged in line order, so a key repeated on a
    /// later line replaces the earlier value.
    pub fn parse_lines(&self, text: &str) -> Tags {
        text.lines()
            .fold(Tags::new(), |tags, line| tags.merge(&self.parse_comment(line)))
    }

    /// Render a single directive line for `key` and `value`.
    ///
    /// Returns `None` when `key` would not scan back as a single key (empty,
    /// or containing whitespace, `,`, `=` or a quote character).
    pub fn format_directive(&self, key: &str, value: &str) -> Option<String> {
        if !is_key(key) {
            tracing::trace!(key, "skipping key that cannot be written as a directive");
            return None;
        }
        Some(format!(
            "{} {} {}={}",
            self.comment_prefix,
            self.marker,
            key,
            quote(value)
        ))
    }

    /// Re-emit a mapping as directive lines, one per key, in insertion order.
    ///
    /// Keys rejected by [`format_directive`](Self::format_directive) are left out.
    pub fn to_docs(&self, tags: &Tags) -> Vec<String> {
        tags.iter()
            .filter_map(|(key, value)| self.format_directive(key, value))
            .collect()
    }
}

impl Default for DirectiveSyntax {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_body() {
        let syntax = DirectiveSyntax::DEFAULT;

        assert_eq!(syntax.directive_body("// @tg a=1"), Some(" a=1"));
        assert_eq!(syntax.directive_body("  //@tg"), Some(""));
        assert_eq!(syntax.directive_body("@tg a=1"), Some(" a=1"));
        assert_eq!(syntax.directive_body("// plain prose"), None);
        assert_eq!(syntax.directive_body("// @tgx=1"), None);
        assert_eq!(syntax.directive_body("// see @tg a=1"), None);
    }

    #[test]
    fn test_repeated_key_on_one_line_appends() {
        let tags = DirectiveSyntax::DEFAULT.parse_comment("// @tg tag=a tag=b,tag=c");
        assert_eq!(tags.get("tag"), Some("a,b,c"));
    }

    #[test]
    fn test_repeated_key_across_lines_overwrites() {
        let tags = DirectiveSyntax::DEFAULT.parse_lines("// @tg tag=a\n// @tg tag=b\n");
        assert_eq!(tags.get("tag"), Some("b"));
    }

    #[test]
    fn test_custom_syntax() {
        let syntax = DirectiveSyntax::new("@gen", "#");

        let tags = syntax.parse_lines("# @gen name=x\n// @tg name=y\n");
        assert_eq!(tags.get("name"), Some("x"));
        assert_eq!(syntax.to_docs(&tags), vec!["# @gen name=`x`".to_string()]);
    }

    #[test]
    fn test_digit_leading_key() {
        let tags = DirectiveSyntax::DEFAULT.parse_comment("// @tg 2fa=true,x=1");
        assert_eq!(tags.get("2fa"), Some("true"));
        assert_eq!(tags.get("x"), Some("1"));
    }

    #[test]
    fn test_unwritable_keys_are_left_out_of_docs() {
        let syntax = DirectiveSyntax::DEFAULT;
        let mut tags = Tags::new();
        tags.set("my key", ["v"]);
        tags.set("2fa", ["v"]);
        tags.set("a=b", ["v"]);

        assert_eq!(syntax.format_directive("my key", "v"), None);
        let docs = syntax.to_docs(&tags);
        assert_eq!(docs, vec!["// @tg 2fa=`v`".to_string()]);

        let back = syntax.parse_lines(&docs.join("\n"));
        assert_eq!(back.get("2fa"), Some("v"));
        assert_eq!(back.len(), 1);
    }

    #[test]
    fn test_crlf_lines() {
        let tags = DirectiveSyntax::DEFAULT.parse_lines("// @tg a=1\r\n// @tg b=2\r\n");
        assert_eq!(tags.get("a"), Some("1"));
        assert_eq!(tags.get("b"), Some("2"));
    }
}
