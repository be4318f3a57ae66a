//! Annotation engine — `@tg` directives embedded in comments.
//!
//! A directive line is a comment whose text starts with the marker token:
//!
//! ```text
//! // @tg validate=true,max=10 desc="free text, with commas"
//! ```
//!
//! Parsing is deliberately lenient. Comments are human prose, so anything
//! that is not a complete `key=value` pair is dropped instead of reported.
//!
//! ## Conflict policies
//!
//! 1. **Within one line**: a repeated key appends with a comma (`a=1 a=2` → `1,2`)
//! 2. **Across lines / merges**: the later mapping wins

mod lexer;
mod syntax;
mod tags;

pub use syntax::DirectiveSyntax;
pub use tags::Tags;

/// Parse one `// @tg ...` comment line with the default syntax.
pub fn parse_comment(line: &str) -> Tags {
    DirectiveSyntax::DEFAULT.parse_comment(line)
}

/// Parse a comment block with the default syntax, merging line by line.
pub fn parse_lines(text: &str) -> Tags {
    DirectiveSyntax::DEFAULT.parse_lines(text)
}
