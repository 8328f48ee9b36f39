//! Line-level tokenizer for Gherkin feature files.
//!
//! The pipeline mirrors the classic Gherkin token generator: a scanner turns
//! input into one raw token per line, a dialect-aware matcher classifies each
//! token, and the formatter renders the result one token per line.

pub mod cli;
pub mod dialect;
pub mod error;
pub mod format;
pub mod line;
pub mod matcher;
pub mod scanner;
pub mod stream;
pub mod token;

pub use error::ParseError;
pub use stream::TokenStream;
pub use token::{Location, Token, TokenType};

pub(crate) const TAG_PREFIX: &str = "@";
pub(crate) const COMMENT_PREFIX: &str = "#";
pub(crate) const TITLE_KEYWORD_SEPARATOR: &str = ":";
pub(crate) const TABLE_CELL_SEPARATOR: &str = "|";
pub(crate) const DOCSTRING_SEPARATOR: &str = "\"\"\"";
pub(crate) const DOCSTRING_ALTERNATIVE_SEPARATOR: &str = "```";

/// Scans `source` into its full token list, EOF token included.
pub fn scan_tokens(source: &str) -> Result<Vec<Token>, ParseError> {
    TokenStream::new(source.as_bytes()).collect()
}

/// Scans `source` and renders every token in the text format, one per line.
pub fn format_tokens(source: &str) -> Result<String, ParseError> {
    let mut out = String::new();
    for token in TokenStream::new(source.as_bytes()) {
        out.push_str(&format::format_token(&token?));
        out.push('\n');
    }
    Ok(out)
}
