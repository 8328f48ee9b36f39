use std::fmt::Write;

use crate::token::Token;

/// Renders a matched token as one line of the `generate-tokens` text format:
/// `(line:column)Type:keyword/text/items`, with items as `column:text` pairs
/// joined by commas. The end-of-input token renders as a bare `EOF`.
pub fn format_token(token: &Token) -> String {
    if token.is_eof() {
        return "EOF".to_string();
    }
    let mut out = String::new();
    let _ = write!(
        out,
        "({}:{}){}:{}/{}/",
        token.location.line,
        token.location.column,
        token.matched_type,
        token.matched_keyword.as_deref().unwrap_or(""),
        token.matched_text.as_deref().unwrap_or(""),
    );
    for (i, item) in token.matched_items.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        let _ = write!(out, "{}:{}", item.column, item.text);
    }
    out
}
