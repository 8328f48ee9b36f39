//! Classifies raw scanner tokens into Gherkin token types.
//!
//! The matcher is stateful: an open doc string suppresses keyword matching
//! until the same separator closes it, and a `# language:` directive switches
//! the dialect used for every later line of the file.

use lazy_static::lazy_static;
use regex::Regex;

use crate::dialect::{Dialect, DIALECTS};
use crate::error::ParseError;
use crate::token::{Location, Token, TokenType};
use crate::{
    COMMENT_PREFIX, DOCSTRING_ALTERNATIVE_SEPARATOR, DOCSTRING_SEPARATOR, TABLE_CELL_SEPARATOR,
    TAG_PREFIX, TITLE_KEYWORD_SEPARATOR,
};

lazy_static! {
    static ref LANGUAGE_PATTERN: Regex =
        Regex::new(r"^\s*#\s*language\s*:\s*([a-zA-Z\-_]+)\s*$").expect("language pattern compiles");
}

pub struct TokenMatcher {
    current_dialect: &'static Dialect,
    active_doc_string_separator: Option<&'static str>,
    indent_to_remove: usize,
}

impl Default for TokenMatcher {
    fn default() -> TokenMatcher {
        TokenMatcher::new()
    }
}

impl TokenMatcher {
    pub fn new() -> TokenMatcher {
        TokenMatcher {
            current_dialect: DIALECTS.get_default(),
            active_doc_string_separator: None,
            indent_to_remove: 0,
        }
    }

    pub fn reset(&mut self) {
        self.current_dialect = DIALECTS.get_default();
        self.active_doc_string_separator = None;
        self.indent_to_remove = 0;
    }

    pub fn current_dialect(&self) -> &'static Dialect {
        self.current_dialect
    }

    pub fn has_active_doc_string(&self) -> bool {
        self.active_doc_string_separator.is_some()
    }

    fn set_token_matched(
        &self,
        token: &mut Token,
        matched_type: TokenType,
        text: Option<String>,
        keyword: Option<String>,
        indent: Option<usize>,
        items: Vec<crate::line::LineSpan>,
    ) {
        let matched_indent = match indent {
            Some(indent) => indent,
            None => token.line.as_ref().map_or(0, |line| line.indent()),
        };
        token.matched_type = matched_type;
        token.matched_keyword = keyword;
        token.matched_text = text;
        token.matched_items = items;
        token.matched_indent = matched_indent;
        token.matched_dialect = Some(self.current_dialect.language().to_string());
        token.location = Location::new(token.location.line, matched_indent + 1);
    }

    pub fn match_eof(&self, token: &mut Token) -> bool {
        if !token.is_eof() {
            return false;
        }
        self.set_token_matched(token, TokenType::Eof, None, None, None, Vec::new());
        true
    }

    pub fn match_empty(&self, token: &mut Token) -> bool {
        if !token.line.as_ref().is_some_and(|line| line.is_empty()) {
            return false;
        }
        self.set_token_matched(token, TokenType::Empty, None, None, None, Vec::new());
        true
    }

    pub fn match_comment(&self, token: &mut Token) -> bool {
        let Some(line) = token.line.as_ref() else {
            return false;
        };
        if !line.starts_with(COMMENT_PREFIX) {
            return false;
        }
        let text = line.get_line_text(0).to_string();
        self.set_token_matched(token, TokenType::Comment, Some(text), None, Some(0), Vec::new());
        true
    }

    pub fn match_tag_line(&self, token: &mut Token) -> bool {
        let Some(line) = token.line.as_ref() else {
            return false;
        };
        if !line.starts_with(TAG_PREFIX) {
            return false;
        }
        let tags = line.get_tags();
        self.set_token_matched(token, TokenType::TagLine, None, None, None, tags);
        true
    }

    pub fn match_feature_line(&self, token: &mut Token) -> bool {
        self.match_title_line(token, TokenType::FeatureLine, self.current_dialect.feature_keywords())
    }

    pub fn match_background_line(&self, token: &mut Token) -> bool {
        self.match_title_line(
            token,
            TokenType::BackgroundLine,
            self.current_dialect.background_keywords(),
        )
    }

    pub fn match_scenario_line(&self, token: &mut Token) -> bool {
        self.match_title_line(token, TokenType::ScenarioLine, self.current_dialect.scenario_keywords())
    }

    pub fn match_scenario_outline_line(&self, token: &mut Token) -> bool {
        self.match_title_line(
            token,
            TokenType::ScenarioOutlineLine,
            self.current_dialect.scenario_outline_keywords(),
        )
    }

    pub fn match_examples_line(&self, token: &mut Token) -> bool {
        self.match_title_line(token, TokenType::ExamplesLine, self.current_dialect.examples_keywords())
    }

    fn match_title_line(&self, token: &mut Token, token_type: TokenType, keywords: &[String]) -> bool {
        let Some(line) = token.line.as_ref() else {
            return false;
        };
        let mut matched = None;
        for keyword in keywords {
            if line.starts_with_title_keyword(keyword) {
                let title = line
                    .get_rest_trimmed(keyword.len() + TITLE_KEYWORD_SEPARATOR.len())
                    .to_string();
                matched = Some((keyword.clone(), title));
                break;
            }
        }
        let Some((keyword, title)) = matched else {
            return false;
        };
        self.set_token_matched(token, token_type, Some(title), Some(keyword), None, Vec::new());
        true
    }

    pub fn match_step_line(&self, token: &mut Token) -> bool {
        let Some(line) = token.line.as_ref() else {
            return false;
        };
        let mut matched = None;
        for keyword in self.current_dialect.step_keywords() {
            if line.starts_with(keyword) {
                let text = line.get_rest_trimmed(keyword.len()).to_string();
                matched = Some((keyword.clone(), text));
                break;
            }
        }
        let Some((keyword, text)) = matched else {
            return false;
        };
        self.set_token_matched(token, TokenType::StepLine, Some(text), Some(keyword), None, Vec::new());
        true
    }

    pub fn match_doc_string_separator(&mut self, token: &mut Token) -> bool {
        match self.active_doc_string_separator {
            None => {
                self.match_specific_doc_string_separator(token, DOCSTRING_SEPARATOR, true)
                    || self.match_specific_doc_string_separator(
                        token,
                        DOCSTRING_ALTERNATIVE_SEPARATOR,
                        true,
                    )
            }
            Some(separator) => self.match_specific_doc_string_separator(token, separator, false),
        }
    }

    fn match_specific_doc_string_separator(
        &mut self,
        token: &mut Token,
        separator: &'static str,
        is_open: bool,
    ) -> bool {
        let Some(line) = token.line.as_ref() else {
            return false;
        };
        if !line.starts_with(separator) {
            return false;
        }
        if is_open {
            let content_type = line.get_rest_trimmed(separator.len()).to_string();
            let indent = line.indent();
            self.active_doc_string_separator = Some(separator);
            self.indent_to_remove = indent;
            self.set_token_matched(
                token,
                TokenType::DocStringSeparator,
                Some(content_type),
                None,
                None,
                Vec::new(),
            );
        } else {
            self.active_doc_string_separator = None;
            self.indent_to_remove = 0;
            self.set_token_matched(token, TokenType::DocStringSeparator, None, None, None, Vec::new());
        }
        true
    }

    pub fn match_table_row(&self, token: &mut Token) -> bool {
        let Some(line) = token.line.as_ref() else {
            return false;
        };
        if !line.starts_with(TABLE_CELL_SEPARATOR) {
            return false;
        }
        let cells = line.get_table_cells();
        self.set_token_matched(token, TokenType::TableRow, None, None, None, cells);
        true
    }

    /// Matches a `# language: xx` directive against the raw line and switches
    /// the dialect for everything after it. The directive token itself still
    /// records the dialect that was in effect when it was read.
    pub fn match_language(&mut self, token: &mut Token) -> Result<bool, ParseError> {
        let Some(line) = token.line.as_ref() else {
            return Ok(false);
        };
        let Some(captures) = LANGUAGE_PATTERN.captures(line.get_line_text(0)) else {
            return Ok(false);
        };
        let language = captures[1].to_string();
        self.set_token_matched(
            token,
            TokenType::Language,
            Some(language.clone()),
            None,
            None,
            Vec::new(),
        );
        self.current_dialect = DIALECTS.get(&language).ok_or_else(|| ParseError::NoSuchLanguage {
            language,
            location: token.location,
        })?;
        Ok(true)
    }

    pub fn match_other(&self, token: &mut Token) -> bool {
        let Some(line) = token.line.as_ref() else {
            return false;
        };
        let text = self.unescape_doc_string(line.get_line_text(self.indent_to_remove));
        self.set_token_matched(token, TokenType::Other, Some(text), None, None, Vec::new());
        true
    }

    fn unescape_doc_string(&self, text: &str) -> String {
        if self.active_doc_string_separator.is_some() {
            text.replace("\\\"\\\"\\\"", "\"\"\"")
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::TokenMatcher;
    use crate::scanner::TokenScanner;
    use crate::token::{Location, Token, TokenType};

    fn line_token(text: &str, line_number: usize) -> Token {
        let mut scanner = TokenScanner::new(Cursor::new(text.as_bytes()));
        let mut token = scanner.read().expect("read line");
        for _ in 1..line_number {
            token = scanner.read().expect("read line");
        }
        token
    }

    #[test]
    fn eof_only_matches_tokens_without_a_line() {
        let matcher = TokenMatcher::new();
        let mut eof = Token::new(None, Location::new(3, 0));
        assert!(matcher.match_eof(&mut eof));
        assert_eq!(eof.matched_type, TokenType::Eof);
        assert_eq!(eof.location, Location::new(3, 1));

        let mut token = line_token("Feature: x", 1);
        assert!(!matcher.match_eof(&mut token));
        assert_eq!(token.matched_type, TokenType::None);
    }

    #[test]
    fn title_keyword_requires_the_separator() {
        let matcher = TokenMatcher::new();

        let mut token = line_token("  Feature: Hello", 1);
        assert!(matcher.match_feature_line(&mut token));
        assert_eq!(token.matched_keyword.as_deref(), Some("Feature"));
        assert_eq!(token.matched_text.as_deref(), Some("Hello"));
        assert_eq!(token.matched_indent, 2);
        assert_eq!(token.location, Location::new(1, 3));

        let mut token = line_token("Feature without separator", 1);
        assert!(!matcher.match_feature_line(&mut token));
    }

    #[test]
    fn scenario_outline_is_not_mistaken_for_scenario() {
        let matcher = TokenMatcher::new();
        let mut token = line_token("Scenario Outline: Eating", 1);
        assert!(!matcher.match_scenario_line(&mut token));
        assert!(matcher.match_scenario_outline_line(&mut token));
        assert_eq!(token.matched_keyword.as_deref(), Some("Scenario Outline"));
        assert_eq!(token.matched_text.as_deref(), Some("Eating"));
    }

    #[test]
    fn step_keywords_keep_their_trailing_separator() {
        let matcher = TokenMatcher::new();
        let mut token = line_token("    Given some precondition", 1);
        assert!(matcher.match_step_line(&mut token));
        assert_eq!(token.matched_keyword.as_deref(), Some("Given "));
        assert_eq!(token.matched_text.as_deref(), Some("some precondition"));
        assert_eq!(token.location, Location::new(1, 5));

        // No separator, no step.
        let mut token = line_token("Given", 1);
        assert!(!matcher.match_step_line(&mut token));
    }

    #[test]
    fn comment_records_the_whole_raw_line_at_column_one() {
        let matcher = TokenMatcher::new();
        let mut token = line_token("   # remark", 1);
        assert!(matcher.match_comment(&mut token));
        assert_eq!(token.matched_text.as_deref(), Some("   # remark"));
        assert_eq!(token.matched_indent, 0);
        assert_eq!(token.location, Location::new(1, 1));
    }

    #[test]
    fn doc_string_opens_and_closes_with_the_same_separator() {
        let mut matcher = TokenMatcher::new();

        let mut open = line_token("  \"\"\"json", 1);
        assert!(matcher.match_doc_string_separator(&mut open));
        assert_eq!(open.matched_text.as_deref(), Some("json"));
        assert!(matcher.has_active_doc_string());

        // The alternative separator does not close a `"""` doc string.
        let mut other = line_token("  ```", 1);
        assert!(!matcher.match_doc_string_separator(&mut other));

        let mut close = line_token("  \"\"\"", 1);
        assert!(matcher.match_doc_string_separator(&mut close));
        assert_eq!(close.matched_text, None);
        assert!(!matcher.has_active_doc_string());
    }

    #[test]
    fn other_strips_doc_string_indent_and_unescapes_quotes() {
        let mut matcher = TokenMatcher::new();
        let mut open = line_token("  \"\"\"", 1);
        assert!(matcher.match_doc_string_separator(&mut open));

        let mut content = line_token("    escaped \\\"\\\"\\\" quotes", 1);
        assert!(matcher.match_other(&mut content));
        assert_eq!(
            content.matched_text.as_deref(),
            Some("  escaped \"\"\" quotes")
        );
    }

    #[test]
    fn language_directive_switches_the_dialect_after_the_token() {
        let mut matcher = TokenMatcher::new();
        let mut token = line_token("# language: af", 1);
        assert!(matcher.match_language(&mut token).expect("known language"));
        assert_eq!(token.matched_type, TokenType::Language);
        assert_eq!(token.matched_text.as_deref(), Some("af"));
        // The directive itself still belongs to the old dialect.
        assert_eq!(token.matched_dialect.as_deref(), Some("en"));
        assert_eq!(matcher.current_dialect().language(), "af");
    }

    #[test]
    fn unknown_language_is_an_error_at_the_directive_location() {
        let mut matcher = TokenMatcher::new();
        let mut token = line_token("\n  # language: xx-klingon", 2);
        let err = matcher.match_language(&mut token).expect_err("unknown language");
        assert_eq!(err.to_string(), "(2:3): no such language: xx-klingon");
    }

    #[test]
    fn reset_restores_the_default_dialect_and_closes_doc_strings() {
        let mut matcher = TokenMatcher::new();
        let mut token = line_token("# language: ru", 1);
        assert!(matcher.match_language(&mut token).expect("known language"));
        let mut open = line_token("\"\"\"", 1);
        assert!(matcher.match_doc_string_separator(&mut open));

        matcher.reset();
        assert_eq!(matcher.current_dialect().language(), "en");
        assert!(!matcher.has_active_doc_string());
    }
}
