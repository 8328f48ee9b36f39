use std::io::BufRead;

use tracing::trace;

use crate::error::ParseError;
use crate::matcher::TokenMatcher;
use crate::scanner::TokenScanner;
use crate::token::Token;

/// Pairs a [`TokenScanner`] with a [`TokenMatcher`] and yields matched tokens
/// in source order, ending with exactly one EOF token.
pub struct TokenStream<R: BufRead> {
    scanner: TokenScanner<R>,
    matcher: TokenMatcher,
    finished: bool,
}

impl<R: BufRead> TokenStream<R> {
    pub fn new(reader: R) -> TokenStream<R> {
        TokenStream {
            scanner: TokenScanner::new(reader),
            matcher: TokenMatcher::new(),
            finished: false,
        }
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn next_token(&mut self) -> Result<Token, ParseError> {
        let mut token = self.scanner.read()?;
        self.match_token(&mut token)?;
        trace!(
            line = token.location.line,
            matched_type = %token.matched_type,
            "matched token"
        );
        Ok(token)
    }

    /// First match wins. Inside an open doc string only the closing separator
    /// can interrupt the run of `Other` content lines; everywhere else the
    /// priority is the one the keyword grammar requires (titles before steps,
    /// `# language:` before plain comments).
    fn match_token(&mut self, token: &mut Token) -> Result<(), ParseError> {
        let matcher = &mut self.matcher;
        if matcher.match_eof(token) {
            return Ok(());
        }
        if matcher.has_active_doc_string() {
            if !matcher.match_doc_string_separator(token) {
                matcher.match_other(token);
            }
            return Ok(());
        }
        if matcher.match_empty(token)
            || matcher.match_tag_line(token)
            || matcher.match_feature_line(token)
            || matcher.match_background_line(token)
            || matcher.match_scenario_line(token)
            || matcher.match_scenario_outline_line(token)
            || matcher.match_examples_line(token)
            || matcher.match_step_line(token)
            || matcher.match_doc_string_separator(token)
            || matcher.match_table_row(token)
        {
            return Ok(());
        }
        if matcher.match_language(token)? {
            return Ok(());
        }
        if !matcher.match_comment(token) {
            matcher.match_other(token);
        }
        Ok(())
    }
}

impl<R: BufRead> Iterator for TokenStream<R> {
    type Item = Result<Token, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_token() {
            Ok(token) => {
                if token.is_eof() {
                    self.finished = true;
                }
                Some(Ok(token))
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}
