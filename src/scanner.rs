use std::io::{self, BufRead, Lines};

use crate::line::GherkinLine;
use crate::token::{Location, Token};

/// Produces one raw (unmatched) token per source line, then EOF tokens.
pub struct TokenScanner<R: BufRead> {
    line_number: usize,
    lines: Lines<R>,
}

impl<R: BufRead> TokenScanner<R> {
    pub fn new(reader: R) -> TokenScanner<R> {
        TokenScanner {
            line_number: 0,
            lines: reader.lines(),
        }
    }

    pub fn read(&mut self) -> io::Result<Token> {
        self.line_number += 1;
        let location = Location::new(self.line_number, 0);
        match self.lines.next() {
            Some(line) => Ok(Token::new(
                Some(GherkinLine::new(line?, self.line_number)),
                location,
            )),
            None => Ok(Token::new(None, location)),
        }
    }
}
