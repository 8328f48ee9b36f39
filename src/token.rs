use std::fmt;

use serde::Serialize;

use crate::line::{GherkinLine, LineSpan};

/// A 1-based position in a feature file. Column 0 means "not yet matched";
/// the matcher rewrites it to the matched indent + 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Location {
        Location { line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TokenType {
    None,
    Eof,
    Empty,
    Comment,
    TagLine,
    FeatureLine,
    BackgroundLine,
    ScenarioLine,
    ScenarioOutlineLine,
    ExamplesLine,
    StepLine,
    DocStringSeparator,
    TableRow,
    Language,
    Other,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenType::None => "None",
            TokenType::Eof => "EOF",
            TokenType::Empty => "Empty",
            TokenType::Comment => "Comment",
            TokenType::TagLine => "TagLine",
            TokenType::FeatureLine => "FeatureLine",
            TokenType::BackgroundLine => "BackgroundLine",
            TokenType::ScenarioLine => "ScenarioLine",
            TokenType::ScenarioOutlineLine => "ScenarioOutlineLine",
            TokenType::ExamplesLine => "ExamplesLine",
            TokenType::StepLine => "StepLine",
            TokenType::DocStringSeparator => "DocStringSeparator",
            TokenType::TableRow => "TableRow",
            TokenType::Language => "Language",
            TokenType::Other => "Other",
        };
        f.write_str(name)
    }
}

/// One source line (or end of input, when `line` is `None`) together with
/// whatever the matcher recorded about it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Token {
    pub line: Option<GherkinLine>,
    pub matched_type: TokenType,
    pub matched_keyword: Option<String>,
    pub matched_text: Option<String>,
    pub matched_items: Vec<LineSpan>,
    pub matched_indent: usize,
    pub matched_dialect: Option<String>,
    pub location: Location,
}

impl Token {
    pub fn new(line: Option<GherkinLine>, location: Location) -> Token {
        Token {
            line,
            location,
            matched_type: TokenType::None,
            matched_keyword: None,
            matched_text: None,
            matched_items: Vec::new(),
            matched_indent: 0,
            matched_dialect: None,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.line.is_none()
    }
}
