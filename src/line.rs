use serde::Serialize;

use crate::TITLE_KEYWORD_SEPARATOR;

/// A piece of a line (a tag or a table cell) with its 1-based column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LineSpan {
    pub column: usize,
    pub text: String,
}

impl LineSpan {
    pub fn new(column: usize, text: String) -> LineSpan {
        LineSpan { column, text }
    }
}

/// A single line of a feature file, kept both raw and trimmed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GherkinLine {
    line_number: usize,
    line_text: String,
    trimmed_line_text: String,
}

impl GherkinLine {
    pub fn new(line_text: String, line_number: usize) -> GherkinLine {
        let trimmed_line_text = line_text.trim().to_string();
        GherkinLine {
            line_number,
            line_text,
            trimmed_line_text,
        }
    }

    /// Number of leading whitespace characters.
    pub fn indent(&self) -> usize {
        self.line_text.len() - self.line_text.trim_start().len()
    }

    pub fn is_empty(&self) -> bool {
        self.trimmed_line_text.is_empty()
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.trimmed_line_text.starts_with(prefix)
    }

    /// Checks for a title keyword (`Feature`, `Scenario`, ...) immediately
    /// followed by the `:` separator.
    pub fn starts_with_title_keyword(&self, keyword: &str) -> bool {
        self.starts_with(keyword)
            && self.trimmed_line_text[keyword.len()..].starts_with(TITLE_KEYWORD_SEPARATOR)
    }

    /// The trimmed line after its first `length` bytes, re-trimmed.
    pub fn get_rest_trimmed(&self, length: usize) -> &str {
        self.trimmed_line_text[length..].trim()
    }

    /// The raw line with up to `indent_to_remove` leading characters stripped.
    /// Lines shallower than `indent_to_remove` are returned whole.
    pub fn get_line_text(&self, indent_to_remove: usize) -> &str {
        if indent_to_remove > self.indent() {
            &self.line_text
        } else {
            &self.line_text[indent_to_remove..]
        }
    }

    pub fn get_tags(&self) -> Vec<LineSpan> {
        let indent = self.indent();
        let mut spans = Vec::new();
        let mut word = String::new();
        let mut word_column = 0;
        for (column, c) in self.trimmed_line_text.chars().enumerate() {
            if c.is_whitespace() {
                if !word.is_empty() {
                    spans.push(LineSpan::new(indent + word_column + 1, std::mem::take(&mut word)));
                }
            } else {
                if word.is_empty() {
                    word_column = column;
                }
                word.push(c);
            }
        }
        if !word.is_empty() {
            spans.push(LineSpan::new(indent + word_column + 1, word));
        }
        spans
    }

    pub fn get_table_cells(&self) -> Vec<LineSpan> {
        let indent = self.indent();
        let mut spans = Vec::new();
        let mut cell = String::new();
        let mut before_first = true;
        let mut start_column = 0;
        let mut escaping = false;
        for (column, c) in self.trimmed_line_text.chars().enumerate() {
            if escaping {
                match c {
                    'n' => cell.push('\n'),
                    '\\' => cell.push('\\'),
                    '|' => cell.push('|'),
                    other => {
                        // Unknown escapes are kept verbatim, backslash included.
                        cell.push('\\');
                        cell.push(other);
                    }
                }
                escaping = false;
            } else {
                match c {
                    '|' => {
                        if before_first {
                            before_first = false;
                        } else {
                            let mut content_start =
                                cell.chars().take_while(|c| c.is_whitespace()).count();
                            if content_start == cell.len() {
                                content_start = 0;
                            }
                            spans.push(LineSpan::new(
                                indent + start_column + content_start + 2,
                                cell.trim().to_string(),
                            ));
                            start_column = column;
                            cell = String::new();
                        }
                    }
                    '\\' => escaping = true,
                    other => cell.push(other),
                }
            }
        }
        spans
    }
}

#[cfg(test)]
mod tests {
    use super::{GherkinLine, LineSpan};

    #[test]
    fn queries_on_a_title_line() {
        let line = GherkinLine::new("   Feature: Hello world  ".to_string(), 3);
        assert_eq!(line.indent(), 3);
        assert!(!line.is_empty());
        assert!(line.starts_with("Feature"));
        assert!(line.starts_with_title_keyword("Feature"));
        assert!(!line.starts_with_title_keyword("Featur"));
        assert_eq!(line.get_rest_trimmed("Feature:".len()), "Hello world");
    }

    #[test]
    fn line_text_respects_requested_indent() {
        let line = GherkinLine::new("    content".to_string(), 1);
        assert_eq!(line.get_line_text(0), "    content");
        assert_eq!(line.get_line_text(2), "  content");
        assert_eq!(line.get_line_text(9), "    content");
    }

    #[test]
    fn whitespace_only_lines_are_empty() {
        let line = GherkinLine::new("        ".to_string(), 1);
        assert!(line.is_empty());
        assert_eq!(line.indent(), 8);
    }

    #[test]
    fn get_tags() {
        let line = GherkinLine::new("@billing @bicker @annoy".to_string(), 1);
        assert_eq!(
            line.get_tags(),
            vec![
                LineSpan::new(1, "@billing".to_string()),
                LineSpan::new(10, "@bicker".to_string()),
                LineSpan::new(18, "@annoy".to_string()),
            ]
        );
    }

    #[test]
    fn get_tags_with_uneven_spacing() {
        let line = GherkinLine::new("  @slow   @wip".to_string(), 1);
        assert_eq!(
            line.get_tags(),
            vec![
                LineSpan::new(3, "@slow".to_string()),
                LineSpan::new(11, "@wip".to_string()),
            ]
        );
    }

    #[test]
    fn get_table_cells() {
        let line =
            GherkinLine::new("   | name   | email            | twitter          |".to_string(), 1);
        assert_eq!(
            line.get_table_cells(),
            vec![
                LineSpan::new(6, "name".to_string()),
                LineSpan::new(15, "email".to_string()),
                LineSpan::new(34, "twitter".to_string()),
            ]
        );
    }

    #[test]
    fn get_table_cells_with_escapes() {
        let line =
            GherkinLine::new("| new\\nline | pipe \\| | slash \\\\ | other \\v|".to_string(), 1);
        assert_eq!(
            line.get_table_cells(),
            vec![
                LineSpan::new(3, "new\nline".to_string()),
                LineSpan::new(15, "pipe |".to_string()),
                LineSpan::new(25, "slash \\".to_string()),
                LineSpan::new(36, "other \\v".to_string()),
            ]
        );
    }
}
