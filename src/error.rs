use std::io;

use crate::token::Location;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("({location}): no such language: {language}")]
    NoSuchLanguage { language: String, location: Location },
    #[error("failed to read input")]
    Io(#[from] io::Error),
}
