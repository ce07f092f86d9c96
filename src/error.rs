use std::io;
use thiserror::Error;

/// Fatal conditions that abort the conversion of a raw data file.
#[derive(Debug, Error)]
pub enum Error {
    #[error("reading raw data: {0}")]
    Io(#[from] io::Error),

    /// The first case identification line must start with IC = 0 or 1.
    #[error("line {line}: invalid case identification record [{found}], expected IC of 0 or 1")]
    CaseIdentification { line: usize, found: String },

    #[error("end of input in {section} data before terminating record")]
    UnexpectedEof { section: &'static str },

    #[error("line {line}: quoted data item is not terminated")]
    UnterminatedQuote { line: usize },

    #[error("line {line}: invalid bus type [{value}], expected 1, 2, 3 or 4")]
    InvalidBusType { line: usize, value: usize },

    #[error("line {line}: {section} data record is missing field {column}")]
    MissingField {
        section: &'static str,
        line: usize,
        column: usize,
    },

    #[error("line {line}: {section} data field {column} [{value}] is not a number")]
    InvalidNumber {
        section: &'static str,
        line: usize,
        column: usize,
        value: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
