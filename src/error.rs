use std::io;
use std::num::ParseIntError;
use thiserror::Error;

/// Errors that can occur while parsing or querying a rescue log
#[derive(Error, Debug)]
pub enum LogError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Unknown status symbol '{symbol}' on line {line}")]
    UnknownSymbol { line: usize, symbol: String },

    #[error("Invalid hexadecimal length '{value}' on line {line}: {source}")]
    InvalidLength {
        line: usize,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Byte count overflow on line {line}")]
    Overflow { line: usize },

    #[error("Ratios are undefined when the total byte count is zero")]
    UndefinedRatio,

    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}

pub type Result<T> = std::result::Result<T, LogError>;
