use std::io;
use thiserror::Error;

/// Why a single line of a metrics description could not be understood.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("'{keyword}' expects {expected} argument(s), found {found}")]
    Arity {
        keyword: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("'{keyword}' line is missing the {field} field")]
    MissingField {
        keyword: &'static str,
        field: &'static str,
    },

    #[error("{field} expects an integer, found '{token}'")]
    InvalidInteger { field: &'static str, token: String },

    #[error("character code {0} is outside -1..=255")]
    CodeOutOfRange(i32),

    #[error("'{keyword}' line ends before its terminator; the source looks truncated")]
    Unterminated { keyword: &'static str },
}

#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("failed to read metrics source: {0}")]
    Io(#[from] io::Error),

    #[error("malformed metrics line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: LineError,
    },
}
