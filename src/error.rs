use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, XpsError>;

/// Every failure the library can report.
#[derive(Error, Debug)]
pub enum XpsError {
    #[error("No such file or directory: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error in {path} at line {line}: {message}")]
    Parse {
        path: String,
        line: usize,
        message: String,
    },

    #[error("Invalid source pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("'{name}' is not an existing column. Available columns: {}", .available.join(" ; "))]
    UnknownColumn {
        name: String,
        available: Vec<String>,
    },

    #[error("'{0}' is already the name of another column")]
    DuplicateColumn(String),

    #[error("Too many column names: there are {expected} columns, got {got}")]
    ArgumentCountMismatch { expected: usize, got: usize },

    #[error("Cannot normalize on '{column}': minimum and maximum are both {value}")]
    DivideByZero { column: String, value: f64 },

    #[error("Column '{name}' has {got} rows but the index has {expected}")]
    InconsistentLength {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("A stack needs at least one data file")]
    EmptyStack,

    #[error("Invalid color '{0}'")]
    InvalidColor(String),

    #[error("A palette needs at least one color")]
    EmptyPalette,

    #[error("Unsupported output format for {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Rendering failed: {0}")]
    Render(String),

    #[error("Invalid options: {0}")]
    InvalidOptions(String),
}

impl XpsError {
    pub(crate) fn parse<P: Into<String>, M: Into<String>>(path: P, line: usize, message: M) -> Self {
        XpsError::Parse {
            path: path.into(),
            line,
            message: message.into(),
        }
    }
}
