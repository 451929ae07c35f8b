//! Error types for the lcv application.
//!
//! Errors follow a small hierarchy built with `thiserror`, composing via `?`
//! and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - top-level error returned from `main`
//!   - [`InputError`] - file/stdin reading failures
//!   - [`ParseError`] - malformed JSONL records
//!   - [`ConfigError`] - unreadable or invalid config file
//!   - [`LoggingError`] - log file setup failures
//!   - `std::io::Error` - terminal failures
//!
//! # Error Recovery Strategy
//!
//! Parse errors are **non-fatal**: a malformed line is logged with its line
//! number and skipped, and the viewer keeps showing what it has. Input,
//! config, logging and terminal errors are fatal and reach `main`.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
///
/// # Examples
///
/// ```no_run
/// use lcv::model::error::{AppError, InputError};
///
/// fn run_app() -> Result<(), AppError> {
///     // InputError automatically converts to AppError via From
///     open_source()?;
///     Ok(())
/// }
/// # fn open_source() -> Result<(), InputError> { Ok(()) }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read input from file or stdin.
    #[error("Failed to read input: {0}")]
    Input(#[from] InputError),

    /// Failed to parse a record. Only fatal when surfaced outside ingestion.
    #[error("Failed to parse record: {0}")]
    Parse(#[from] ParseError),

    /// Config file exists but could not be used.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Log file could not be set up.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Terminal or TUI rendering error.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors encountered when reading records from files or stdin.
#[derive(Debug, Error)]
pub enum InputError {
    /// The given comment file does not exist.
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use lcv::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.jsonl")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.jsonl"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that failed to open.
        path: PathBuf,
    },

    /// No file, no demo flag, and stdin is an interactive terminal.
    ///
    /// **Recovery**: display usage showing the invocation modes:
    /// - `lcv comments.jsonl` (file mode)
    /// - `tail -f comments.jsonl | lcv` (live stdin mode)
    /// - `lcv --demo` (demo platform)
    #[error("No input source: provide a file path, pipe data to stdin, or pass --demo")]
    NoInput,

    /// Generic I/O error reading from the input source.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors encountered when parsing JSONL records.
///
/// Every variant carries the 1-based line number so the log points at the
/// offending line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line is not syntactically valid JSON.
    ///
    /// ```
    /// use lcv::model::error::ParseError;
    ///
    /// let err = ParseError::InvalidJson {
    ///     line: 42,
    ///     message: "EOF while parsing an object".to_string()
    /// };
    /// assert!(err.to_string().contains("line 42"));
    /// ```
    #[error("Invalid JSON at line {line}: {message}")]
    InvalidJson {
        /// 1-based line number.
        line: usize,
        /// Parser error message.
        message: String,
    },

    /// Valid JSON that does not describe a user or comment record.
    #[error("Invalid field '{field}' at line {line}: {message}")]
    InvalidField {
        /// 1-based line number.
        line: usize,
        /// Offending field, as far as it can be told from the decoder.
        field: String,
        /// Decoder error message.
        message: String,
    },
}

impl ParseError {
    /// Line the error was found on.
    pub fn line(&self) -> usize {
        match self {
            Self::InvalidJson { line, .. } | Self::InvalidField { line, .. } => *line,
        }
    }
}
