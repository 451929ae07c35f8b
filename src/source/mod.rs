//! Chat record sources.
//!
//! This module provides the ingestion side of the viewer:
//! - File loading for read-once JSONL input
//! - Stdin for piped input (live streaming)
//! - A synthetic demo platform (live)
//! - Several of the above merged into one stream ([`SourceSet`])
//! - Unified [`InputSource`] enum over all of them

use crate::integration;
use crate::model::error::InputError;
use crate::model::ChatRecord;
use std::path::PathBuf;
use tracing::warn;

pub mod demo;
pub mod file;
pub mod set;
pub mod stdin;

pub use demo::DemoPlatform;
pub use file::FileSource;
pub use set::{SourceSet, SourceState};
pub use stdin::StdinSource;

/// Unified input source for chat records.
#[derive(Debug)]
pub enum InputSource {
    /// File source - read-once loading
    File(FileSource),
    /// Stdin source - reads from piped stdin (live streaming)
    Stdin(StdinSource),
    /// Synthetic live platform
    Demo(DemoPlatform),
    /// Several sources polled in order into one stream
    Sources(SourceSet),
}

impl InputSource {
    /// Poll for new records.
    ///
    /// Non-blocking. Malformed lines are logged with their line number and
    /// skipped.
    ///
    /// # Behavior:
    /// - File: every record on the first call, nothing after
    /// - Stdin: incremental as data arrives
    /// - Demo: a fixed batch per call
    /// - Sources: each member in order, records concatenated
    ///
    /// # Errors
    ///
    /// Returns `InputError` for I/O errors.
    pub fn poll(&mut self) -> Result<Vec<ChatRecord>, InputError> {
        match self {
            InputSource::File(f) => Ok(parse_logged(f.drain_lines(), 1)),
            InputSource::Stdin(s) => {
                let first_line = s.lines_delivered() + 1;
                let lines = s.poll_lines()?;
                Ok(parse_logged(lines, first_line))
            }
            InputSource::Demo(d) => Ok(d.poll()),
            InputSource::Sources(set) => set.poll(),
        }
    }

    /// Check if the source can still produce records.
    ///
    /// # Behavior:
    /// - File: always false (static, read-once)
    /// - Stdin: true until EOF is reached
    /// - Demo: always true
    /// - Sources: true while any member is live
    pub fn is_live(&self) -> bool {
        match self {
            InputSource::File(_) => false,
            InputSource::Stdin(s) => !s.is_complete(),
            InputSource::Demo(_) => true,
            InputSource::Sources(set) => set.is_live(),
        }
    }

    /// Name and live state of every leaf source, in poll order.
    pub fn states(&self) -> Vec<SourceState> {
        let leaf = |name: String| {
            vec![SourceState {
                name,
                live: self.is_live(),
            }]
        };
        match self {
            InputSource::File(f) => leaf(
                f.path()
                    .file_name()
                    .map_or_else(|| f.path().display().to_string(), |n| n.to_string_lossy().into_owned()),
            ),
            InputSource::Stdin(_) => leaf("stdin".to_string()),
            InputSource::Demo(_) => leaf("demo".to_string()),
            InputSource::Sources(set) => set.sources().iter().flat_map(InputSource::states).collect(),
        }
    }
}

fn parse_logged(lines: Vec<String>, first_line: usize) -> Vec<ChatRecord> {
    if lines.is_empty() {
        return Vec::new();
    }
    let (records, errors) = integration::process_lines(lines, first_line);
    for err in &errors {
        warn!(line = err.line(), "skipping malformed record: {}", err);
    }
    records
}

/// Detect and create the appropriate input source.
///
/// # Logic:
/// 1. One FileSource per path (loaded on construction), in order
/// 2. The demo platform after them, if a demo rate is given
/// 3. Neither: piped stdin, or `InputError::NoInput` for an interactive terminal
///
/// A single source is returned as is; several are merged into
/// [`InputSource::Sources`].
///
/// # Errors
///
/// Returns `InputError::NoInput` if there is nothing to read and stdin is not piped.
/// Returns `InputError::FileNotFound` if a file does not exist.
/// Returns `InputError::Io` for I/O errors during file reading.
pub fn detect_input_source(
    files: Vec<PathBuf>,
    demo_rate: Option<u32>,
) -> Result<InputSource, InputError> {
    let mut sources = files
        .into_iter()
        .map(|path| FileSource::new(path).map(InputSource::File))
        .collect::<Result<Vec<_>, _>>()?;
    if let Some(rate) = demo_rate {
        sources.push(InputSource::Demo(DemoPlatform::new(rate)));
    }

    match sources.len() {
        0 => Ok(InputSource::Stdin(StdinSource::new()?)),
        1 => Ok(sources.remove(0)),
        _ => Ok(InputSource::Sources(SourceSet::new(sources))),
    }
}
