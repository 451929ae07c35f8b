//! Several sources merged into one record stream.
//!
//! Each poll visits the sources in the order they were given and
//! concatenates their records, so one `ingest` call receives every source's
//! records in arrival order. An error from one source is held back until the
//! records already collected in that poll have been handed out.

use super::InputSource;
use crate::model::error::InputError;
use crate::model::ChatRecord;
use tracing::debug;

/// Name and live state of one source, for the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceState {
    /// Short label: the file name, `stdin` or `demo`.
    pub name: String,
    /// Whether the source can still produce records.
    pub live: bool,
}

/// Ordered set of sources polled as one.
#[derive(Debug)]
pub struct SourceSet {
    sources: Vec<InputSource>,
    pending_error: Option<InputError>,
}

impl SourceSet {
    /// Merge `sources`, polled in the given order.
    pub fn new(sources: Vec<InputSource>) -> Self {
        Self {
            sources,
            pending_error: None,
        }
    }

    /// Number of member sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Check if the set has no member sources.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Member sources in poll order.
    pub fn sources(&self) -> &[InputSource] {
        &self.sources
    }

    /// Poll every member once and concatenate the records.
    ///
    /// # Errors
    ///
    /// Returns the first member's `InputError`. If other records were
    /// already collected in the same poll, they are returned first and the
    /// error comes from the next call.
    pub fn poll(&mut self) -> Result<Vec<ChatRecord>, InputError> {
        if let Some(err) = self.pending_error.take() {
            return Err(err);
        }

        let mut records = Vec::new();
        for (position, source) in self.sources.iter_mut().enumerate() {
            match source.poll() {
                Ok(batch) => records.extend(batch),
                Err(err) if records.is_empty() => return Err(err),
                Err(err) => {
                    debug!(position, "source failed, delivering earlier records first");
                    self.pending_error = Some(err);
                    break;
                }
            }
        }
        Ok(records)
    }

    /// True while any member can still produce records, or an error is
    /// waiting to be reported.
    pub fn is_live(&self) -> bool {
        self.pending_error.is_some() || self.sources.iter().any(InputSource::is_live)
    }
}
