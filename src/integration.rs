//! Pure core integration functions.
//!
//! Glue between ingestion and the layout engine: raw lines become records,
//! records go into the [`ChatStore`], and every accepted comment becomes a
//! new row of the [`LayoutManager`]. Nothing here touches the terminal, so
//! the whole path is testable without I/O.

use crate::layout::{LayoutError, LayoutManager};
use crate::model::{ChatRecord, ParseError, UpdateVariation};
use crate::parser;
use crate::store::{Applied, ChatStore, StoreError};
use tracing::debug;

/// Process new JSONL lines into chat records.
///
/// Blank lines are skipped but still count towards line numbers.
///
/// # Arguments
///
/// * `lines` - Raw JSONL lines to process
/// * `starting_line_number` - Line number of the first line (for error reporting)
///
/// # Returns
///
/// Tuple of (successfully parsed records, parse errors)
pub fn process_lines(
    lines: Vec<String>,
    starting_line_number: usize,
) -> (Vec<ChatRecord>, Vec<ParseError>) {
    let mut records = Vec::new();
    let mut errors = Vec::new();

    for (index, line) in lines.into_iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_number = starting_line_number + index;
        match parser::parse_record(&line, line_number) {
            Ok(record) => records.push(record),
            Err(err) => errors.push(err),
        }
    }

    (records, errors)
}

/// Outcome of one [`ingest`] call.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Comments appended as rows.
    pub appended: usize,
    /// Users seen for the first time.
    pub new_users: usize,
    /// Records the store refused.
    pub rejected: Vec<StoreError>,
}

/// Apply `records` to the store, then grow the layout by the accepted
/// comments as one append variation.
///
/// `estimate_height(author, text)` gives each new row its estimated height;
/// the surface corrects it after painting if it differs.
///
/// # Errors
///
/// Returns the layout's `LayoutError` if it refuses the appended rows.
/// Records the store refuses are collected in the report instead.
pub fn ingest(
    records: Vec<ChatRecord>,
    store: &mut ChatStore,
    layout: &mut LayoutManager,
    mut estimate_height: impl FnMut(&str, &str) -> f64,
) -> Result<IngestReport, LayoutError> {
    let mut report = IngestReport::default();
    let mut heights = Vec::new();

    for record in records {
        match store.apply(record) {
            Ok(Applied::Comment { index }) => {
                if let Some(comment) = store.comments().at(index) {
                    heights.push(estimate_height(store.author_name(comment), &comment.text));
                }
                report.appended += 1;
            }
            Ok(Applied::User { inserted }) => {
                report.new_users += usize::from(inserted);
            }
            Err(err) => report.rejected.push(err),
        }
    }

    if !heights.is_empty() {
        debug!(added = heights.len(), "ingested comments");
        layout.apply_variation(UpdateVariation::Append, heights.len(), Some(&heights))?;
    }
    Ok(report)
}
