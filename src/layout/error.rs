//! Errors raised by the layout engine.
//!
//! Only unsupported row variations are recoverable errors. Contract breaches
//! (out-of-range indices, negative heights) panic instead.

use crate::model::UpdateVariation;
use thiserror::Error;

/// Recoverable layout failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The variation needs a reindexing policy the engine does not have.
    /// Applying it partially would leave the cumulative offsets inconsistent.
    #[error("row variation {0:?} is not supported, only appends can be applied")]
    UnsupportedVariation(UpdateVariation),
}
