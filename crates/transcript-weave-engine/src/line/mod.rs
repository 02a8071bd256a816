//! # Lines and Leaves
//!
//! The input side of the engine: one transcription line arrives as an ordered
//! array of [`Leaf`] values (signs) that carry the two annotation dimensions.
//!
//! ## Modules
//!
//! - **`leaf`**: `Leaf`, `DamageLevel`, `LineId`
//! - **`notation`**: compact one-line-per-line text format used by the CLI and tests
//!
//! Leaves are immutable once supplied. A sequence is valid when leaf indexes
//! are strictly increasing; indexes may have gaps because the sequence can be
//! a slice of a longer line.

pub mod leaf;
pub mod notation;

pub use leaf::{DamageLevel, Leaf, LineId};

use crate::error::NestingError;

/// Checks that leaf indexes are strictly increasing within the line.
pub fn validate_sequence(line: &LineId, sequence: &[Leaf]) -> Result<(), NestingError> {
    for pair in sequence.windows(2) {
        if pair[1].index <= pair[0].index {
            return Err(NestingError::UnorderedLeaves {
                line: line.clone(),
                previous: pair[0].index,
                index: pair[1].index,
            });
        }
    }
    Ok(())
}
