//! # Snapshot Testing Support
//!
//! Utilities for testing the nesting engine via snapshot assertions and
//! invariant checks.
//!
//! ## Modules
//!
//! - **`normalize`**: converts merge steps and markup trees to a stable `Snap`
//!   with a readable outline for `insta` snapshots
//! - **`invariants`**: runtime checks for coverage, containment and split
//!   correctness of merge output

pub mod invariants;
pub mod normalize;

pub use invariants::check as invariants;
pub use normalize::{Snap, normalize};
