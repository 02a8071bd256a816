//! # Nesting
//!
//! Reconciles two independent, range-valued annotations of one line (damage
//! and unclear) into properly nested spans.
//!
//! ## Pipeline
//!
//! 1. **Partitioning** (`partition`): each dimension's labels are grouped into
//!    maximal runs. Only positively-labelled leaves merge; unannotated leaves
//!    always stand alone.
//! 2. **Merging** (`merge`): a two-cursor walk over both partitions emits
//!    `MergeStep`s. At every aligned boundary the longer run becomes the outer
//!    span and the other partition tiles it, splitting its last run when that
//!    run crosses the outer edge.
//! 3. **Boundaries** (`boundary`): decides per edge whether a delimiter glyph
//!    is drawn, suppressing it where a span continues across a split.
//!
//! ## Modules
//!
//! - **`dimension`**: `Dimension`, `Label`, label functions and delimiter glyphs
//! - **`partition`**: `Run`, `Partition`, `build_partition`
//! - **`cursor`**: `RunCursor` over a partition with split remainders
//! - **`merge`**: `MergeStep`, `merge_partitions`
//! - **`boundary`**: `AdjacencyOracle`, `LineIndex`, `BoundaryEmitter`
//!
//! ## Key Invariants
//!
//! - Concatenating every step's inner runs reproduces the sequence exactly
//! - Every inner run is contained in its step's outer span
//! - Merging is linear in the number of leaves

pub mod boundary;
pub mod cursor;
pub mod dimension;
pub mod merge;
pub mod partition;

pub use boundary::{AdjacencyOracle, BoundaryEmitter, Delimiters, LineIndex};
pub use cursor::RunCursor;
pub use dimension::{Dimension, Label};
pub use merge::{MergeStep, merge_partitions};
pub use partition::{Partition, Run, build_partition, build_partition_with};
