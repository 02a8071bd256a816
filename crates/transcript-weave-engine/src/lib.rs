pub mod error;
pub mod line;
pub mod markup;
pub mod nesting;
pub mod pipeline;
pub mod snapshot;

// Re-export key types for easier usage
pub use error::NestingError;
pub use line::{DamageLevel, Leaf, LineId, notation};
pub use markup::{MarkupNode, MarkupTreeBuilder, NodeIdGenerator};
pub use nesting::{
    AdjacencyOracle, BoundaryEmitter, Dimension, Label, LineIndex, MergeStep, Partition, Run,
    build_partition, merge_partitions,
};
pub use pipeline::{LineInput, RenderedLine, render_line, render_lines};
