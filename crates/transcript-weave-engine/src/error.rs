use crate::{line::LineId, nesting::Dimension};

/// Caller-supplied input that breaks the nesting preconditions.
///
/// These are programmer errors: the line cannot be rendered and retrying
/// with the same input will fail the same way.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NestingError {
    #[error("line {line}: leaf index {index} does not follow {previous}")]
    UnorderedLeaves {
        line: LineId,
        previous: usize,
        index: usize,
    },
    #[error("partitions cover different numbers of leaves ({left} vs {right})")]
    CoverageMismatch { left: usize, right: usize },
    #[error("partitions cover different sequences of {len} leaves")]
    SequenceMismatch { len: usize },
    #[error("{dimension} partition is not gapless: run starts at {position}, expected {expected}")]
    BrokenPartition {
        dimension: Dimension,
        position: usize,
        expected: usize,
    },
    #[error("{dimension} partition has an empty run at {run}")]
    EmptyRun { dimension: Dimension, run: usize },
    #[error("{dimension} run {run} does not continue the slice of the run before it")]
    DetachedRun { dimension: Dimension, run: usize },
}
