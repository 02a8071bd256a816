use serde::Serialize;

use crate::{error::NestingError, line::Leaf};

use super::{
    cursor::RunCursor,
    dimension::{Dimension, Label},
    partition::{Partition, Run},
};

/// One outer span (a whole run or the remainder of a split one) tiled by
/// runs of the other dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeStep<'a> {
    pub outer_dimension: Dimension,
    /// The outer span. Its leaves equal the concatenation of `inner_runs`.
    pub outer: Run<'a>,
    pub inner_dimension: Dimension,
    pub inner_runs: Vec<Run<'a>>,
}

impl<'a> MergeStep<'a> {
    pub fn outer_label(&self) -> Option<Label> {
        self.outer.label
    }

    /// Number of leaves covered by this step.
    pub fn len(&self) -> usize {
        self.outer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outer.is_empty()
    }

    /// Leaves of the step in sequence order.
    pub fn leaves(&self) -> impl Iterator<Item = &'a Leaf> + '_ {
        self.inner_runs.iter().flat_map(|run| run.leaves.iter())
    }
}

/// Merges two partitions of the same sequence into nesting instructions.
///
/// At every aligned boundary the longer current run (partition `a` on ties)
/// becomes the outer span and runs of the other partition are appended until
/// it is filled. An inner run that would cross the outer edge is split; its
/// remainder becomes the other partition's current run.
///
/// # Errors
/// Rejects partitions that are not gapless covers or that do not cover the
/// very same sequence (compared by address, not by value). Nothing is
/// emitted for rejected input.
pub fn merge_partitions<'a>(
    a: &Partition<'a>,
    b: &Partition<'a>,
) -> Result<Vec<MergeStep<'a>>, NestingError> {
    let left = a.validate()?;
    let right = b.validate()?;
    if left != right {
        return Err(NestingError::CoverageMismatch { left, right });
    }
    match (a.first_leaf(), b.first_leaf()) {
        (Some(first_a), Some(first_b)) if !std::ptr::eq(first_a, first_b) => {
            return Err(NestingError::SequenceMismatch { len: left });
        }
        _ => {}
    }

    let mut cur_a = RunCursor::new(a);
    let mut cur_b = RunCursor::new(b);
    let mut steps = vec![];

    while let (Some(run_a), Some(run_b)) = (cur_a.current(), cur_b.current()) {
        debug_assert!(cur_a.is_aligned() && cur_b.is_aligned());

        let (outer, inner, outer_run, first) = if run_a.len() >= run_b.len() {
            (&mut cur_a, &mut cur_b, run_a, run_b)
        } else {
            (&mut cur_b, &mut cur_a, run_b, run_a)
        };

        let mut step = MergeStep {
            outer_dimension: outer.dimension,
            outer: outer_run,
            inner_dimension: inner.dimension,
            inner_runs: vec![first],
        };
        inner.advance();

        while !outer.consume(step.inner_runs.last().map_or(0, Run::len)) {
            let remaining = outer.remaining();
            let Some(next) = inner.current() else {
                unreachable!("validated partitions cover the same leaves");
            };

            if next.len() <= remaining {
                step.inner_runs.push(next);
                inner.advance();
            } else {
                let (head, tail) = next.split_at(remaining);
                log::trace!(
                    "split {} run at {}: {} + {}",
                    inner.dimension,
                    next.start,
                    head.len(),
                    tail.len()
                );
                inner.replace_current(tail);
                step.inner_runs.push(head);
            }
        }

        log::trace!(
            "step {}:{:?} [{}..{}) with {} {} run(s)",
            step.outer_dimension,
            step.outer.label,
            step.outer.start,
            step.outer.end(),
            step.inner_runs.len(),
            step.inner_dimension
        );
        steps.push(step);
    }

    Ok(steps)
}
