use serde::Serialize;

use crate::{error::NestingError, line::Leaf};

use super::dimension::{Dimension, Label};

/// A contiguous, non-empty slice of the sequence sharing one label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Run<'a> {
    pub label: Option<Label>,
    /// Offset of the first leaf within the sequence (not the leaf's line index).
    pub start: usize,
    pub leaves: &'a [Leaf],
}

impl<'a> Run<'a> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Exclusive end offset within the sequence.
    #[must_use]
    pub fn end(&self) -> usize {
        self.start + self.leaves.len()
    }

    /// Splits into a leading slice of `mid` leaves and the trailing remainder.
    ///
    /// Both halves keep the label. `mid` must lie strictly inside the run.
    pub fn split_at(&self, mid: usize) -> (Run<'a>, Run<'a>) {
        debug_assert!(0 < mid && mid < self.len(), "split {mid} outside run of {}", self.len());
        let (head, tail) = self.leaves.split_at(mid);
        (
            Run {
                label: self.label,
                start: self.start,
                leaves: head,
            },
            Run {
                label: self.label,
                start: self.start + mid,
                leaves: tail,
            },
        )
    }
}

/// An ordered, gapless cover of a sequence by runs of one dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition<'a> {
    pub dimension: Dimension,
    pub runs: Vec<Run<'a>>,
}

impl<'a> Partition<'a> {
    /// Wraps runs without checking them; see [`Partition::validate`].
    pub fn from_runs(dimension: Dimension, runs: Vec<Run<'a>>) -> Self {
        Self { dimension, runs }
    }

    /// Total number of leaves covered.
    pub fn leaf_count(&self) -> usize {
        self.runs.iter().map(Run::len).sum()
    }

    /// The first leaf of the covered sequence, if any.
    pub fn first_leaf(&self) -> Option<&'a Leaf> {
        self.runs.first().and_then(|run| run.leaves.first())
    }

    /// Checks that runs are non-empty and tile `0..n` of one contiguous
    /// slice in order, returning `n`.
    pub fn validate(&self) -> Result<usize, NestingError> {
        let mut expected = 0;
        let mut previous: Option<&[Leaf]> = None;
        for (i, run) in self.runs.iter().enumerate() {
            if run.is_empty() {
                return Err(NestingError::EmptyRun {
                    dimension: self.dimension,
                    run: i,
                });
            }
            if run.start != expected {
                return Err(NestingError::BrokenPartition {
                    dimension: self.dimension,
                    position: run.start,
                    expected,
                });
            }
            if previous.is_some_and(|prev| prev.as_ptr_range().end != run.leaves.as_ptr()) {
                return Err(NestingError::DetachedRun {
                    dimension: self.dimension,
                    run: i,
                });
            }
            previous = Some(run.leaves);
            expected = run.end();
        }
        Ok(expected)
    }
}

/// Partitions `sequence` with the canonical label function of `dimension`.
pub fn build_partition(sequence: &[Leaf], dimension: Dimension) -> Partition<'_> {
    build_partition_with(sequence, dimension, |leaf| dimension.label_of(leaf))
}

/// Partitions `sequence` into maximal runs under `label_of`.
///
/// A leaf joins the previous run only when both carry the same positive
/// label. Unlabelled leaves are always singleton runs, even next to each
/// other, so every one of them gets its own continuation check.
pub fn build_partition_with<F>(sequence: &[Leaf], dimension: Dimension, label_of: F) -> Partition<'_>
where
    F: Fn(&Leaf) -> Option<Label>,
{
    let labels: Vec<Option<Label>> = sequence.iter().map(label_of).collect();
    let mut runs = vec![];
    let mut start = 0;

    for i in 1..=sequence.len() {
        if i < sequence.len() && continues(labels[i - 1], labels[i]) {
            continue;
        }
        runs.push(Run {
            label: labels[start],
            start,
            leaves: &sequence[start..i],
        });
        start = i;
    }

    Partition { dimension, runs }
}

fn continues(prev: Option<Label>, cur: Option<Label>) -> bool {
    matches!((prev, cur), (Some(a), Some(b)) if a == b)
}
