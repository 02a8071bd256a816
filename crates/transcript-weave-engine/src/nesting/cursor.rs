use super::{
    dimension::Dimension,
    partition::{Partition, Run},
};

/// A cursor over one partition's runs with `(run_index, consumed)` state.
///
/// Splitting never touches the partition: the trailing remainder of a split
/// run is held here and stands in for the current run until it is advanced
/// past.
#[derive(Debug, Clone)]
pub struct RunCursor<'p, 'a> {
    pub dimension: Dimension,
    runs: &'p [Run<'a>],
    /// Index of the current run in the partition.
    pub run_index: usize,
    /// Leaves of the current run already placed in a merge step.
    pub consumed: usize,
    remainder: Option<Run<'a>>,
}

impl<'p, 'a> RunCursor<'p, 'a> {
    pub fn new(partition: &'p Partition<'a>) -> Self {
        Self {
            dimension: partition.dimension,
            runs: &partition.runs,
            run_index: 0,
            consumed: 0,
            remainder: None,
        }
    }

    /// Returns true once every run has been advanced past.
    pub fn eof(&self) -> bool {
        self.current().is_none()
    }

    /// The current run, or the split remainder standing in for it.
    pub fn current(&self) -> Option<Run<'a>> {
        self.remainder.or_else(|| self.runs.get(self.run_index).copied())
    }

    /// True when the cursor sits exactly on a run boundary.
    pub fn is_aligned(&self) -> bool {
        self.consumed == 0
    }

    /// Leaves of the current run not yet consumed.
    pub fn remaining(&self) -> usize {
        self.current()
            .map_or(0, |run| run.len().saturating_sub(self.consumed))
    }

    /// Moves to the next run.
    pub fn advance(&mut self) {
        self.remainder = None;
        self.run_index += 1;
        self.consumed = 0;
    }

    /// Marks `n` leaves of the current run as consumed, advancing when the
    /// run is used up. Returns true if the cursor advanced.
    pub fn consume(&mut self, n: usize) -> bool {
        self.consumed += n;
        if self.remaining() == 0 {
            self.advance();
            return true;
        }
        false
    }

    /// Makes `rest` the current run, keeping `run_index` on the original run.
    pub fn replace_current(&mut self, rest: Run<'a>) {
        self.remainder = Some(rest);
        self.consumed = 0;
    }
}
