use crate::{
    line::Leaf,
    nesting::{Label, MergeStep, Partition},
};

/// Validates merge output against the sequence and both partitions.
///
/// Asserts that:
/// - Inner runs of all steps, concatenated, reproduce the sequence in order
/// - Each step's inner runs tile its outer span exactly
/// - Every outer span and inner run lies within one original run of its
///   dimension and keeps that run's label (splits are prefix/suffix slices)
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(sequence: &[Leaf], a: &Partition<'_>, b: &Partition<'_>, steps: &[MergeStep<'_>]) {
    let mut pos = 0;
    for (n, step) in steps.iter().enumerate() {
        assert_eq!(
            step.outer.start, pos,
            "step {n} starts at {} but previous steps ended at {pos}",
            step.outer.start
        );
        let mut inner_pos = step.outer.start;
        for run in &step.inner_runs {
            assert!(!run.is_empty(), "step {n} has an empty inner run");
            assert_eq!(
                run.start, inner_pos,
                "step {n}: inner run at {} leaves a gap or overlap (expected {inner_pos})",
                run.start
            );
            inner_pos = run.end();
        }
        assert_eq!(
            inner_pos,
            step.outer.end(),
            "step {n}: inner runs end at {inner_pos}, outer span ends at {}",
            step.outer.end()
        );

        for leaf in step.leaves() {
            let Some(expected) = sequence.get(pos) else {
                panic!("step {n}: steps cover more than {} leaves", sequence.len());
            };
            assert!(
                std::ptr::eq(leaf, expected),
                "step {n}: leaf {} out of order (expected {})",
                leaf.index,
                expected.index
            );
            pos += 1;
        }

        let (outer_p, inner_p) = if step.outer_dimension == a.dimension {
            (a, b)
        } else {
            (b, a)
        };
        assert_within_run(outer_p, step.outer.start, step.outer.end(), step.outer.label, n);
        for run in &step.inner_runs {
            assert_within_run(inner_p, run.start, run.end(), run.label, n);
        }
    }
    assert_eq!(
        pos,
        sequence.len(),
        "steps cover {pos} of {} leaves",
        sequence.len()
    );
}

fn assert_within_run(
    partition: &Partition<'_>,
    start: usize,
    end: usize,
    label: Option<Label>,
    step: usize,
) {
    let original = partition
        .runs
        .iter()
        .find(|r| r.start <= start && start < r.end());
    let Some(original) = original else {
        panic!("step {step}: no {} run contains offset {start}", partition.dimension);
    };
    assert!(
        end <= original.end(),
        "step {step}: {} span {start}..{end} crosses run {}..{}",
        partition.dimension,
        original.start,
        original.end()
    );
    assert!(
        label == original.label,
        "step {step}: {} span {start}..{end} relabelled from {:?}",
        partition.dimension,
        original.label
    );
}
