//! Line rendering: sequence → two partitions → merge steps → markup tree.

use std::thread;

use crate::{
    error::NestingError,
    line::{Leaf, LineId, validate_sequence},
    markup::{LeafRenderer, MarkupNode, MarkupTreeBuilder, NodeIdGenerator},
    nesting::{AdjacencyOracle, Dimension, LineIndex, build_partition, merge_partitions},
};

/// One line to render: its id and the full ordered leaf array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineInput {
    pub id: LineId,
    pub leaves: Vec<Leaf>,
}

/// The rendered tree of one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    pub id: LineId,
    /// Number of merge steps, one outer container each.
    pub steps: usize,
    pub nodes: Vec<MarkupNode>,
}

/// Renders `sequence`, looking up neighbours through `oracle`.
///
/// Damage is the first partition, so it is the outer span when runs tie.
pub fn render_line<R, O>(
    line: &LineId,
    sequence: &[Leaf],
    oracle: &O,
    renderer: &R,
    ids: &NodeIdGenerator,
) -> Result<RenderedLine, NestingError>
where
    R: LeafRenderer + ?Sized,
    O: AdjacencyOracle + ?Sized,
{
    validate_sequence(line, sequence)?;

    let damage = build_partition(sequence, Dimension::Damage);
    let unclear = build_partition(sequence, Dimension::Unclear);
    let steps = merge_partitions(&damage, &unclear)?;

    let nodes = MarkupTreeBuilder::new(line, oracle, renderer, ids).build(&steps);
    log::debug!(
        "line {line}: {} leaves, {} damage / {} unclear runs, {} steps",
        sequence.len(),
        damage.runs.len(),
        unclear.runs.len(),
        steps.len()
    );

    Ok(RenderedLine {
        id: line.clone(),
        steps: steps.len(),
        nodes,
    })
}

/// Renders independent lines on up to `workers` scoped threads.
///
/// Each worker indexes and renders its own lines; only `ids` is shared.
/// Results are returned in input order.
pub fn render_lines<R>(
    lines: &[LineInput],
    renderer: &R,
    ids: &NodeIdGenerator,
    workers: usize,
) -> Vec<Result<RenderedLine, NestingError>>
where
    R: LeafRenderer + Sync + ?Sized,
{
    if lines.is_empty() {
        return vec![];
    }
    let chunk_size = lines.len().div_ceil(workers.max(1));

    thread::scope(|s| {
        let handles: Vec<_> = lines
            .chunks(chunk_size)
            .map(|chunk| {
                s.spawn(move || {
                    chunk
                        .iter()
                        .map(|input| {
                            let index = LineIndex::new(input.id.clone(), &input.leaves);
                            render_line(&input.id, &input.leaves, &index, renderer, ids)
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|handle| match handle.join() {
                Ok(results) => results,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        line::DamageLevel,
        markup::{PlainLeafRenderer, to_text},
    };
    use pretty_assertions::assert_eq;

    fn input(id: &str, n: usize) -> LineInput {
        LineInput {
            id: LineId::from(id),
            leaves: (0..n)
                .map(|i| {
                    Leaf::new(i, format!("{id}{i}"))
                        .with_damage((i % 3 == 0).then_some(DamageLevel::Other))
                })
                .collect(),
        }
    }

    #[test]
    fn render_line_rejects_unordered_leaves() {
        let leaves = vec![Leaf::new(2, "a"), Leaf::new(1, "b")];
        let line = LineId::from("1");
        let index = LineIndex::new(line.clone(), &leaves);
        let result = render_line(
            &line,
            &leaves,
            &index,
            &PlainLeafRenderer,
            &NodeIdGenerator::new(),
        );
        assert!(matches!(
            result,
            Err(NestingError::UnorderedLeaves {
                previous: 2,
                index: 1,
                ..
            })
        ));
    }

    #[test]
    fn render_line_of_empty_sequence_is_empty() {
        let line = LineId::from("1");
        let index = LineIndex::new(line.clone(), &[]);
        let rendered =
            render_line(&line, &[], &index, &PlainLeafRenderer, &NodeIdGenerator::new()).unwrap();
        assert_eq!(rendered.steps, 0);
        assert!(rendered.nodes.is_empty());
    }

    #[test]
    fn render_lines_keeps_input_order() {
        let lines: Vec<LineInput> = (0..7).map(|i| input(&format!("l{i}"), i + 1)).collect();
        let ids = NodeIdGenerator::new();

        let results = render_lines(&lines, &PlainLeafRenderer, &ids, 3);
        assert_eq!(results.len(), 7);
        for (input, result) in lines.iter().zip(&results) {
            let rendered = result.as_ref().unwrap();
            assert_eq!(rendered.id, input.id);
            let leaves: Vec<usize> = rendered.nodes.iter().flat_map(|n| n.leaf_indexes()).collect();
            assert_eq!(leaves, (0..input.leaves.len()).collect::<Vec<_>>());
        }
        assert_eq!(to_text(&results[1].as_ref().unwrap().nodes), "[l10] l11");
    }

    #[test]
    fn parallel_and_sequential_rendering_agree_on_text() {
        let lines: Vec<LineInput> = (0..5).map(|i| input(&format!("r{i}"), 4 + i)).collect();
        let texts = |workers| {
            render_lines(&lines, &PlainLeafRenderer, &NodeIdGenerator::new(), workers)
                .into_iter()
                .map(|r| to_text(&r.unwrap().nodes))
                .collect::<Vec<_>>()
        };
        assert_eq!(texts(1), texts(4));
    }

    #[test]
    fn zero_workers_still_renders() {
        let lines = vec![input("a", 2)];
        let results = render_lines(&lines, &PlainLeafRenderer, &NodeIdGenerator::new(), 0);
        assert_eq!(results.len(), 1);
        assert!(render_lines(&[], &PlainLeafRenderer, &NodeIdGenerator::new(), 2).is_empty());
    }
}
