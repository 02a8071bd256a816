use crate::{
    line::LineId,
    nesting::{AdjacencyOracle, BoundaryEmitter, Delimiters, MergeStep, Run},
};

use super::{
    render::LeafRenderer,
    types::{MarkupNode, NodeIdGenerator, SpanRole},
};

/// Builds the markup tree of one line from its merge steps.
///
/// Every step becomes an outer container holding one inner container per
/// inner run. Delimiter glyphs are attached to the boundary leaves: outer
/// glyphs outside inner ones.
pub struct MarkupTreeBuilder<'r, R: LeafRenderer + ?Sized, O: AdjacencyOracle + ?Sized> {
    emitter: BoundaryEmitter<'r, O>,
    renderer: &'r R,
    ids: &'r NodeIdGenerator,
}

impl<'r, R: LeafRenderer + ?Sized, O: AdjacencyOracle + ?Sized> MarkupTreeBuilder<'r, R, O> {
    pub fn new(line: &'r LineId, oracle: &'r O, renderer: &'r R, ids: &'r NodeIdGenerator) -> Self {
        Self {
            emitter: BoundaryEmitter::new(line, oracle),
            renderer,
            ids,
        }
    }

    /// Walks `steps` in order and returns one outer container per step.
    pub fn build(&self, steps: &[MergeStep<'_>]) -> Vec<MarkupNode> {
        steps.iter().map(|step| self.build_step(step)).collect()
    }

    fn build_step(&self, step: &MergeStep<'_>) -> MarkupNode {
        let outer = self.emitter.delimiters(&step.outer);
        let last = step.inner_runs.len().saturating_sub(1);

        let children = step
            .inner_runs
            .iter()
            .enumerate()
            .map(|(i, run)| {
                let edges = Delimiters {
                    open: if i == 0 { outer.open } else { None },
                    close: if i == last { outer.close } else { None },
                };
                self.build_inner(step, run, edges)
            })
            .collect();

        MarkupNode::Container {
            id: self.ids.next_id(),
            role: SpanRole::Outer,
            dimension: step.outer_dimension,
            label: step.outer.label,
            children,
        }
    }

    /// `outer` holds the outer span's glyphs that fall on this run's edges.
    fn build_inner(&self, step: &MergeStep<'_>, run: &Run<'_>, outer: Delimiters) -> MarkupNode {
        let inner = self.emitter.delimiters(run);
        let last = run.len().saturating_sub(1);

        let children = run
            .leaves
            .iter()
            .enumerate()
            .map(|(j, leaf)| {
                let mut before = vec![];
                let mut after = vec![];
                if j == 0 {
                    before.extend(outer.open);
                    before.extend(inner.open);
                }
                if j == last {
                    after.extend(inner.close);
                    after.extend(outer.close);
                }
                MarkupNode::Leaf {
                    leaf_id: leaf.id.clone(),
                    index: leaf.index,
                    before,
                    content: self.renderer.render(leaf),
                    after,
                }
            })
            .collect();

        MarkupNode::Container {
            id: self.ids.next_id(),
            role: SpanRole::Inner,
            dimension: step.inner_dimension,
            label: run.label,
            children,
        }
    }
}
