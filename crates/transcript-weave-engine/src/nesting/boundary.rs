use std::collections::HashMap;

use serde::Serialize;

use crate::line::{Leaf, LineId};

use super::{dimension::Label, partition::Run};

/// Pure lookup from a line-wide index to the leaf occupying it.
///
/// Implementations must be precomputed per line; the emitter calls this for
/// every span edge.
pub trait AdjacencyOracle {
    fn leaf_at(&self, line: &LineId, index: usize) -> Option<&Leaf>;
}

/// Index of one line's leaves, built once before rendering.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    line: LineId,
    by_index: HashMap<usize, &'a Leaf>,
}

impl<'a> LineIndex<'a> {
    /// Indexes the full line. Pass every leaf of the line, not only the
    /// sequence being rendered, so continuations across it are found.
    pub fn new(line: LineId, leaves: &'a [Leaf]) -> Self {
        Self {
            line,
            by_index: leaves.iter().map(|leaf| (leaf.index, leaf)).collect(),
        }
    }
}

impl AdjacencyOracle for LineIndex<'_> {
    fn leaf_at(&self, line: &LineId, index: usize) -> Option<&Leaf> {
        if *line != self.line {
            return None;
        }
        self.by_index.get(&index).copied()
    }
}

/// Delimiter glyphs to draw around a span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Delimiters {
    pub open: Option<&'static str>,
    pub close: Option<&'static str>,
}

impl Delimiters {
    pub const NONE: Delimiters = Delimiters {
        open: None,
        close: None,
    };
}

/// Decides which span edges get a delimiter glyph.
pub struct BoundaryEmitter<'o, O: AdjacencyOracle + ?Sized> {
    line: &'o LineId,
    oracle: &'o O,
}

impl<'o, O: AdjacencyOracle + ?Sized> BoundaryEmitter<'o, O> {
    pub fn new(line: &'o LineId, oracle: &'o O) -> Self {
        Self { line, oracle }
    }

    /// Delimiters for `run`, evaluated independently at each edge.
    ///
    /// An edge is suppressed when the neighbouring leaf in the line's index
    /// space carries the same label, since the span continues across it.
    /// Unlabelled runs get none. A leaf with descendant content that forms a
    /// whole span on its own gets none either; a one-leaf piece of a longer
    /// span keeps the glyph for the edge it owns.
    pub fn delimiters(&self, run: &Run<'_>) -> Delimiters {
        let (Some(label), Some(first), Some(last)) =
            (run.label, run.leaves.first(), run.leaves.last())
        else {
            return Delimiters::NONE;
        };
        let opens = !self.continues(label, first.index.checked_sub(1));
        let closes = !self.continues(label, last.index.checked_add(1));
        if run.len() == 1 && first.has_descendant_content && opens && closes {
            return Delimiters::NONE;
        }

        Delimiters {
            open: opens.then(|| label.open()),
            close: closes.then(|| label.close()),
        }
    }

    fn continues(&self, label: Label, neighbour: Option<usize>) -> bool {
        neighbour
            .and_then(|index| self.oracle.leaf_at(self.line, index))
            .is_some_and(|leaf| label.dimension().label_of(leaf) == Some(label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        line::DamageLevel,
        nesting::{Dimension, partition::build_partition},
    };
    use pretty_assertions::assert_eq;

    fn low() -> Option<DamageLevel> {
        Some(DamageLevel::Low)
    }

    #[test]
    fn isolated_span_gets_both_glyphs() {
        let leaves = vec![
            Leaf::new(0, "a"),
            Leaf::new(1, "b").with_damage(low()),
            Leaf::new(2, "c").with_damage(low()),
            Leaf::new(3, "d"),
        ];
        let line = LineId::from("1");
        let index = LineIndex::new(line.clone(), &leaves);
        let emitter = BoundaryEmitter::new(&line, &index);
        let p = build_partition(&leaves, Dimension::Damage);

        assert_eq!(
            emitter.delimiters(&p.runs[1]),
            Delimiters {
                open: Some("⸢"),
                close: Some("⸣"),
            }
        );
        assert_eq!(emitter.delimiters(&p.runs[0]), Delimiters::NONE);
    }

    #[test]
    fn continuation_across_split_suppresses_inner_edges() {
        let leaves: Vec<Leaf> = (0..4)
            .map(|i| Leaf::new(i, "x").with_damage(Some(DamageLevel::Other)))
            .collect();
        let line = LineId::from("1");
        let index = LineIndex::new(line.clone(), &leaves);
        let emitter = BoundaryEmitter::new(&line, &index);
        let p = build_partition(&leaves, Dimension::Damage);
        let (head, tail) = p.runs[0].split_at(2);

        assert_eq!(
            emitter.delimiters(&head),
            Delimiters {
                open: Some("["),
                close: None,
            }
        );
        assert_eq!(
            emitter.delimiters(&tail),
            Delimiters {
                open: None,
                close: Some("]"),
            }
        );
    }

    #[test]
    fn different_damage_level_is_not_a_continuation() {
        let leaves = vec![
            Leaf::new(0, "a").with_damage(Some(DamageLevel::Other)),
            Leaf::new(1, "b").with_damage(low()),
        ];
        let line = LineId::from("1");
        let index = LineIndex::new(line.clone(), &leaves);
        let emitter = BoundaryEmitter::new(&line, &index);
        let p = build_partition(&leaves, Dimension::Damage);

        assert_eq!(
            emitter.delimiters(&p.runs[0]),
            Delimiters {
                open: Some("["),
                close: Some("]"),
            }
        );
        assert_eq!(
            emitter.delimiters(&p.runs[1]),
            Delimiters {
                open: Some("⸢"),
                close: Some("⸣"),
            }
        );
    }

    #[test]
    fn adjacency_uses_line_index_space() {
        // The rendered sequence is a slice of the line; neighbours outside it
        // still count.
        let line_leaves = vec![
            Leaf::new(4, "a").with_unclear(true),
            Leaf::new(5, "b").with_unclear(true),
            Leaf::new(6, "c").with_unclear(true),
        ];
        let line = LineId::from("r 2");
        let index = LineIndex::new(line.clone(), &line_leaves);
        let emitter = BoundaryEmitter::new(&line, &index);
        let sequence = &line_leaves[1..2];
        let p = build_partition(sequence, Dimension::Unclear);

        assert_eq!(emitter.delimiters(&p.runs[0]), Delimiters::NONE);
    }

    #[test]
    fn gap_in_index_space_means_no_neighbour() {
        let leaves = vec![
            Leaf::new(0, "a").with_unclear(true),
            Leaf::new(2, "b").with_unclear(true),
        ];
        let line = LineId::from("1");
        let index = LineIndex::new(line.clone(), &leaves);
        let emitter = BoundaryEmitter::new(&line, &index);
        let p = build_partition(&leaves[1..], Dimension::Unclear);

        assert_eq!(
            emitter.delimiters(&p.runs[0]),
            Delimiters {
                open: Some("("),
                close: Some(")"),
            }
        );
    }

    #[test]
    fn other_lines_are_not_neighbours() {
        let leaves = vec![Leaf::new(0, "a").with_unclear(true)];
        let index = LineIndex::new(LineId::from("1"), &leaves);
        assert!(index.leaf_at(&LineId::from("2"), 0).is_none());
        assert_eq!(index.leaf_at(&LineId::from("1"), 0).map(|l| l.index), Some(0));
    }

    #[test]
    fn single_leaf_with_descendant_content_is_not_decorated() {
        let leaves = vec![
            Leaf::new(0, "a"),
            Leaf::new(1, "b").with_unclear(true).with_descendant_content(true),
            Leaf::new(2, "c"),
        ];
        let line = LineId::from("1");
        let index = LineIndex::new(line.clone(), &leaves);
        let emitter = BoundaryEmitter::new(&line, &index);
        let p = build_partition(&leaves, Dimension::Unclear);

        assert_eq!(emitter.delimiters(&p.runs[1]), Delimiters::NONE);
    }

    #[test]
    fn descendant_content_on_split_head_keeps_opening_glyph() {
        let leaves = vec![
            Leaf::new(0, "a"),
            Leaf::new(1, "b").with_unclear(true).with_descendant_content(true),
            Leaf::new(2, "c").with_unclear(true),
        ];
        let line = LineId::from("1");
        let index = LineIndex::new(line.clone(), &leaves);
        let emitter = BoundaryEmitter::new(&line, &index);
        let p = build_partition(&leaves, Dimension::Unclear);
        let (head, tail) = p.runs[1].split_at(1);

        assert_eq!(
            emitter.delimiters(&head),
            Delimiters {
                open: Some("("),
                close: None,
            }
        );
        assert_eq!(
            emitter.delimiters(&tail),
            Delimiters {
                open: None,
                close: Some(")"),
            }
        );
    }

    #[test]
    fn descendant_content_inside_longer_run_is_ignored() {
        let leaves = vec![
            Leaf::new(0, "a").with_unclear(true).with_descendant_content(true),
            Leaf::new(1, "b").with_unclear(true),
        ];
        let line = LineId::from("1");
        let index = LineIndex::new(line.clone(), &leaves);
        let emitter = BoundaryEmitter::new(&line, &index);
        let p = build_partition(&leaves, Dimension::Unclear);

        assert_eq!(
            emitter.delimiters(&p.runs[0]),
            Delimiters {
                open: Some("("),
                close: Some(")"),
            }
        );
    }
}
