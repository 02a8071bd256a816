use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::nesting::{Dimension, Label};

use super::render::RenderedContent;

/// Identifier of a container node, unique across every line rendered with
/// the same generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub u64);

/// Monotonic id source shared by worker threads.
#[derive(Debug, Default)]
pub struct NodeIdGenerator {
    next: AtomicU64,
}

impl NodeIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    pub fn next_id(&self) -> NodeId {
        NodeId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

/// Whether a container came from a step's outer span or one of its inner runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpanRole {
    Outer,
    Inner,
}

/// A node of the rendered line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MarkupNode {
    /// A span of one dimension. `label` is `None` for unannotated spans.
    Container {
        id: NodeId,
        role: SpanRole,
        dimension: Dimension,
        label: Option<Label>,
        children: Vec<MarkupNode>,
    },
    /// One input leaf with the delimiter glyphs drawn around it.
    Leaf {
        leaf_id: String,
        index: usize,
        /// Opening glyphs, outermost first.
        before: Vec<&'static str>,
        content: RenderedContent,
        /// Closing glyphs, innermost first.
        after: Vec<&'static str>,
    },
}

impl MarkupNode {
    pub fn children(&self) -> &[MarkupNode] {
        match self {
            MarkupNode::Container { children, .. } => children,
            MarkupNode::Leaf { .. } => &[],
        }
    }

    /// Leaf nodes under this node in document order.
    pub fn leaf_indexes(&self) -> Vec<usize> {
        let mut out = vec![];
        self.collect_leaf_indexes(&mut out);
        out
    }

    fn collect_leaf_indexes(&self, out: &mut Vec<usize>) {
        match self {
            MarkupNode::Container { children, .. } => {
                for child in children {
                    child.collect_leaf_indexes(out);
                }
            }
            MarkupNode::Leaf { index, .. } => out.push(*index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn ids_are_unique_across_threads() {
        let ids = NodeIdGenerator::starting_at(10);
        let mut seen: Vec<u64> = thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| (0..100).map(|_| ids.next_id().0).collect::<Vec<_>>()))
                .collect();
            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap())
                .collect()
        });
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 400);
        assert_eq!(seen[0], 10);
        assert_eq!(ids.next_id(), NodeId(410));
    }

    #[test]
    fn leaf_indexes_walks_in_order() {
        let leaf = |index| MarkupNode::Leaf {
            leaf_id: format!("l{index}"),
            index,
            before: vec![],
            content: RenderedContent::Text("x".into()),
            after: vec![],
        };
        let tree = MarkupNode::Container {
            id: NodeId(0),
            role: SpanRole::Outer,
            dimension: Dimension::Damage,
            label: None,
            children: vec![
                MarkupNode::Container {
                    id: NodeId(1),
                    role: SpanRole::Inner,
                    dimension: Dimension::Unclear,
                    label: Some(Label::Unclear),
                    children: vec![leaf(3), leaf(4)],
                },
                leaf(5),
            ],
        };
        assert_eq!(tree.leaf_indexes(), vec![3, 4, 5]);
        assert_eq!(tree.children().len(), 2);
    }
}
