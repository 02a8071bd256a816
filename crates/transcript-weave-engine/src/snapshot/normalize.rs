use std::fmt::{self, Write};

use serde::Serialize;

use crate::{
    markup::{MarkupNode, RenderedContent, SpanRole},
    nesting::{Dimension, Label, MergeStep, Run},
};

/// Stable view of one line's merge steps and markup tree.
#[derive(Debug, Serialize)]
pub struct Snap {
    pub steps: Vec<StepSnap>,
    pub outline: Vec<String>,
}

/// One merge step as `outer dimension:label / inner dimension:[leaf indexes]...`.
#[derive(Debug, Serialize)]
pub struct StepSnap {
    pub outer: String,
    pub inner_dimension: Dimension,
    pub inner: Vec<Vec<usize>>,
}

impl fmt::Display for StepSnap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} /", self.outer)?;
        for run in &self.inner {
            let indexes: Vec<String> = run.iter().map(ToString::to_string).collect();
            write!(f, " {}:[{}]", self.inner_dimension, indexes.join(","))?;
        }
        Ok(())
    }
}

impl Snap {
    /// Steps, one per line.
    pub fn steps_text(&self) -> String {
        self.steps
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn outline_text(&self) -> String {
        self.outline.join("\n")
    }
}

fn label_name(dimension: Dimension, label: Option<Label>) -> String {
    format!("{dimension}:{}", label.map_or("none", Label::name))
}

fn leaf_indexes(run: &Run<'_>) -> Vec<usize> {
    run.leaves.iter().map(|l| l.index).collect()
}

/// Normalizes `steps` and the tree built from them.
pub fn normalize(steps: &[MergeStep<'_>], nodes: &[MarkupNode]) -> Snap {
    let steps = steps
        .iter()
        .map(|s| StepSnap {
            outer: label_name(s.outer_dimension, s.outer_label()),
            inner_dimension: s.inner_dimension,
            inner: s.inner_runs.iter().map(leaf_indexes).collect(),
        })
        .collect();

    let mut outline = vec![];
    for node in nodes {
        outline_node(node, 0, &mut outline);
    }

    Snap { steps, outline }
}

fn outline_node(node: &MarkupNode, depth: usize, out: &mut Vec<String>) {
    let mut line = "  ".repeat(depth);
    match node {
        MarkupNode::Container {
            role,
            dimension,
            label,
            children,
            ..
        } => {
            let role = match role {
                SpanRole::Outer => "outer",
                SpanRole::Inner => "inner",
            };
            let _ = write!(line, "{role} {}", label_name(*dimension, *label));
            out.push(line);
            for child in children {
                outline_node(child, depth + 1, out);
            }
        }
        MarkupNode::Leaf {
            index,
            before,
            content,
            after,
            ..
        } => {
            let body = match content {
                RenderedContent::Text(s) => s.clone(),
                RenderedContent::Superscript(s) => format!("^{s}"),
            };
            let _ = write!(line, "{index}: {}{body}{}", before.concat(), after.concat());
            out.push(line);
        }
    }
}
