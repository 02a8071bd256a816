use std::collections::HashMap;

use serde::Serialize;

use crate::line::{Leaf, notation::DETERMINATIVE_KIND};

/// What a leaf renderer produces for one leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RenderedContent {
    Text(String),
    /// Raised text, used for determinatives.
    Superscript(String),
}

impl RenderedContent {
    pub fn text(&self) -> &str {
        match self {
            RenderedContent::Text(s) | RenderedContent::Superscript(s) => s,
        }
    }
}

/// Renders the content of a single leaf. Called once per leaf, in order.
pub trait LeafRenderer {
    fn render(&self, leaf: &Leaf) -> RenderedContent;
}

/// Renders the payload as plain text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainLeafRenderer;

impl LeafRenderer for PlainLeafRenderer {
    fn render(&self, leaf: &Leaf) -> RenderedContent {
        RenderedContent::Text(leaf.payload.clone())
    }
}

/// Renders the payload raised.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuperscriptLeafRenderer;

impl LeafRenderer for SuperscriptLeafRenderer {
    fn render(&self, leaf: &Leaf) -> RenderedContent {
        RenderedContent::Superscript(leaf.payload.clone())
    }
}

type SharedRenderer = Box<dyn LeafRenderer + Send + Sync>;

/// Dispatches to a renderer registered for the leaf's kind, or the fallback.
pub struct KindRenderers {
    by_kind: HashMap<String, SharedRenderer>,
    fallback: SharedRenderer,
}

impl KindRenderers {
    pub fn new(fallback: impl LeafRenderer + Send + Sync + 'static) -> Self {
        Self {
            by_kind: HashMap::new(),
            fallback: Box::new(fallback),
        }
    }

    pub fn with(
        mut self,
        kind: impl Into<String>,
        renderer: impl LeafRenderer + Send + Sync + 'static,
    ) -> Self {
        self.by_kind.insert(kind.into(), Box::new(renderer));
        self
    }
}

impl Default for KindRenderers {
    fn default() -> Self {
        Self::new(PlainLeafRenderer).with(DETERMINATIVE_KIND, SuperscriptLeafRenderer)
    }
}

impl LeafRenderer for KindRenderers {
    fn render(&self, leaf: &Leaf) -> RenderedContent {
        self.by_kind
            .get(&leaf.kind)
            .unwrap_or(&self.fallback)
            .render(leaf)
    }
}
