//! # Markup Tree
//!
//! Turns merge steps into an explicit [`MarkupNode`] tree and serializes it.
//!
//! ## Modules
//!
//! - **`types`**: `MarkupNode`, `NodeId`, `NodeIdGenerator`
//! - **`render`**: `LeafRenderer` trait and the built-in renderers keyed by leaf kind
//! - **`builder`**: `MarkupTreeBuilder` walks merge steps into containers
//! - **`serialize`**: plain-text and HTML serializers
//!
//! The tree is a value: nothing here writes into an output document, so any
//! serializer (including any `serde` one) can consume it.

pub mod builder;
pub mod render;
pub mod serialize;
pub mod types;

pub use builder::MarkupTreeBuilder;
pub use render::{KindRenderers, LeafRenderer, PlainLeafRenderer, RenderedContent};
pub use serialize::{to_html, to_text};
pub use types::{MarkupNode, NodeId, NodeIdGenerator, SpanRole};
