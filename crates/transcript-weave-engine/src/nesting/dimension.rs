use std::fmt;

use serde::Serialize;

use crate::line::{DamageLevel, Leaf};

/// One of the two independent annotation axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Dimension {
    Damage,
    Unclear,
}

impl Dimension {
    /// The canonical label function for this dimension.
    pub fn label_of(self, leaf: &Leaf) -> Option<Label> {
        match self {
            Dimension::Damage => leaf.damage.map(Label::Damage),
            Dimension::Unclear => leaf.unclear.then_some(Label::Unclear),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Dimension::Damage => "damage",
            Dimension::Unclear => "unclear",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A positive annotation value. Absence of annotation is `Option::None`.
///
/// The label owns its delimiter glyphs; nothing else hardcodes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Label {
    Damage(DamageLevel),
    Unclear,
}

impl Label {
    pub fn dimension(self) -> Dimension {
        match self {
            Label::Damage(_) => Dimension::Damage,
            Label::Unclear => Dimension::Unclear,
        }
    }

    /// Glyph drawn before the first leaf of a span.
    pub fn open(self) -> &'static str {
        match self {
            Label::Damage(DamageLevel::Low) => "⸢",
            Label::Damage(DamageLevel::Other) => "[",
            Label::Unclear => "(",
        }
    }

    /// Glyph drawn after the last leaf of a span.
    pub fn close(self) -> &'static str {
        match self {
            Label::Damage(DamageLevel::Low) => "⸣",
            Label::Damage(DamageLevel::Other) => "]",
            Label::Unclear => ")",
        }
    }

    /// Short name used in outlines and markup class names.
    pub fn name(self) -> &'static str {
        match self {
            Label::Damage(DamageLevel::Low) => "low",
            Label::Damage(DamageLevel::Other) => "other",
            Label::Unclear => "true",
        }
    }
}
