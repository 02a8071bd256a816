use std::fmt;

use serde::Serialize;

/// Identifies one transcription line, e.g. `o 3` or `r ii 12'`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct LineId(pub String);

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LineId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Damage classification of a sign.
///
/// Curators use a range of markers; everything that is not "low" collapses
/// into [`DamageLevel::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DamageLevel {
    Low,
    Other,
}

impl DamageLevel {
    /// Maps a curator's damage marker. `None` means the sign is undamaged.
    pub fn from_marker(marker: Option<&str>) -> Option<Self> {
        match marker.map(str::trim) {
            None | Some("") => None,
            Some(m) if m.eq_ignore_ascii_case("low") => Some(Self::Low),
            Some(_) => Some(Self::Other),
        }
    }
}

/// The smallest annotated unit of a line (a sign or character).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Leaf {
    /// Graph-store identifier.
    pub id: String,
    /// Position in the line's index space. Unique and strictly increasing.
    pub index: usize,
    /// Selects the leaf renderer (e.g. `"reading"`, `"determinative"`).
    pub kind: String,
    pub damage: Option<DamageLevel>,
    pub unclear: bool,
    /// The leaf decorates its own boundaries at a deeper level.
    pub has_descendant_content: bool,
    /// Opaque content handed to the leaf renderer.
    pub payload: String,
}

impl Leaf {
    pub const DEFAULT_KIND: &'static str = "reading";

    /// Creates an unannotated leaf of the default kind.
    pub fn new(index: usize, payload: impl Into<String>) -> Self {
        Self {
            id: format!("leaf-{index}"),
            index,
            kind: Self::DEFAULT_KIND.to_string(),
            damage: None,
            unclear: false,
            has_descendant_content: false,
            payload: payload.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_damage(mut self, damage: Option<DamageLevel>) -> Self {
        self.damage = damage;
        self
    }

    pub fn with_unclear(mut self, unclear: bool) -> Self {
        self.unclear = unclear;
        self
    }

    pub fn with_descendant_content(mut self, has_descendant_content: bool) -> Self {
        self.has_descendant_content = has_descendant_content;
        self
    }
}
