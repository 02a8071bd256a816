//! Compact line notation.
//!
//! ```text
//! # comment
//! o 1. a-na be-li% {d}utu? nig2^ x#
//! ```
//!
//! Each non-blank line is `<label>. <tokens>`. Tokens are separated by
//! whitespace or `-`; `{text}` marks a determinative. Trailing flags:
//! `#` damage other, `%` damage low, `?` unclear, `^` has descendant content.

use std::sync::OnceLock;

use regex::Regex;

use super::{DamageLevel, Leaf, LineId};

pub const DAMAGE_OTHER: char = '#';
pub const DAMAGE_LOW: char = '%';
pub const UNCLEAR: char = '?';
pub const DESCENDANT: char = '^';
pub const COMMENT: char = '#';

pub const DETERMINATIVE_KIND: &str = "determinative";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    #[error("line {line}: expected `<label>. <tokens>`")]
    MissingLabel { line: usize },
    #[error("line {line}: cannot read token `{token}`")]
    InvalidToken { line: usize, token: String },
    #[error("line {line}: token `{token}` is marked both low and other damage")]
    ConflictingDamage { line: usize, token: String },
}

/// One parsed transcription line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotatedLine {
    pub id: LineId,
    pub leaves: Vec<Leaf>,
}

fn line_regex() -> &'static Regex {
    static LINE_REGEX: OnceLock<Regex> = OnceLock::new();
    LINE_REGEX.get_or_init(|| {
        Regex::new(r"^\s*(?P<label>[^.]+?)\.(?:\s+(?P<body>.*))?$").expect("Invalid line regex")
    })
}

fn token_regex() -> &'static Regex {
    static TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();
    TOKEN_REGEX.get_or_init(|| {
        Regex::new(r"^(?:\{(?P<det>[^{}#%?^]+)\}|(?P<text>[^{}#%?^]+))(?P<flags>[#%?^]*)$")
            .expect("Invalid token regex")
    })
}

fn separator_regex() -> &'static Regex {
    static SEPARATOR_REGEX: OnceLock<Regex> = OnceLock::new();
    SEPARATOR_REGEX.get_or_init(|| Regex::new(r"[\s-]+").expect("Invalid separator regex"))
}

/// A determinative is its own token even when written flush against a sign.
fn piece_regex() -> &'static Regex {
    static PIECE_REGEX: OnceLock<Regex> = OnceLock::new();
    PIECE_REGEX.get_or_init(|| {
        Regex::new(r"\{[^{}]+\}[#%?^]*|[^{}]+").expect("Invalid piece regex")
    })
}

/// Parses every line of `text`, skipping blank and comment lines.
///
/// `line` numbers in errors are 1-based.
pub fn parse_lines(text: &str) -> Result<Vec<NotatedLine>, NotationError> {
    let mut out = vec![];
    for (i, raw) in text.lines().enumerate() {
        if let Some(line) = parse_line(i + 1, raw)? {
            out.push(line);
        }
    }
    Ok(out)
}

/// Parses a single physical line. Returns `Ok(None)` for blank and comment lines.
pub fn parse_line(number: usize, raw: &str) -> Result<Option<NotatedLine>, NotationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with(COMMENT) {
        return Ok(None);
    }

    let caps = line_regex()
        .captures(trimmed)
        .ok_or(NotationError::MissingLabel { line: number })?;
    let label = caps["label"].trim().to_string();
    let body = caps.name("body").map_or("", |m| m.as_str());

    let mut leaves = vec![];
    for chunk in separator_regex().split(body).filter(|t| !t.is_empty()) {
        for token in split_pieces(number, chunk)? {
            leaves.push(parse_token(number, &label, leaves.len(), token)?);
        }
    }

    Ok(Some(NotatedLine {
        id: LineId(label),
        leaves,
    }))
}

fn split_pieces(number: usize, chunk: &str) -> Result<Vec<&str>, NotationError> {
    let mut pieces = vec![];
    let mut pos = 0;
    for m in piece_regex().find_iter(chunk) {
        if m.start() != pos {
            break;
        }
        pieces.push(m.as_str());
        pos = m.end();
    }
    if pos != chunk.len() {
        return Err(NotationError::InvalidToken {
            line: number,
            token: chunk.to_string(),
        });
    }
    Ok(pieces)
}

fn parse_token(number: usize, label: &str, index: usize, token: &str) -> Result<Leaf, NotationError> {
    let caps = token_regex()
        .captures(token)
        .ok_or_else(|| NotationError::InvalidToken {
            line: number,
            token: token.to_string(),
        })?;

    let mut leaf = match (caps.name("det"), caps.name("text")) {
        (Some(det), _) => Leaf::new(index, det.as_str()).with_kind(DETERMINATIVE_KIND),
        (None, Some(text)) => Leaf::new(index, text.as_str()),
        (None, None) => {
            return Err(NotationError::InvalidToken {
                line: number,
                token: token.to_string(),
            });
        }
    };
    leaf = leaf.with_id(format!("{label}.{index}"));

    let flags = &caps["flags"];
    let damage = match (flags.contains(DAMAGE_LOW), flags.contains(DAMAGE_OTHER)) {
        (true, true) => {
            return Err(NotationError::ConflictingDamage {
                line: number,
                token: token.to_string(),
            });
        }
        (true, false) => Some(DamageLevel::Low),
        (false, true) => Some(DamageLevel::Other),
        (false, false) => None,
    };

    Ok(leaf
        .with_damage(damage)
        .with_unclear(flags.contains(UNCLEAR))
        .with_descendant_content(flags.contains(DESCENDANT)))
}
