//! Interface name rewriting.
//!
//! Vendors disagree on both interface type names (`FastEthernet` vs
//! `Ethernet`, `GigabitEthernet` vs `10GE`) and on slot/port addressing depth
//! (`0/1` vs `1/0/1`). This module splits a name into its type prefix and
//! index suffix, remaps the type through user supplied mappings, and
//! optionally reshapes the index.
//!
//! All functions are pure; batch application over a whole configuration
//! lives in the converter crate.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

/// Errors raised while loading interface mapping directives and options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// An entry without `=`.
    #[error("invalid interface mapping {0:?}: expected FromType=ToType")]
    MissingSeparator(String),
    /// An entry with an empty side.
    #[error("invalid interface mapping {0:?}: both sides must be non-empty")]
    EmptySide(String),
    /// Index style other than `keep`, `2` or `3`.
    #[error("invalid interface index style {0:?}: expected keep, 2 or 3")]
    UnknownIndexStyle(String),
}

/// One `FromType=ToType` rule. `from` is stored normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceMapping {
    from: String,
    to: String,
}

impl InterfaceMapping {
    /// Build a mapping, rejecting empty sides.
    pub fn new(from: &str, to: &str) -> Result<Self, MappingError> {
        let normalized = normalize_type(from);
        let to = to.trim();
        if normalized.is_empty() || to.is_empty() {
            return Err(MappingError::EmptySide(format!("{from}={to}")));
        }
        Ok(Self {
            from: normalized,
            to: to.to_string(),
        })
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }
}

impl FromStr for InterfaceMapping {
    type Err = MappingError;

    fn from_str(entry: &str) -> Result<Self, Self::Err> {
        let entry = entry.trim();
        let Some((from, to)) = entry.split_once('=') else {
            return Err(MappingError::MissingSeparator(entry.to_string()));
        };
        if normalize_type(from).is_empty() || to.trim().is_empty() {
            return Err(MappingError::EmptySide(entry.to_string()));
        }
        Self::new(from, to)
    }
}

/// Parse a comma-separated directive such as `FastEthernet=GigabitEthernet,GigabitEthernet=10GE`.
///
/// Any malformed entry fails the whole directive.
pub fn parse_mappings(raw: &str) -> Result<Vec<InterfaceMapping>, MappingError> {
    raw.split(',').map(str::parse).collect()
}

/// How the numeric index suffix is reshaped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IndexStyle {
    /// Leave the suffix untouched.
    #[default]
    Keep,
    /// `a/b/c` becomes `b/c`.
    TwoPart,
    /// `a/b` becomes `<leading>/a/b`.
    ThreePart,
}

impl FromStr for IndexStyle {
    type Err = MappingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "keep" => Ok(IndexStyle::Keep),
            "2" => Ok(IndexStyle::TwoPart),
            "3" => Ok(IndexStyle::ThreePart),
            other => Err(MappingError::UnknownIndexStyle(other.to_string())),
        }
    }
}

impl Display for IndexStyle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IndexStyle::Keep => "keep",
            IndexStyle::TwoPart => "2",
            IndexStyle::ThreePart => "3",
        })
    }
}

/// Index reshaping options shared by every name in one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOptions {
    pub index_style: IndexStyle,
    /// Segment inserted by [`IndexStyle::ThreePart`]; blank means `1`.
    pub leading_segment: String,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            index_style: IndexStyle::Keep,
            leading_segment: "1".to_string(),
        }
    }
}

impl TransformOptions {
    pub fn is_noop(&self) -> bool {
        self.index_style == IndexStyle::Keep
    }
}

/// Rewrite one interface name.
///
/// VLAN interfaces (`Vlan10`, `vlan 10`, `Vlanif10`) are returned unchanged,
/// as are names without a recognizable type.
pub fn transform_name(
    name: &str,
    mappings: &[InterfaceMapping],
    opts: &TransformOptions,
) -> String {
    let (kind, suffix) = split_name(name);
    let normalized = normalize_type(kind);
    if normalized.is_empty() || normalized.starts_with("vlan") {
        return name.to_string();
    }

    let target = mappings
        .iter()
        .find(|m| m.from == normalized)
        .map_or(kind, |m| m.to.as_str());

    let separator = if suffix.starts_with(char::is_whitespace) {
        " "
    } else {
        ""
    };
    let index = reindex(suffix.trim(), opts);
    if index.is_empty() {
        return target.to_string();
    }
    format!("{target}{separator}{index}")
}

/// Split `name` into its type prefix and index suffix.
///
/// The suffix keeps its leading whitespace for space-separated names
/// (`Ethernet 0/1` gives `("Ethernet", " 0/1")`).
pub fn split_name(name: &str) -> (&str, &str) {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return ("", "");
    }

    let mut fields = trimmed.split_whitespace();
    if let (Some(first), Some(second)) = (fields.next(), fields.next()) {
        if second.starts_with(|c: char| c.is_ascii_digit()) {
            return (first, &trimmed[first.len()..]);
        }
    }

    let bytes = trimmed.as_bytes();
    if let Some(slash) = trimmed.find('/').filter(|&idx| idx > 0) {
        let boundary = digits_start(bytes, slash);
        if boundary > 0 {
            return (trimmed[..boundary].trim(), &trimmed[boundary..]);
        }
    }

    let boundary = digits_start(bytes, bytes.len());
    if boundary > 0 && boundary < bytes.len() {
        return (trimmed[..boundary].trim(), &trimmed[boundary..]);
    }

    if let Some((idx, _)) = trimmed
        .char_indices()
        .find(|&(idx, c)| idx > 0 && c.is_ascii_digit())
    {
        return (trimmed[..idx].trim(), &trimmed[idx..]);
    }

    (trimmed, "")
}

/// Lowercase and strip spaces and hyphens. Used for matching only.
pub fn normalize_type(kind: &str) -> String {
    kind.trim()
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Reshape a `/`-separated numeric index according to `opts`.
///
/// Suffixes with non-numeric or empty segments (`0/1.100`, `0//1`) are
/// returned unchanged.
pub fn reindex(suffix: &str, opts: &TransformOptions) -> String {
    if suffix.is_empty() {
        return String::new();
    }
    let parts: Vec<&str> = suffix.split('/').collect();
    if !parts.iter().all(|p| is_digits(p)) {
        return suffix.to_string();
    }

    match (opts.index_style, parts.as_slice()) {
        (IndexStyle::TwoPart, [_, slot, port]) => format!("{slot}/{port}"),
        (IndexStyle::ThreePart, [slot, port]) => {
            let leading = match opts.leading_segment.trim() {
                "" => "1",
                seg => seg,
            };
            format!("{leading}/{slot}/{port}")
        }
        _ => suffix.to_string(),
    }
}

/// Walk back from `end` over ASCII digits and return where the run starts.
fn digits_start(bytes: &[u8], end: usize) -> usize {
    let mut boundary = end;
    while boundary > 0 && bytes[boundary - 1].is_ascii_digit() {
        boundary -= 1;
    }
    boundary
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
