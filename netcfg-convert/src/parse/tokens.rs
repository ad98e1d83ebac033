//! Token-level helpers shared by both dialect parsers.

use tracing::debug;

/// Read the leading decimal digits of `token`, like C's `%d` without a sign.
///
/// `"10"` and `"10abc"` give 10; `"abc"` and `""` give `None`.
pub(crate) fn leading_number(token: &str) -> Option<u32> {
    let end = token
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(token.len());
    token[..end].parse().ok()
}

/// Numeric field with the zero fallback used for garbled values.
pub(crate) fn number_or_zero(token: Option<&str>, field: &str, line: &str) -> u32 {
    match token.and_then(leading_number) {
        Some(value) => value,
        None => {
            debug!(field, line, "malformed numeric field; using 0");
            0
        }
    }
}

/// Optional numeric field; garbled values leave the field unset.
pub(crate) fn optional_number(token: Option<&str>, field: &str, line: &str) -> Option<u32> {
    let value = token.and_then(leading_number);
    if value.is_none() {
        debug!(field, line, "malformed numeric field; leaving unset");
    }
    value
}

/// An address matcher decoded from `any`, `host A` or `A W`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AddressSpec {
    pub addr: String,
    pub wildcard: Option<String>,
    /// Tokens consumed.
    pub used: usize,
}

pub(crate) fn address_spec(tokens: &[&str]) -> Option<AddressSpec> {
    let first = tokens.first()?;
    if first.eq_ignore_ascii_case("any") {
        return Some(AddressSpec {
            addr: "any".to_string(),
            wildcard: None,
            used: 1,
        });
    }
    let second = tokens.get(1)?;
    if first.eq_ignore_ascii_case("host") {
        return Some(AddressSpec {
            addr: (*second).to_string(),
            wildcard: Some("0.0.0.0".to_string()),
            used: 2,
        });
    }
    Some(AddressSpec {
        addr: (*first).to_string(),
        wildcard: Some((*second).to_string()),
        used: 2,
    })
}

/// Decode `eq|neq|gt|lt P` or `range A B`, returning the normalized text and tokens consumed.
pub(crate) fn port_spec(tokens: &[&str]) -> Option<(String, usize)> {
    let op = tokens.first()?.to_ascii_lowercase();
    match op.as_str() {
        "eq" | "neq" | "gt" | "lt" => {
            let port = tokens.get(1)?;
            Some((format!("{op} {port}"), 2))
        }
        "range" => {
            let (low, high) = (tokens.get(1)?, tokens.get(2)?);
            Some((format!("{op} {low} {high}"), 3))
        }
        _ => None,
    }
}

/// `Vlanif10`, `Vlanif 10` and `vlanif10` become `Vlan10`; other names are returned trimmed.
pub(crate) fn canonical_vlan_interface(name: &str) -> String {
    let trimmed = name.trim();
    let fields: Vec<&str> = trimmed.split_whitespace().collect();
    let id = match fields.as_slice() {
        [kind, id] if kind.eq_ignore_ascii_case("vlanif") => Some(*id),
        [single] if single.len() > 6 => single
            .get(..6)
            .filter(|kind| kind.eq_ignore_ascii_case("vlanif"))
            .and_then(|_| single.get(6..)),
        _ => None,
    };
    match id {
        Some(id) => format!("Vlan{id}"),
        None => trimmed.to_string(),
    }
}
