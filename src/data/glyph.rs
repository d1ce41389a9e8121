//! Glyph de-obfuscation of the bond list payload.
//!
//! The endpoint replaces digits and some characters with opaque codes (web-font
//! glyph references such as `&#xE728;`) and ships the code → value table in the
//! same document under `font.FontMapping`. The payload also isn't valid JSON as
//! received: the two top-level keys listed in [`BARE_KEYS`] are unquoted.
//!
//! Decoding is two-phase:
//! 1. quote the bare keys and parse the outer document to read the mapping table
//! 2. substitute every code across the full text, then parse strictly and read `data`

use serde_json::Value;
use tracing::debug;

use crate::domain::{BondRecord, value_text};
use crate::error::AppError;

/// Top-level keys the server emits without quotes.
pub const BARE_KEYS: [&str; 2] = ["font", "data"];

/// One entry of the glyph table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphEntry {
    pub code: String,
    pub value: String,
}

/// Decoded records.
#[derive(Debug, Clone)]
pub struct DecodedSnapshot {
    pub bonds: Vec<BondRecord>,
}

impl DecodedSnapshot {
    pub fn total(&self) -> usize {
        self.bonds.len()
    }
}

/// Decode a raw response body into bond records.
pub fn decode(raw: &str) -> Result<DecodedSnapshot, AppError> {
    let quoted = quote_bare_keys(raw);
    let outer: Value = serde_json::from_str(&quoted)
        .map_err(|e| AppError::data(format!("Failed to parse bond list response: {e}")))?;
    let mapping = parse_mapping(&outer)?;
    debug!(entries = mapping.len(), "glyph mapping loaded");

    let text = substitute(&quoted, &mapping);
    let doc: Value = serde_json::from_str(&text)
        .map_err(|e| AppError::data(format!("Failed to parse decoded bond list: {e}")))?;
    let bonds = parse_bonds(doc)?;

    Ok(DecodedSnapshot { bonds })
}

/// Quote unquoted occurrences of [`BARE_KEYS`] used as object keys.
///
/// Text inside JSON strings is never touched and already-quoted keys stay as they
/// are, so applying this twice is the same as applying it once.
pub fn quote_bare_keys(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = String::with_capacity(raw.len() + 2 * BARE_KEYS.len());
    let mut copied = 0;
    let mut in_string = false;
    let mut escaped = false;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            i += 1;
            continue;
        }

        if b == b'"' {
            in_string = true;
            i += 1;
        } else if b.is_ascii_alphabetic() || b == b'_' {
            let start = i;
            while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                i += 1;
            }
            let word = &raw[start..i];
            if BARE_KEYS.contains(&word) && next_non_space(bytes, i) == Some(b':') {
                out.push_str(&raw[copied..start]);
                out.push('"');
                out.push_str(word);
                out.push('"');
                copied = i;
            }
        } else {
            i += 1;
        }
    }

    out.push_str(&raw[copied..]);
    out
}

fn next_non_space(bytes: &[u8], from: usize) -> Option<u8> {
    bytes[from..].iter().copied().find(|b| !b.is_ascii_whitespace())
}

/// Read `font.FontMapping` from the outer document.
pub fn parse_mapping(doc: &Value) -> Result<Vec<GlyphEntry>, AppError> {
    let entries = doc
        .get("font")
        .and_then(|font| font.get("FontMapping"))
        .and_then(Value::as_array)
        .ok_or_else(|| AppError::data("Response has no font.FontMapping table."))?;

    let mut mapping = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.iter().enumerate() {
        let code = entry
            .get("code")
            .and_then(Value::as_str)
            .ok_or_else(|| AppError::data(format!("Glyph mapping entry {idx} has no code.")))?;
        if code.is_empty() {
            return Err(AppError::data(format!("Glyph mapping entry {idx} has an empty code.")));
        }
        let value = entry
            .get("value")
            .map(value_text)
            .ok_or_else(|| AppError::data(format!("Glyph mapping entry {idx} has no value.")))?;
        mapping.push(GlyphEntry {
            code: code.to_string(),
            value,
        });
    }
    Ok(mapping)
}

/// Replace every occurrence of every code. Codes are unique and don't overlap,
/// so entry order doesn't matter.
pub fn substitute(text: &str, mapping: &[GlyphEntry]) -> String {
    mapping
        .iter()
        .fold(text.to_string(), |acc, entry| acc.replace(&entry.code, &entry.value))
}

fn parse_bonds(doc: Value) -> Result<Vec<BondRecord>, AppError> {
    let Value::Object(mut root) = doc else {
        return Err(AppError::data("Decoded response is not a JSON object."));
    };
    let Some(Value::Array(items)) = root.remove("data") else {
        return Err(AppError::data("Decoded response has no data list."));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| match item {
            Value::Object(map) => Ok(BondRecord::from_map(map)),
            _ => Err(AppError::data(format!("Bond entry {idx} is not an object."))),
        })
        .collect()
}
