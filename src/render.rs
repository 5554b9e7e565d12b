//! Pure renderers, one per value kind.
//!
//! Everything here is a plain function from decoded bytes (or an already
//! decoded integer) to display text, with no provider access and no IO, so
//! the composer stays the only place that talks to the outside world.
//! Grouping and sorting are deliberately locale-free: the output contract
//! uses a fixed `,` separator and ordinal byte comparison regardless of the
//! host locale.

use crate::descriptor::FlagSpec;
use std::borrow::Cow;

/// Decode a raw text reply: drop the NUL terminator (and anything after it),
/// then interpret as UTF-8, replacing invalid sequences.
pub fn decode_text(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

/// Tokenize on whitespace and sort ascending by byte comparison.
///
/// An input with no tokens yields an empty vector; the caller renders that as
/// an empty value, not an error.
pub fn sorted_tokens(raw: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = raw.split_whitespace().collect();
    tokens.sort_unstable();
    tokens
}

/// Decode an unsigned integer from up to eight little-endian bytes.
/// Shorter replies zero-extend.
pub fn scalar_from_bytes(bytes: &[u8]) -> u64 {
    let mut word = [0u8; 8];
    let len = bytes.len().min(8);
    word[..len].copy_from_slice(&bytes[..len]);
    u64::from_le_bytes(word)
}

/// Decode the three-element work-item vector from consecutive 8-byte lanes.
pub fn triple_from_bytes(bytes: &[u8]) -> [u64; 3] {
    let mut lanes = [0u64; 3];
    for (idx, lane) in lanes.iter_mut().enumerate() {
        let start = idx * 8;
        if start < bytes.len() {
            *lane = scalar_from_bytes(&bytes[start..bytes.len().min(start + 8)]);
        }
    }
    lanes
}

/// Render an unsigned integer with a `,` every three digits from the right.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let lead = digits.len() % 3;
    for (idx, ch) in digits.chars().enumerate() {
        if idx != 0 && idx % 3 == lead % 3 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Render as `0x` plus lowercase hex, no padding beyond the value's width.
pub fn hex(value: u64) -> String {
    format!("0x{value:x}")
}

/// Decompose a bitmask against an ordered flag list.
///
/// Each flag is tested and cleared in declaration order; matched labels are
/// space separated. Bits left over after every known flag render as
/// `Unknown (0x…)`. Zero with no matches renders empty.
pub fn flag_bits(value: u64, flags: &[FlagSpec]) -> String {
    let mut remaining = value;
    let mut parts: Vec<Cow<'_, str>> = Vec::new();
    for flag in flags {
        if remaining & flag.bit != 0 {
            remaining &= !flag.bit;
            parts.push(Cow::Borrowed(flag.label));
        }
    }
    if remaining != 0 {
        parts.push(Cow::Owned(format!("Unknown (0x{remaining:x})")));
    }
    parts.join(" ")
}

/// Bounds-checked enum lookup: `label (value)` in range, `??? (value)`
/// otherwise. Never indexes past the label table.
pub fn bounded_enum(value: u64, labels: &[&str]) -> String {
    let label = usize::try_from(value)
        .ok()
        .and_then(|idx| labels.get(idx).copied())
        .unwrap_or("???");
    format!("{label} ({value})")
}

/// Render the fixed-size vector comma separated in declaration order.
pub fn triple(lanes: [u64; 3]) -> String {
    format!("{}, {}, {}", lanes[0], lanes[1], lanes[2])
}

/// Resolve a sparse code table, falling back to `UNKNOWN (0x…)` so
/// out-of-table codes from newer runtimes still render.
pub fn code_name(code: u32, table: &[(u32, &'static str)]) -> Cow<'static, str> {
    for (known, name) in table {
        if *known == code {
            return Cow::Borrowed(*name);
        }
    }
    Cow::Owned(format!("UNKNOWN (0x{code:x})"))
}
