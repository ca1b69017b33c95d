//! Centralized coercion of raw editor input.
//!
//! The editable surface hands back whatever the operator typed. These
//! helpers apply the one coercion policy used everywhere: trim, tolerate
//! thousands separators, and treat unparseable numeric input as absent
//! (logged, never surfaced at edit time). `order` is the one field with a
//! default instead of absence.

use rust_decimal::Decimal;
use tracing::warn;

/// Normalizes input for numeric parsing: trims whitespace and removes
/// commas (thousands separator).
fn normalize(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses a user-entered decimal field.
///
/// Returns `None` for empty or whitespace-only input, or when parsing fails
/// (logs a warning on parse failure).
pub fn decimal_field(s: &str) -> Option<Decimal> {
    let normalized = normalize(s);
    if normalized.is_empty() {
        return None;
    }
    normalized.parse().map_or_else(
        |e| {
            warn!(input = %s, "invalid decimal field: {}", e);
            None
        },
        Some,
    )
}

/// Parses a display-order field. Blank or unparseable input yields 1.
pub fn order_field(s: &str) -> i64 {
    let normalized = normalize(s);
    if normalized.is_empty() {
        return 1;
    }
    normalized.parse().unwrap_or_else(|e| {
        warn!(input = %s, "invalid order field: {}", e);
        1
    })
}

/// A name-like identifying field: trimmed, `None` when blank.
pub fn text_field(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
