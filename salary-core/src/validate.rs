//! Cross-record validation and the submission gate.
//!
//! Per-field requirements are already handled by exclusion during
//! serialization; the one blocking cross-record invariant is the basic
//! components percentage total. It is recomputed opportunistically after
//! every serialization and re-derived once more at submit time, so the gate
//! never evaluates stale data.

use rust_decimal::Decimal;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

/// Absolute tolerance on the percentage total.
fn tolerance() -> Decimal {
    Decimal::new(1, 2) // 0.01
}

/// Result of the basic-components percentage check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionTotal {
    /// Sum of the `percentage` fields of all records included in the
    /// canonical form.
    pub total: Decimal,
    /// Whether the total is 100 within tolerance.
    pub passes: bool,
}

impl SectionTotal {
    /// The total of an empty section: zero, failing.
    pub fn empty() -> Self {
        Self {
            total: Decimal::ZERO,
            passes: false,
        }
    }
}

/// Sums the `percentage` fields of an already-serialized basic-components
/// form and checks the 100% requirement within 0.01 absolute tolerance.
///
/// Records excluded from the canonical form do not count; an included record
/// with an omitted percentage counts as zero. A percentage too large to add
/// into the running total is skipped, like an unparseable one would be.
pub fn basic_components_total(canonical: &Map<String, Value>) -> SectionTotal {
    let mut total = Decimal::ZERO;
    for component in canonical.values() {
        if let Some(percentage) = component.get("percentage").and_then(decimal_of) {
            match total.checked_add(percentage) {
                Some(sum) => total = sum,
                None => warn!(%percentage, "percentage overflows the running total, skipping"),
            }
        }
    }
    let passes = (total - Decimal::ONE_HUNDRED).abs() <= tolerance();
    SectionTotal { total, passes }
}

fn decimal_of(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => number.to_string().parse().ok(),
        _ => None,
    }
}

/// A submission-blocking invariant violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitViolation {
    /// The basic component percentages do not add up to 100.
    #[error("Basic salary components must total 100%. They currently total {0:.2}%.")]
    BasicComponentsTotal(Decimal),
}

/// Outcome of the submission gate. Blocking never discards entered data;
/// the message is re-presented until the operator corrects the total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitDecision {
    pub allowed: bool,
    pub violation: Option<SubmitViolation>,
}

impl SubmitDecision {
    /// User-facing message citing the failing invariant, when blocked.
    pub fn message(&self) -> Option<String> {
        self.violation.as_ref().map(|v| v.to_string())
    }
}

/// Gates submission on the freshly re-derived percentage total.
pub fn submission_gate(basic_total: SectionTotal) -> SubmitDecision {
    if basic_total.passes {
        SubmitDecision {
            allowed: true,
            violation: None,
        }
    } else {
        SubmitDecision {
            allowed: false,
            violation: Some(SubmitViolation::BasicComponentsTotal(basic_total.total)),
        }
    }
}
