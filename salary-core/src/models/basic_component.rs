use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One basic pay component as it appears in the canonical form.
///
/// The canonical form for this section is a JSON object keyed by the
/// normalized component name (see [`crate::serialize::normalized_key`]);
/// `name` is repeated inside the value so consumers can display the original
/// spelling, and `code` is the short code referenced by `based_on`
/// expressions elsewhere in the configuration (e.g. `"B+H"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicComponent {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub code: String,

    /// Share of the monthly salary, in percent. Absent when the operator has
    /// not entered a parseable number yet.
    #[serde(
        default,
        with = "rust_decimal::serde::arbitrary_precision_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub percentage: Option<Decimal>,
}
