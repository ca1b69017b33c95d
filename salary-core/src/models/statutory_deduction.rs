use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::default_true;

/// One statutory deduction (pension, housing fund, ...) as it appears in the
/// canonical form. Both `name` and a parseable `percentage` are required for
/// a draft to be included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutoryDeduction {
    #[serde(default)]
    pub name: String,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(
        default,
        with = "rust_decimal::serde::arbitrary_precision_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub percentage: Option<Decimal>,

    /// Component expression the percentage applies to; defaults to the
    /// basic component (`"B"`).
    #[serde(default = "default_based_on")]
    pub based_on: String,
}

fn default_based_on() -> String {
    "B".to_string()
}
