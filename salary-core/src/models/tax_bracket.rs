use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One progressive tax bracket as it appears in the canonical form.
///
/// `limit` is the width of the band (the amount of annual taxable income
/// charged at `rate`); the open-ended top bracket carries `limit: null`.
/// A configuration is only meaningful with at most one open-ended bracket,
/// in last position; the editor does not enforce this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub limit: Option<Decimal>,

    /// Marginal rate in percent. A bracket without a parseable rate is
    /// excluded from the canonical form.
    #[serde(
        default,
        with = "rust_decimal::serde::arbitrary_precision_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub rate: Option<Decimal>,
}
