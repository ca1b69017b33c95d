use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How an allowance amount is computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationType {
    /// Percentage of a base (`based_on` names the components, e.g. `"B+H"`,
    /// or `"TOTAL"` for the whole monthly salary).
    Percentage,
    /// Flat monthly amount.
    #[default]
    Fixed,
}

impl CalculationType {
    /// Codes accepted by the editable surface's select input.
    pub const CODES: [&'static str; 2] = ["percentage", "fixed"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::Fixed => "fixed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "percentage" => Some(Self::Percentage),
            "fixed" => Some(Self::Fixed),
            _ => None,
        }
    }
}

/// One allowance definition as it appears in the canonical form.
///
/// Only the field group selected by `calculation_type` is populated:
/// `percentage`/`based_on` for percentage allowances, `fixed_amount` for
/// fixed ones. Values entered under the other group live only in the draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allowance {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub is_active: bool,

    /// Paid once per year instead of monthly.
    #[serde(default)]
    pub annual_only: bool,

    #[serde(default)]
    pub calculation_type: CalculationType,

    #[serde(
        default,
        with = "rust_decimal::serde::arbitrary_precision_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub percentage: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub based_on: Option<String>,

    #[serde(
        default,
        with = "rust_decimal::serde::arbitrary_precision_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub fixed_amount: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn calculation_type_codes_round_trip() {
        for code in CalculationType::CODES {
            assert_eq!(CalculationType::parse(code).map(|t| t.as_str()), Some(code));
        }
    }

    #[test]
    fn calculation_type_defaults_to_fixed_when_absent() {
        let allowance: Allowance = serde_json::from_str(r#"{"name": "Leave bonus"}"#).unwrap();

        assert_eq!(allowance.calculation_type, CalculationType::Fixed);
        assert!(!allowance.is_active);
    }
}
