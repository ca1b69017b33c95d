use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::default_true;

/// How a tax relief or exemption is computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormulaType {
    /// Percentage of a base (`based_on` is `"gross_income"` or a component
    /// expression such as `"B+H+T"`).
    Percentage,
    /// Flat annual amount.
    #[default]
    Fixed,
    /// Percentage of a base plus a flat amount (e.g. the consolidated
    /// relief allowance).
    PercentagePlusFixed,
}

impl FormulaType {
    /// Codes accepted by the editable surface's select input.
    pub const CODES: [&'static str; 3] = ["percentage", "fixed", "percentage_plus_fixed"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::Fixed => "fixed",
            Self::PercentagePlusFixed => "percentage_plus_fixed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "percentage" => Some(Self::Percentage),
            "fixed" => Some(Self::Fixed),
            "percentage_plus_fixed" => Some(Self::PercentagePlusFixed),
            _ => None,
        }
    }

    /// Whether the percentage field group belongs in the canonical form.
    pub fn uses_percentage(&self) -> bool {
        !matches!(self, Self::Fixed)
    }

    /// Whether the fixed-amount field group belongs in the canonical form.
    pub fn uses_fixed(&self) -> bool {
        !matches!(self, Self::Percentage)
    }
}

/// One relief/exemption definition as it appears in the canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relief {
    #[serde(default)]
    pub name: String,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(default)]
    pub formula_type: FormulaType,

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
    fn percentage_plus_fixed_uses_both_groups() {
        let formula = FormulaType::PercentagePlusFixed;

        assert!(formula.uses_percentage());
        assert!(formula.uses_fixed());
    }

    #[test]
    fn fixed_uses_only_the_fixed_group() {
        assert!(!FormulaType::Fixed.uses_percentage());
        assert!(FormulaType::Fixed.uses_fixed());
    }

    #[test]
    fn reliefs_are_active_by_default() {
        let relief: Relief = serde_json::from_str(r#"{"name": "CRA"}"#).unwrap();

        assert!(relief.is_active);
    }

    #[test]
    fn formula_type_codes_round_trip() {
        for code in FormulaType::CODES {
            assert_eq!(FormulaType::parse(code).map(|t| t.as_str()), Some(code));
        }
    }
}
