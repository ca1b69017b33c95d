use serde::{Deserialize, Serialize};

/// When a configured line appears on a rendered payslip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayRule {
    /// Shown only when an amount was entered or auto-filled for the period.
    #[default]
    ShowIfFilled,
    /// Always shown, even at zero.
    AlwaysShow,
}

impl DisplayRule {
    /// Codes accepted by the editable surface's select input.
    pub const CODES: [&'static str; 2] = ["show_if_filled", "always_show"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ShowIfFilled => "show_if_filled",
            Self::AlwaysShow => "always_show",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "show_if_filled" => Some(Self::ShowIfFilled),
            "always_show" => Some(Self::AlwaysShow),
            _ => None,
        }
    }
}

/// Record source a deduction line auto-fills from.
///
/// Manually filled deductions carry no `linked_to` at all, so there is no
/// `Manual` variant here; the draft side models that choice explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkedTo {
    StaffLoan,
    SalaryAdvance,
}

impl LinkedTo {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StaffLoan => "staff_loan",
            Self::SalaryAdvance => "salary_advance",
        }
    }
}

/// One discretionary deduction line as it appears in the canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherDeduction {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub display_rule: DisplayRule,

    /// Position of the line on the payslip; defaults to 1.
    #[serde(default = "default_order")]
    pub order: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_to: Option<LinkedTo>,
}

pub(crate) fn default_order() -> i64 {
    1
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn manual_deduction_serializes_without_linked_to() {
        let deduction = OtherDeduction {
            name: "Cooperative".to_string(),
            display_rule: DisplayRule::ShowIfFilled,
            order: 2,
            linked_to: None,
        };

        let json = serde_json::to_string(&deduction).unwrap();

        assert!(!json.contains("linked_to"));
    }

    #[test]
    fn linked_to_uses_snake_case_codes() {
        let deduction: OtherDeduction =
            serde_json::from_str(r#"{"name": "Loan", "linked_to": "staff_loan"}"#).unwrap();

        assert_eq!(deduction.linked_to, Some(LinkedTo::StaffLoan));
        assert_eq!(deduction.order, 1);
    }
}
