use serde::{Deserialize, Serialize};

use super::DisplayRule;
use super::other_deduction::default_order;

/// One extra income line (bonus, arrears, ...) as it appears in the
/// canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeItem {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub display_rule: DisplayRule,

    /// Position of the line on the payslip; defaults to 1.
    #[serde(default = "default_order")]
    pub order: i64,
}
