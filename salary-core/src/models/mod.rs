mod allowance;
mod basic_component;
mod income_item;
mod other_deduction;
mod relief;
mod section;
mod statutory_deduction;
mod tax_bracket;

pub use allowance::{Allowance, CalculationType};
pub use basic_component::BasicComponent;
pub use income_item::IncomeItem;
pub use other_deduction::{DisplayRule, LinkedTo, OtherDeduction};
pub use relief::{FormulaType, Relief};
pub use section::Section;
pub use statutory_deduction::StatutoryDeduction;
pub use tax_bracket::TaxBracket;

/// Serde default for sections whose records are active unless switched off.
pub(crate) fn default_true() -> bool {
    true
}
