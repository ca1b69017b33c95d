//! Editable draft records.
//!
//! The store keeps what the operator typed, not what will be submitted:
//! numeric fields stay raw strings until serialization, selects hold typed
//! enums, and values belonging to the field group hidden by the current
//! calculation/formula type are retained so toggling the type back restores
//! them.

use rust_decimal::Decimal;

use crate::models::{
    Allowance, BasicComponent, CalculationType, DisplayRule, FormulaType, IncomeItem, LinkedTo,
    OtherDeduction, Relief, Section, StatutoryDeduction, TaxBracket,
};

fn decimal_input(value: Option<Decimal>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasicComponentDraft {
    pub name: String,
    pub code: String,
    pub percentage: String,
}

impl BasicComponentDraft {
    pub fn from_canonical(record: &BasicComponent) -> Self {
        Self {
            name: record.name.clone(),
            code: record.code.clone(),
            percentage: decimal_input(record.percentage),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowanceDraft {
    pub name: String,
    pub is_active: bool,
    pub annual_only: bool,
    pub calculation_type: CalculationType,
    pub percentage: String,
    pub based_on: String,
    pub fixed_amount: String,
}

impl Default for AllowanceDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            is_active: true,
            annual_only: false,
            calculation_type: CalculationType::Percentage,
            percentage: String::new(),
            based_on: "TOTAL".to_string(),
            fixed_amount: String::new(),
        }
    }
}

impl AllowanceDraft {
    pub fn from_canonical(record: &Allowance) -> Self {
        Self {
            name: record.name.clone(),
            is_active: record.is_active,
            annual_only: record.annual_only,
            calculation_type: record.calculation_type,
            percentage: decimal_input(record.percentage),
            based_on: record.based_on.clone().unwrap_or_default(),
            fixed_amount: decimal_input(record.fixed_amount),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReliefDraft {
    pub name: String,
    pub is_active: bool,
    pub formula_type: FormulaType,
    pub percentage: String,
    pub based_on: String,
    pub fixed_amount: String,
}

impl Default for ReliefDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            is_active: true,
            formula_type: FormulaType::Percentage,
            percentage: String::new(),
            based_on: "gross_income".to_string(),
            fixed_amount: String::new(),
        }
    }
}

impl ReliefDraft {
    pub fn from_canonical(record: &Relief) -> Self {
        Self {
            name: record.name.clone(),
            is_active: record.is_active,
            formula_type: record.formula_type,
            percentage: decimal_input(record.percentage),
            based_on: record.based_on.clone().unwrap_or_default(),
            fixed_amount: decimal_input(record.fixed_amount),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxBracketDraft {
    /// Band width; blank means the open-ended top bracket.
    pub limit: String,
    pub rate: String,
}

impl TaxBracketDraft {
    pub fn from_canonical(record: &TaxBracket) -> Self {
        Self {
            limit: decimal_input(record.limit),
            rate: decimal_input(record.rate),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatutoryDeductionDraft {
    pub name: String,
    pub is_active: bool,
    pub percentage: String,
    pub based_on: String,
}

impl Default for StatutoryDeductionDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            is_active: true,
            percentage: String::new(),
            based_on: "B".to_string(),
        }
    }
}

impl StatutoryDeductionDraft {
    pub fn from_canonical(record: &StatutoryDeduction) -> Self {
        Self {
            name: record.name.clone(),
            is_active: record.is_active,
            percentage: decimal_input(record.percentage),
            based_on: record.based_on.clone(),
        }
    }
}

/// Draft-side choice for what a deduction line auto-fills from. The canonical
/// form omits `linked_to` entirely for manual lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinkedToChoice {
    #[default]
    Manual,
    StaffLoan,
    SalaryAdvance,
}

impl LinkedToChoice {
    /// Codes accepted by the editable surface's select input.
    pub const CODES: [&'static str; 3] = ["manual", "staff_loan", "salary_advance"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::StaffLoan => "staff_loan",
            Self::SalaryAdvance => "salary_advance",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "manual" => Some(Self::Manual),
            "staff_loan" => Some(Self::StaffLoan),
            "salary_advance" => Some(Self::SalaryAdvance),
            _ => None,
        }
    }

    pub fn linked_to(self) -> Option<LinkedTo> {
        match self {
            Self::Manual => None,
            Self::StaffLoan => Some(LinkedTo::StaffLoan),
            Self::SalaryAdvance => Some(LinkedTo::SalaryAdvance),
        }
    }

    pub fn from_linked_to(linked_to: Option<LinkedTo>) -> Self {
        match linked_to {
            None => Self::Manual,
            Some(LinkedTo::StaffLoan) => Self::StaffLoan,
            Some(LinkedTo::SalaryAdvance) => Self::SalaryAdvance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtherDeductionDraft {
    pub name: String,
    pub display_rule: DisplayRule,
    pub order: String,
    pub linked_to: LinkedToChoice,
}

impl Default for OtherDeductionDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            display_rule: DisplayRule::ShowIfFilled,
            order: "1".to_string(),
            linked_to: LinkedToChoice::Manual,
        }
    }
}

impl OtherDeductionDraft {
    pub fn from_canonical(record: &OtherDeduction) -> Self {
        Self {
            name: record.name.clone(),
            display_rule: record.display_rule,
            order: record.order.to_string(),
            linked_to: LinkedToChoice::from_linked_to(record.linked_to),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomeItemDraft {
    pub name: String,
    pub display_rule: DisplayRule,
    pub order: String,
}

impl Default for IncomeItemDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            display_rule: DisplayRule::ShowIfFilled,
            order: "1".to_string(),
        }
    }
}

impl IncomeItemDraft {
    pub fn from_canonical(record: &IncomeItem) -> Self {
        Self {
            name: record.name.clone(),
            display_rule: record.display_rule,
            order: record.order.to_string(),
        }
    }
}

/// One editable record of any section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftRecord {
    BasicComponent(BasicComponentDraft),
    Allowance(AllowanceDraft),
    Relief(ReliefDraft),
    TaxBracket(TaxBracketDraft),
    StatutoryDeduction(StatutoryDeductionDraft),
    OtherDeduction(OtherDeductionDraft),
    IncomeItem(IncomeItemDraft),
}

impl DraftRecord {
    /// Section this record belongs to.
    pub fn section(&self) -> Section {
        match self {
            Self::BasicComponent(_) => Section::BasicComponents,
            Self::Allowance(_) => Section::Allowances,
            Self::Relief(_) => Section::Reliefs,
            Self::TaxBracket(_) => Section::TaxBrackets,
            Self::StatutoryDeduction(_) => Section::StatutoryDeductions,
            Self::OtherDeduction(_) => Section::OtherDeductions,
            Self::IncomeItem(_) => Section::IncomeItems,
        }
    }
}

impl Section {
    /// The template record a section is seeded with when it loads empty
    /// outside edit mode, and the starting point for every add.
    pub fn template(&self) -> DraftRecord {
        match self {
            Self::BasicComponents => DraftRecord::BasicComponent(BasicComponentDraft::default()),
            Self::Allowances => DraftRecord::Allowance(AllowanceDraft::default()),
            Self::Reliefs => DraftRecord::Relief(ReliefDraft::default()),
            Self::TaxBrackets => DraftRecord::TaxBracket(TaxBracketDraft::default()),
            Self::StatutoryDeductions => {
                DraftRecord::StatutoryDeduction(StatutoryDeductionDraft::default())
            }
            Self::OtherDeductions => DraftRecord::OtherDeduction(OtherDeductionDraft::default()),
            Self::IncomeItems => DraftRecord::IncomeItem(IncomeItemDraft::default()),
        }
    }
}
