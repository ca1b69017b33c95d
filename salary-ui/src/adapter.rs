//! Projection of store state onto an editable (or locked) surface.
//!
//! The adapter holds no state of its own: views are rebuilt from the store
//! on demand, and edits flow back through [`apply_edit`] into the draft the
//! store owns. In locked mode every field is disabled and the add/remove
//! affordances are absent entirely — not merely disabled — so the surface
//! cannot imply that data loss is possible.

use rust_decimal::Decimal;
use tracing::warn;

use salary_core::coerce;
use salary_core::draft::{DraftRecord, LinkedToChoice};
use salary_core::models::{CalculationType, DisplayRule, FormulaType, Section};
use salary_core::store::{Entry, RecordId};

/// How a section is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// All fields mutable, add and remove affordances visible.
    Editable,
    /// Everything disabled; add and remove affordances hidden.
    Locked,
}

/// Field identifiers shared across all sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKey {
    Name,
    Code,
    Percentage,
    BasedOn,
    FixedAmount,
    IsActive,
    AnnualOnly,
    CalculationType,
    FormulaType,
    Limit,
    Rate,
    DisplayRule,
    Order,
    LinkedTo,
}

/// Widget kind for a rendered field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Checkbox,
    Select(&'static [&'static str]),
}

/// Current value of a field on the surface, and the shape an edit comes
/// back in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

/// One renderable field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub key: FieldKey,
    pub label: &'static str,
    pub kind: FieldKind,
    pub value: FieldValue,
    pub enabled: bool,
}

/// One renderable record row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: RecordId,
    pub fields: Vec<FieldView>,
    /// Whether a remove affordance is rendered at all.
    pub removable: bool,
    /// Illustrative monetary amount for percentage-based rows.
    pub preview: Option<Decimal>,
}

/// One renderable section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    pub section: Section,
    pub mode: ViewMode,
    pub rows: Vec<RowView>,
    /// Whether an add affordance is rendered at all.
    pub can_add: bool,
}

/// Rounds like the payroll side displays money.
fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// `base × percentage / 100`, when the draft holds a parseable percentage.
/// A percentage too large to scale is treated like an unparseable one.
fn preview_amount(base: Decimal, percentage: &str) -> Option<Decimal> {
    let pct = coerce::decimal_field(percentage)?;
    let amount = base
        .checked_mul(pct)
        .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED));
    if amount.is_none() {
        warn!(%pct, "percentage overflows the preview amount, omitting");
    }
    amount.map(round_half_up)
}

fn text(key: FieldKey, label: &'static str, value: &str, enabled: bool) -> FieldView {
    FieldView {
        key,
        label,
        kind: FieldKind::Text,
        value: FieldValue::Text(value.to_string()),
        enabled,
    }
}

fn number(key: FieldKey, label: &'static str, value: &str, enabled: bool) -> FieldView {
    FieldView {
        key,
        label,
        kind: FieldKind::Number,
        value: FieldValue::Text(value.to_string()),
        enabled,
    }
}

fn checkbox(key: FieldKey, label: &'static str, value: bool, enabled: bool) -> FieldView {
    FieldView {
        key,
        label,
        kind: FieldKind::Checkbox,
        value: FieldValue::Flag(value),
        enabled,
    }
}

fn select(
    key: FieldKey,
    label: &'static str,
    options: &'static [&'static str],
    value: &str,
    enabled: bool,
) -> FieldView {
    FieldView {
        key,
        label,
        kind: FieldKind::Select(options),
        value: FieldValue::Text(value.to_string()),
        enabled,
    }
}

/// Renders one record. Only the field subgroup selected by the current
/// calculation/formula type is rendered; values in the hidden subgroup stay
/// in the draft untouched.
fn row_view(entry: &Entry, mode: ViewMode, preview_base: Decimal) -> RowView {
    let enabled = mode == ViewMode::Editable;
    let mut preview = None;
    let fields = match &entry.record {
        DraftRecord::BasicComponent(d) => {
            preview = preview_amount(preview_base, &d.percentage);
            vec![
                text(FieldKey::Name, "Name", &d.name, enabled),
                text(FieldKey::Code, "Code", &d.code, enabled),
                number(FieldKey::Percentage, "Percentage", &d.percentage, enabled),
            ]
        }
        DraftRecord::Allowance(d) => {
            let mut fields = vec![
                text(FieldKey::Name, "Name", &d.name, enabled),
                checkbox(FieldKey::IsActive, "Active", d.is_active, enabled),
                checkbox(FieldKey::AnnualOnly, "Annual only", d.annual_only, enabled),
                select(
                    FieldKey::CalculationType,
                    "Calculation",
                    &CalculationType::CODES,
                    d.calculation_type.as_str(),
                    enabled,
                ),
            ];
            match d.calculation_type {
                CalculationType::Percentage => {
                    preview = preview_amount(preview_base, &d.percentage);
                    fields.push(number(FieldKey::Percentage, "Percentage", &d.percentage, enabled));
                    fields.push(text(FieldKey::BasedOn, "Based on", &d.based_on, enabled));
                }
                CalculationType::Fixed => {
                    fields.push(number(FieldKey::FixedAmount, "Amount", &d.fixed_amount, enabled));
                }
            }
            fields
        }
        DraftRecord::Relief(d) => {
            let mut fields = vec![
                text(FieldKey::Name, "Name", &d.name, enabled),
                checkbox(FieldKey::IsActive, "Active", d.is_active, enabled),
                select(
                    FieldKey::FormulaType,
                    "Formula",
                    &FormulaType::CODES,
                    d.formula_type.as_str(),
                    enabled,
                ),
            ];
            if d.formula_type.uses_percentage() {
                preview = preview_amount(preview_base, &d.percentage);
                fields.push(number(FieldKey::Percentage, "Percentage", &d.percentage, enabled));
                fields.push(text(FieldKey::BasedOn, "Based on", &d.based_on, enabled));
            }
            if d.formula_type.uses_fixed() {
                fields.push(number(FieldKey::FixedAmount, "Amount", &d.fixed_amount, enabled));
            }
            fields
        }
        DraftRecord::TaxBracket(d) => vec![
            number(FieldKey::Limit, "Up to", &d.limit, enabled),
            number(FieldKey::Rate, "Rate", &d.rate, enabled),
        ],
        DraftRecord::StatutoryDeduction(d) => {
            preview = preview_amount(preview_base, &d.percentage);
            vec![
                text(FieldKey::Name, "Name", &d.name, enabled),
                checkbox(FieldKey::IsActive, "Active", d.is_active, enabled),
                number(FieldKey::Percentage, "Percentage", &d.percentage, enabled),
                text(FieldKey::BasedOn, "Based on", &d.based_on, enabled),
            ]
        }
        DraftRecord::OtherDeduction(d) => vec![
            text(FieldKey::Name, "Name", &d.name, enabled),
            select(
                FieldKey::DisplayRule,
                "Display",
                &DisplayRule::CODES,
                d.display_rule.as_str(),
                enabled,
            ),
            number(FieldKey::Order, "Order", &d.order, enabled),
            select(
                FieldKey::LinkedTo,
                "Linked to",
                &LinkedToChoice::CODES,
                d.linked_to.as_str(),
                enabled,
            ),
        ],
        DraftRecord::IncomeItem(d) => vec![
            text(FieldKey::Name, "Name", &d.name, enabled),
            select(
                FieldKey::DisplayRule,
                "Display",
                &DisplayRule::CODES,
                d.display_rule.as_str(),
                enabled,
            ),
            number(FieldKey::Order, "Order", &d.order, enabled),
        ],
    };
    RowView {
        id: entry.id,
        fields,
        removable: enabled,
        preview,
    }
}

/// Projects one section of the store onto the surface.
pub fn section_view(
    section: Section,
    entries: &[Entry],
    mode: ViewMode,
    preview_base: Decimal,
) -> SectionView {
    SectionView {
        section,
        mode,
        rows: entries
            .iter()
            .map(|entry| row_view(entry, mode, preview_base))
            .collect(),
        can_add: mode == ViewMode::Editable,
    }
}

/// Applies a surface edit back into the draft.
///
/// Returns `false` without touching the draft when the field does not apply
/// to the record, the value has the wrong shape, or a select value is not a
/// recognized code; all are logged. Switching a calculation/formula type
/// only changes which subgroup is rendered — the hidden subgroup's values
/// stay in the draft.
pub fn apply_edit(record: &mut DraftRecord, key: FieldKey, value: &FieldValue) -> bool {
    use FieldKey as K;
    use FieldValue as V;

    match (&mut *record, key, value) {
        (DraftRecord::BasicComponent(d), K::Name, V::Text(v)) => d.name = v.clone(),
        (DraftRecord::BasicComponent(d), K::Code, V::Text(v)) => d.code = v.clone(),
        (DraftRecord::BasicComponent(d), K::Percentage, V::Text(v)) => d.percentage = v.clone(),

        (DraftRecord::Allowance(d), K::Name, V::Text(v)) => d.name = v.clone(),
        (DraftRecord::Allowance(d), K::IsActive, V::Flag(v)) => d.is_active = *v,
        (DraftRecord::Allowance(d), K::AnnualOnly, V::Flag(v)) => d.annual_only = *v,
        (DraftRecord::Allowance(d), K::CalculationType, V::Text(v)) => {
            match CalculationType::parse(v) {
                Some(calculation_type) => d.calculation_type = calculation_type,
                None => return reject(key, v),
            }
        }
        (DraftRecord::Allowance(d), K::Percentage, V::Text(v)) => d.percentage = v.clone(),
        (DraftRecord::Allowance(d), K::BasedOn, V::Text(v)) => d.based_on = v.clone(),
        (DraftRecord::Allowance(d), K::FixedAmount, V::Text(v)) => d.fixed_amount = v.clone(),

        (DraftRecord::Relief(d), K::Name, V::Text(v)) => d.name = v.clone(),
        (DraftRecord::Relief(d), K::IsActive, V::Flag(v)) => d.is_active = *v,
        (DraftRecord::Relief(d), K::FormulaType, V::Text(v)) => match FormulaType::parse(v) {
            Some(formula_type) => d.formula_type = formula_type,
            None => return reject(key, v),
        },
        (DraftRecord::Relief(d), K::Percentage, V::Text(v)) => d.percentage = v.clone(),
        (DraftRecord::Relief(d), K::BasedOn, V::Text(v)) => d.based_on = v.clone(),
        (DraftRecord::Relief(d), K::FixedAmount, V::Text(v)) => d.fixed_amount = v.clone(),

        (DraftRecord::TaxBracket(d), K::Limit, V::Text(v)) => d.limit = v.clone(),
        (DraftRecord::TaxBracket(d), K::Rate, V::Text(v)) => d.rate = v.clone(),

        (DraftRecord::StatutoryDeduction(d), K::Name, V::Text(v)) => d.name = v.clone(),
        (DraftRecord::StatutoryDeduction(d), K::IsActive, V::Flag(v)) => d.is_active = *v,
        (DraftRecord::StatutoryDeduction(d), K::Percentage, V::Text(v)) => d.percentage = v.clone(),
        (DraftRecord::StatutoryDeduction(d), K::BasedOn, V::Text(v)) => d.based_on = v.clone(),

        (DraftRecord::OtherDeduction(d), K::Name, V::Text(v)) => d.name = v.clone(),
        (DraftRecord::OtherDeduction(d), K::DisplayRule, V::Text(v)) => {
            match DisplayRule::parse(v) {
                Some(display_rule) => d.display_rule = display_rule,
                None => return reject(key, v),
            }
        }
        (DraftRecord::OtherDeduction(d), K::Order, V::Text(v)) => d.order = v.clone(),
        (DraftRecord::OtherDeduction(d), K::LinkedTo, V::Text(v)) => {
            match LinkedToChoice::parse(v) {
                Some(linked_to) => d.linked_to = linked_to,
                None => return reject(key, v),
            }
        }

        (DraftRecord::IncomeItem(d), K::Name, V::Text(v)) => d.name = v.clone(),
        (DraftRecord::IncomeItem(d), K::DisplayRule, V::Text(v)) => match DisplayRule::parse(v) {
            Some(display_rule) => d.display_rule = display_rule,
            None => return reject(key, v),
        },
        (DraftRecord::IncomeItem(d), K::Order, V::Text(v)) => d.order = v.clone(),

        (record, key, _) => {
            warn!(
                section = record.section().as_str(),
                ?key,
                "edit does not apply to this record"
            );
            return false;
        }
    }
    true
}

fn reject(key: FieldKey, value: &str) -> bool {
    warn!(?key, value, "unrecognized select code; edit ignored");
    false
}
