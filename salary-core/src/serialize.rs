//! Pure derivation of each section's canonical form from draft records.
//!
//! Serialization never mutates the store and never fails the caller: drafts
//! missing their identifying fields are excluded from the output but stay in
//! the store so the operator can finish them, and numeric coercion follows
//! the [`crate::coerce`] policy. Serializing twice without intervening edits
//! yields byte-identical text.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::error;

use crate::coerce;
use crate::draft::{
    AllowanceDraft, BasicComponentDraft, DraftRecord, IncomeItemDraft, OtherDeductionDraft,
    ReliefDraft, StatutoryDeductionDraft, TaxBracketDraft,
};
use crate::models::{
    Allowance, BasicComponent, CalculationType, IncomeItem, OtherDeduction, Relief, Section,
    StatutoryDeduction, TaxBracket,
};
use crate::store::Entry;

/// Derives the canonical key for a basic component: the name lowercased with
/// internal whitespace collapsed to underscores.
///
/// Two differently spelled names can collapse to the same key ("Basic Pay" /
/// "basic  pay"); when that happens the later record overwrites the earlier
/// one in iteration order.
pub fn normalized_key(name: &str) -> String {
    let lowered = name.to_lowercase();
    lowered.split_whitespace().collect::<Vec<_>>().join("_")
}

fn basic_component(draft: &BasicComponentDraft) -> Option<BasicComponent> {
    let name = coerce::text_field(&draft.name)?;
    let code = coerce::text_field(&draft.code)?;
    Some(BasicComponent {
        name,
        code,
        percentage: coerce::decimal_field(&draft.percentage),
    })
}

fn allowance(draft: &AllowanceDraft) -> Option<Allowance> {
    let name = coerce::text_field(&draft.name)?;
    let mut record = Allowance {
        name,
        is_active: draft.is_active,
        annual_only: draft.annual_only,
        calculation_type: draft.calculation_type,
        percentage: None,
        based_on: None,
        fixed_amount: None,
    };
    match draft.calculation_type {
        CalculationType::Percentage => {
            record.percentage = coerce::decimal_field(&draft.percentage);
            record.based_on = coerce::text_field(&draft.based_on);
        }
        CalculationType::Fixed => {
            record.fixed_amount = coerce::decimal_field(&draft.fixed_amount);
        }
    }
    Some(record)
}

fn relief(draft: &ReliefDraft) -> Option<Relief> {
    let name = coerce::text_field(&draft.name)?;
    let mut record = Relief {
        name,
        is_active: draft.is_active,
        formula_type: draft.formula_type,
        percentage: None,
        based_on: None,
        fixed_amount: None,
    };
    if draft.formula_type.uses_percentage() {
        record.percentage = coerce::decimal_field(&draft.percentage);
        record.based_on = coerce::text_field(&draft.based_on);
    }
    if draft.formula_type.uses_fixed() {
        record.fixed_amount = coerce::decimal_field(&draft.fixed_amount);
    }
    Some(record)
}

fn tax_bracket(draft: &TaxBracketDraft) -> Option<TaxBracket> {
    let rate = coerce::decimal_field(&draft.rate)?;
    Some(TaxBracket {
        limit: coerce::decimal_field(&draft.limit),
        rate: Some(rate),
    })
}

fn statutory_deduction(draft: &StatutoryDeductionDraft) -> Option<StatutoryDeduction> {
    let name = coerce::text_field(&draft.name)?;
    let percentage = coerce::decimal_field(&draft.percentage)?;
    Some(StatutoryDeduction {
        name,
        is_active: draft.is_active,
        percentage: Some(percentage),
        based_on: coerce::text_field(&draft.based_on).unwrap_or_else(|| "B".to_string()),
    })
}

fn other_deduction(draft: &OtherDeductionDraft) -> Option<OtherDeduction> {
    let name = coerce::text_field(&draft.name)?;
    Some(OtherDeduction {
        name,
        display_rule: draft.display_rule,
        order: coerce::order_field(&draft.order),
        linked_to: draft.linked_to.linked_to(),
    })
}

fn income_item(draft: &IncomeItemDraft) -> Option<IncomeItem> {
    let name = coerce::text_field(&draft.name)?;
    Some(IncomeItem {
        name,
        display_rule: draft.display_rule,
        order: coerce::order_field(&draft.order),
    })
}

/// Serializes the basic-components section into its keyed canonical form.
pub fn basic_components<'a>(
    drafts: impl IntoIterator<Item = &'a BasicComponentDraft>,
) -> Map<String, Value> {
    let mut out = Map::new();
    for draft in drafts {
        if let Some(record) = basic_component(draft) {
            // Same-key rows overwrite in iteration order.
            out.insert(normalized_key(&record.name), to_value(&record));
        }
    }
    out
}

fn to_value<T: Serialize>(record: &T) -> Value {
    serde_json::to_value(record).unwrap_or_else(|e| {
        error!("canonical serialization failed: {}", e);
        Value::Null
    })
}

fn array_of<'a, D: 'a, T: Serialize>(
    drafts: impl IntoIterator<Item = &'a D>,
    serialize_one: impl Fn(&D) -> Option<T>,
) -> Value {
    Value::Array(
        drafts
            .into_iter()
            .filter_map(|draft| serialize_one(draft).as_ref().map(to_value))
            .collect(),
    )
}

macro_rules! drafts_of {
    ($entries:expr, $variant:ident) => {
        $entries.iter().filter_map(|entry| match &entry.record {
            DraftRecord::$variant(draft) => Some(draft),
            _ => None,
        })
    };
}

/// Derives the canonical JSON value of one section from its stored entries.
pub fn section_value(section: Section, entries: &[Entry]) -> Value {
    match section {
        Section::BasicComponents => {
            Value::Object(basic_components(drafts_of!(entries, BasicComponent)))
        }
        Section::Allowances => array_of(drafts_of!(entries, Allowance), allowance),
        Section::Reliefs => array_of(drafts_of!(entries, Relief), relief),
        Section::TaxBrackets => array_of(drafts_of!(entries, TaxBracket), tax_bracket),
        Section::StatutoryDeductions => {
            array_of(drafts_of!(entries, StatutoryDeduction), statutory_deduction)
        }
        Section::OtherDeductions => array_of(drafts_of!(entries, OtherDeduction), other_deduction),
        Section::IncomeItems => array_of(drafts_of!(entries, IncomeItem), income_item),
    }
}

/// The canonical form as the text written back to the host form field.
pub fn canonical_text(section: Section, entries: &[Entry]) -> String {
    section_value(section, entries).to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;
    use crate::models::{DisplayRule, FormulaType};
    use crate::store::SectionStore;

    fn component(name: &str, code: &str, percentage: &str) -> BasicComponentDraft {
        BasicComponentDraft {
            name: name.to_string(),
            code: code.to_string(),
            percentage: percentage.to_string(),
        }
    }

    // =========================================================================
    // normalized_key tests
    // =========================================================================

    #[test]
    fn normalized_key_lowercases_and_collapses_whitespace() {
        assert_eq!(normalized_key("Basic Pay"), "basic_pay");
        assert_eq!(normalized_key("  Basic   Pay  "), "basic_pay");
        assert_eq!(normalized_key("HOUSING"), "housing");
    }

    // =========================================================================
    // basic components
    // =========================================================================

    #[test]
    fn basic_components_keyed_by_normalized_name() {
        let drafts = [component("Basic Pay", "B", "60"), component("Housing", "H", "40")];

        let map = basic_components(&drafts);

        let keys: Vec<&String> = map.keys().collect();
        assert_eq!(keys, ["basic_pay", "housing"]);
        assert_eq!(
            serde_json::Value::Object(map),
            json!({
                "basic_pay": {"name": "Basic Pay", "code": "B", "percentage": 60},
                "housing": {"name": "Housing", "code": "H", "percentage": 40},
            })
        );
    }

    #[test]
    fn basic_component_without_code_is_excluded() {
        let drafts = [component("Basic", "B", "60"), component("Housing", "  ", "40")];

        let map = basic_components(&drafts);

        assert_eq!(map.len(), 1);
        assert!(map.contains_key("basic"));
    }

    #[test]
    fn basic_component_unparseable_percentage_is_omitted() {
        let drafts = [component("Basic", "B", "sixty")];

        let map = basic_components(&drafts);

        assert_eq!(
            serde_json::Value::Object(map),
            json!({"basic": {"name": "Basic", "code": "B"}})
        );
    }

    #[test]
    fn colliding_keys_overwrite_in_iteration_order() {
        let drafts = [component("Basic  Pay", "B", "60"), component("basic pay", "BP", "40")];

        let map = basic_components(&drafts);

        assert_eq!(map.len(), 1);
        assert_eq!(map["basic_pay"]["code"], json!("BP"));
    }

    // =========================================================================
    // allowances / reliefs subgroup inclusion
    // =========================================================================

    #[test]
    fn percentage_allowance_omits_fixed_amount() {
        let draft = AllowanceDraft {
            name: "Transport".to_string(),
            percentage: "10".to_string(),
            based_on: "TOTAL".to_string(),
            fixed_amount: "5000".to_string(),
            ..AllowanceDraft::default()
        };

        let record = allowance(&draft).unwrap();

        assert_eq!(record.percentage, Some(dec!(10)));
        assert_eq!(record.based_on.as_deref(), Some("TOTAL"));
        assert_eq!(record.fixed_amount, None);
    }

    #[test]
    fn fixed_allowance_omits_percentage_group() {
        let draft = AllowanceDraft {
            name: "Lunch".to_string(),
            calculation_type: CalculationType::Fixed,
            percentage: "10".to_string(),
            fixed_amount: "5000".to_string(),
            ..AllowanceDraft::default()
        };

        let record = allowance(&draft).unwrap();

        assert_eq!(record.percentage, None);
        assert_eq!(record.based_on, None);
        assert_eq!(record.fixed_amount, Some(dec!(5000)));
    }

    #[test]
    fn nameless_allowance_is_excluded() {
        let draft = AllowanceDraft {
            name: "   ".to_string(),
            ..AllowanceDraft::default()
        };

        assert_eq!(allowance(&draft), None);
    }

    #[test]
    fn percentage_plus_fixed_relief_populates_both_groups() {
        let draft = ReliefDraft {
            name: "CRA".to_string(),
            formula_type: FormulaType::PercentagePlusFixed,
            percentage: "20".to_string(),
            based_on: "gross_income".to_string(),
            fixed_amount: "200000".to_string(),
            ..ReliefDraft::default()
        };

        let record = relief(&draft).unwrap();

        assert_eq!(record.percentage, Some(dec!(20)));
        assert_eq!(record.based_on.as_deref(), Some("gross_income"));
        assert_eq!(record.fixed_amount, Some(dec!(200000)));
    }

    #[test]
    fn fixed_relief_omits_percentage_group() {
        let draft = ReliefDraft {
            name: "NHIS".to_string(),
            formula_type: FormulaType::Fixed,
            percentage: "5".to_string(),
            fixed_amount: "15000".to_string(),
            ..ReliefDraft::default()
        };

        let record = relief(&draft).unwrap();

        assert_eq!(record.percentage, None);
        assert_eq!(record.based_on, None);
        assert_eq!(record.fixed_amount, Some(dec!(15000)));
    }

    // =========================================================================
    // remaining sections
    // =========================================================================

    #[test]
    fn bracket_without_rate_is_excluded() {
        let drafts = [
            TaxBracketDraft {
                limit: "300000".to_string(),
                rate: "7".to_string(),
            },
            TaxBracketDraft {
                limit: "".to_string(),
                rate: "".to_string(),
            },
        ];

        let value = array_of(&drafts, tax_bracket);

        assert_eq!(value, json!([{"limit": 300000, "rate": 7}]));
    }

    #[test]
    fn open_ended_bracket_serializes_null_limit() {
        let draft = TaxBracketDraft {
            limit: "".to_string(),
            rate: "24".to_string(),
        };

        let record = tax_bracket(&draft).unwrap();

        assert_eq!(to_value(&record), json!({"limit": null, "rate": 24}));
    }

    #[test]
    fn statutory_deduction_requires_name_and_percentage() {
        let nameless = StatutoryDeductionDraft {
            percentage: "8".to_string(),
            ..StatutoryDeductionDraft::default()
        };
        let rateless = StatutoryDeductionDraft {
            name: "Pension".to_string(),
            percentage: "  ".to_string(),
            ..StatutoryDeductionDraft::default()
        };

        assert_eq!(statutory_deduction(&nameless), None);
        assert_eq!(statutory_deduction(&rateless), None);
    }

    #[test]
    fn manual_other_deduction_omits_linked_to() {
        let draft = OtherDeductionDraft {
            name: "Union dues".to_string(),
            order: "oops".to_string(),
            ..OtherDeductionDraft::default()
        };

        let record = other_deduction(&draft).unwrap();

        assert_eq!(record.linked_to, None);
        assert_eq!(record.order, 1); // default on parse failure
        assert_eq!(
            to_value(&record),
            json!({"name": "Union dues", "display_rule": "show_if_filled", "order": 1})
        );
    }

    #[test]
    fn income_item_keeps_display_rule_and_order() {
        let draft = IncomeItemDraft {
            name: "13th month".to_string(),
            display_rule: DisplayRule::AlwaysShow,
            order: "2".to_string(),
        };

        let record = income_item(&draft).unwrap();

        assert_eq!(
            to_value(&record),
            json!({"name": "13th month", "display_rule": "always_show", "order": 2})
        );
    }

    // =========================================================================
    // section_value / canonical_text
    // =========================================================================

    #[test]
    fn canonical_text_is_idempotent() {
        let mut store = SectionStore::new();
        store.load_section(
            Section::Allowances,
            r#"[{"name": "Transport", "is_active": true, "annual_only": false,
                 "calculation_type": "percentage", "percentage": 10, "based_on": "TOTAL"}]"#,
        );

        let first = canonical_text(Section::Allowances, store.entries(Section::Allowances));
        let second = canonical_text(Section::Allowances, store.entries(Section::Allowances));

        assert_eq!(first, second);
    }

    #[test]
    fn empty_sections_serialize_to_their_empty_shape() {
        let store = SectionStore::new();

        assert_eq!(
            canonical_text(Section::BasicComponents, store.entries(Section::BasicComponents)),
            "{}"
        );
        assert_eq!(
            canonical_text(Section::TaxBrackets, store.entries(Section::TaxBrackets)),
            "[]"
        );
    }

    #[test]
    fn excluded_records_stay_in_the_store() {
        let mut store = SectionStore::new();
        store.add_record(
            Section::BasicComponents,
            Some(DraftRecord::BasicComponent(component("Basic", "", "60"))),
        );

        let value = section_value(
            Section::BasicComponents,
            store.entries(Section::BasicComponents),
        );

        assert_eq!(value, json!({}));
        assert_eq!(store.entries(Section::BasicComponents).len(), 1);
    }
}
