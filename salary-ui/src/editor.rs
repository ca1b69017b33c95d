//! The editor session: owns the store and drives the sync chain.
//!
//! Every mutating event (edit, add, remove) synchronously runs, in order:
//! re-serialization of the touched section, validation/derived-value
//! recompute, then canonical-form write-out. The chain completes before the
//! method returns, so the canonical text is never stale relative to the
//! last completed edit. Submission re-runs the chain for every section
//! immediately before the gate.

use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, warn};

use salary_core::draft::DraftRecord;
use salary_core::models::Section;
use salary_core::serialize;
use salary_core::store::{RecordId, SectionStore};
use salary_core::validate::{self, SectionTotal, SubmitDecision};

use crate::adapter::{self, FieldKey, FieldValue, SectionView, ViewMode};
use crate::lock::LockSignals;

/// The seven serialized-form fields as received from the host, any of which
/// may be absent or empty.
#[derive(Debug, Clone, Default)]
pub struct SerializedForms {
    pub basic_components: Option<String>,
    pub allowances: Option<String>,
    pub reliefs: Option<String>,
    pub tax_brackets: Option<String>,
    pub statutory_deductions: Option<String>,
    pub other_deductions: Option<String>,
    pub income_items: Option<String>,
}

impl SerializedForms {
    fn get(&self, section: Section) -> Option<&str> {
        let field = match section {
            Section::BasicComponents => &self.basic_components,
            Section::Allowances => &self.allowances,
            Section::Reliefs => &self.reliefs,
            Section::TaxBrackets => &self.tax_brackets,
            Section::StatutoryDeductions => &self.statutory_deductions,
            Section::OtherDeductions => &self.other_deductions,
            Section::IncomeItems => &self.income_items,
        };
        field.as_deref()
    }
}

/// Everything the host supplies to open an editor session.
#[derive(Debug, Clone, Default)]
pub struct EditorInput {
    pub serialized: SerializedForms,
    /// Whether the session edits pre-existing data. Suppresses template
    /// seeding, so an intentionally emptied section stays empty.
    pub edit_mode: bool,
    pub lock: LockSignals,
    /// Illustrative monthly base for preview amounts.
    pub preview_base: Option<Decimal>,
}

fn default_preview_base() -> Decimal {
    Decimal::from(100_000_i64)
}

/// One editor session over the seven-section salary configuration.
#[derive(Debug, Clone)]
pub struct SettingEditor {
    store: SectionStore,
    canonical: [String; 7],
    basic_total: SectionTotal,
    mode: ViewMode,
    preview_base: Decimal,
}

impl SettingEditor {
    /// Builds the session: bulk-loads every section from the supplied
    /// serialized forms, seeds templates where appropriate, evaluates the
    /// lock decision (exactly once), and runs the initial sync chain.
    pub fn new(input: EditorInput) -> Self {
        let mut store = SectionStore::new();
        for section in Section::ALL {
            if let Some(raw) = input.serialized.get(section) {
                store.load_section(section, raw);
            }
            // Never present an empty section to a fresh configuration.
            if store.entries(section).is_empty() && !input.edit_mode {
                store.add_record(section, None);
            }
        }

        let mode = if input.lock.is_locked() {
            ViewMode::Locked
        } else {
            ViewMode::Editable
        };
        debug!(?mode, edit_mode = input.edit_mode, "editor session opened");

        let mut editor = Self {
            store,
            canonical: std::array::from_fn(|_| String::new()),
            basic_total: SectionTotal::empty(),
            mode,
            preview_base: input.preview_base.unwrap_or_else(default_preview_base),
        };
        for section in Section::ALL {
            editor.sync(section);
        }
        editor
    }

    /// Re-serializes one section, recomputes its derived values, and
    /// rewrites its canonical text, in that order.
    fn sync(&mut self, section: Section) {
        let value = serialize::section_value(section, self.store.entries(section));
        if section == Section::BasicComponents {
            if let Value::Object(map) = &value {
                self.basic_total = validate::basic_components_total(map);
            }
        }
        self.canonical[section.index()] = value.to_string();
    }

    /// Appends a template record and runs the sync chain. Refused while
    /// locked.
    pub fn add_record(&mut self, section: Section) -> Option<RecordId> {
        if self.locked("add") {
            return None;
        }
        let id = self.store.add_record(section, None);
        self.sync(section);
        Some(id)
    }

    /// Removes a record and runs the sync chain. Refused while locked.
    pub fn remove_record(&mut self, section: Section, id: RecordId) -> bool {
        if self.locked("remove") {
            return false;
        }
        let removed = self.store.remove_record(section, id);
        if removed {
            self.sync(section);
        }
        removed
    }

    /// Applies one field edit and runs the sync chain. Refused while locked;
    /// inapplicable edits (unknown id, wrong field, bad select code) are
    /// logged no-ops.
    pub fn update_field(
        &mut self,
        section: Section,
        id: RecordId,
        key: FieldKey,
        value: &FieldValue,
    ) -> bool {
        if self.locked("edit") {
            return false;
        }
        let Some(record) = self.store.record_mut(section, id) else {
            warn!(section = section.as_str(), ?id, "no such record");
            return false;
        };
        let applied = adapter::apply_edit(record, key, value);
        if applied {
            self.sync(section);
        }
        applied
    }

    fn locked(&self, event: &str) -> bool {
        if self.mode == ViewMode::Locked {
            warn!(event, "mutation refused: editor is locked");
            true
        } else {
            false
        }
    }

    /// Re-runs the sync chain for every section, then gates on the freshly
    /// re-derived basic-components total. Blocking discards nothing; the
    /// session stays editable for correction.
    pub fn submit(&mut self) -> SubmitDecision {
        for section in Section::ALL {
            self.sync(section);
        }
        validate::submission_gate(self.basic_total)
    }

    /// Canonical text of one section, as last written out.
    pub fn canonical_text(&self, section: Section) -> &str {
        &self.canonical[section.index()]
    }

    /// The seven host form fields, rewritten on every mutating event.
    pub fn form_outputs(&self) -> impl Iterator<Item = (Section, &str)> {
        Section::ALL
            .into_iter()
            .map(|section| (section, self.canonical_text(section)))
    }

    /// Current basic-components percentage total, for presentation next to
    /// the section.
    pub fn basic_total(&self) -> SectionTotal {
        self.basic_total
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Renders one section through the Presentation Adapter.
    pub fn section_view(&self, section: Section) -> SectionView {
        adapter::section_view(
            section,
            self.store.entries(section),
            self.mode,
            self.preview_base,
        )
    }

    /// Read access to the underlying store (the system of record).
    pub fn store(&self) -> &SectionStore {
        &self.store
    }

    /// Ordered record addresses of one section, for hosts that wire their
    /// own affordances.
    pub fn record_ids(&self, section: Section) -> Vec<RecordId> {
        self.store
            .entries(section)
            .iter()
            .map(|entry| entry.id)
            .collect()
    }

    /// Appends a pre-filled record (import tooling, tests) and runs the
    /// sync chain. Refused while locked.
    pub fn add_record_with(&mut self, section: Section, record: DraftRecord) -> Option<RecordId> {
        if self.locked("add") {
            return None;
        }
        let id = self.store.add_record(section, Some(record));
        self.sync(section);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn blank_input() -> EditorInput {
        EditorInput::default()
    }

    #[test]
    fn fresh_session_seeds_one_template_per_section() {
        let editor = SettingEditor::new(blank_input());

        for section in Section::ALL {
            assert_eq!(editor.store().entries(section).len(), 1, "{section:?}");
        }
    }

    #[test]
    fn edit_mode_does_not_seed_templates() {
        let editor = SettingEditor::new(EditorInput {
            edit_mode: true,
            ..blank_input()
        });

        for section in Section::ALL {
            assert!(editor.store().entries(section).is_empty(), "{section:?}");
        }
    }

    #[test]
    fn canonical_text_is_written_at_initialization() {
        let editor = SettingEditor::new(EditorInput {
            edit_mode: true,
            ..blank_input()
        });

        assert_eq!(editor.canonical_text(Section::BasicComponents), "{}");
        assert_eq!(editor.canonical_text(Section::Allowances), "[]");
    }

    #[test]
    fn mutations_rewrite_canonical_text_synchronously() {
        let mut editor = SettingEditor::new(EditorInput {
            edit_mode: true,
            ..blank_input()
        });

        let id = editor.add_record(Section::IncomeItems).unwrap();
        editor.update_field(
            Section::IncomeItems,
            id,
            FieldKey::Name,
            &FieldValue::Text("Bonus".to_string()),
        );

        assert_eq!(
            editor.canonical_text(Section::IncomeItems),
            r#"[{"name":"Bonus","display_rule":"show_if_filled","order":1}]"#
        );

        editor.remove_record(Section::IncomeItems, id);

        assert_eq!(editor.canonical_text(Section::IncomeItems), "[]");
    }

    #[test]
    fn locked_session_refuses_mutations() {
        let mut editor = SettingEditor::new(EditorInput {
            lock: LockSignals {
                form_flag: Some(true),
                ..LockSignals::default()
            },
            ..blank_input()
        });
        let id = editor.record_ids(Section::Allowances)[0];

        assert_eq!(editor.mode(), ViewMode::Locked);
        assert_eq!(editor.add_record(Section::Allowances), None);
        assert!(!editor.remove_record(Section::Allowances, id));
        assert!(!editor.update_field(
            Section::Allowances,
            id,
            FieldKey::Name,
            &FieldValue::Text("Housing".to_string()),
        ));
    }

    #[test]
    fn update_with_unknown_id_is_a_no_op() {
        let mut editor = SettingEditor::new(blank_input());
        let mut other = SettingEditor::new(blank_input());
        let foreign = other.add_record(Section::Reliefs).unwrap();

        let before = editor.canonical_text(Section::Reliefs).to_string();
        let applied = editor.update_field(
            Section::Reliefs,
            foreign,
            FieldKey::Name,
            &FieldValue::Text("CRA".to_string()),
        );

        assert!(!applied);
        assert_eq!(editor.canonical_text(Section::Reliefs), before);
    }
}
