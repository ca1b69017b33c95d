//! Ordered, per-section record storage.
//!
//! The store is the system of record: the editable surface is a projection
//! of it, and the canonical form is derived from it. Records are addressed
//! by [`RecordId`] and ordered by position; removal is positional and ids
//! are never reused.

use tracing::warn;

use crate::draft::{
    AllowanceDraft, BasicComponentDraft, DraftRecord, IncomeItemDraft, OtherDeductionDraft,
    ReliefDraft, StatutoryDeductionDraft, TaxBracketDraft,
};
use crate::models::{
    Allowance, BasicComponent, IncomeItem, OtherDeduction, Relief, Section, StatutoryDeduction,
    TaxBracket,
};

/// Opaque address of one record in the store.
///
/// Ids increase monotonically across the whole store and are never reused
/// after removal. They exist only for addressing records from the surface;
/// they carry no ordering meaning and are never serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(u64);

/// One stored record together with its address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: RecordId,
    pub record: DraftRecord,
}

/// Owns every draft record of every section.
#[derive(Debug, Clone)]
pub struct SectionStore {
    next_id: u64,
    sections: [Vec<Entry>; 7],
}

impl SectionStore {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            sections: std::array::from_fn(|_| Vec::new()),
        }
    }

    fn allocate_id(&mut self) -> RecordId {
        let id = RecordId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Appends a record to `section` and returns its address.
    ///
    /// With no `initial` data the section's template is used. An `initial`
    /// record belonging to a different section is refused (logged) and
    /// replaced by the template.
    pub fn add_record(&mut self, section: Section, initial: Option<DraftRecord>) -> RecordId {
        let record = match initial {
            Some(record) if record.section() == section => record,
            Some(record) => {
                warn!(
                    section = section.as_str(),
                    got = record.section().as_str(),
                    "initial record belongs to another section; using template"
                );
                section.template()
            }
            None => section.template(),
        };
        let id = self.allocate_id();
        self.sections[section.index()].push(Entry { id, record });
        id
    }

    /// Removes the addressed record. Returns `false` when the id is not in
    /// the section (e.g. already removed).
    pub fn remove_record(&mut self, section: Section, id: RecordId) -> bool {
        let records = &mut self.sections[section.index()];
        let before = records.len();
        records.retain(|entry| entry.id != id);
        records.len() != before
    }

    /// Ordered records of a section.
    pub fn entries(&self, section: Section) -> &[Entry] {
        &self.sections[section.index()]
    }

    pub fn record_mut(&mut self, section: Section, id: RecordId) -> Option<&mut DraftRecord> {
        self.sections[section.index()]
            .iter_mut()
            .find(|entry| entry.id == id)
            .map(|entry| &mut entry.record)
    }

    /// Replaces all records of `section` with the contents of a serialized
    /// canonical form.
    ///
    /// Malformed or wrong-shape input leaves the section empty with a
    /// warning; this never surfaces an error to the caller. Blank input is
    /// simply an empty section.
    pub fn load_section(&mut self, section: Section, raw: &str) {
        self.sections[section.index()].clear();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return;
        }
        let records = match parse_canonical(section, trimmed) {
            Ok(records) => records,
            Err(err) => {
                warn!(
                    section = section.as_str(),
                    "discarding malformed serialized form: {}", err
                );
                return;
            }
        };
        for record in records {
            let id = self.allocate_id();
            self.sections[section.index()].push(Entry { id, record });
        }
    }
}

impl Default for SectionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses one section's canonical text into draft records.
fn parse_canonical(section: Section, raw: &str) -> Result<Vec<DraftRecord>, serde_json::Error> {
    let records = match section {
        Section::BasicComponents => {
            // Object keyed by normalized name; key order is preserved.
            let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(raw)?;
            let mut records = Vec::with_capacity(map.len());
            for (_key, value) in map {
                let component: BasicComponent = serde_json::from_value(value)?;
                records.push(DraftRecord::BasicComponent(
                    BasicComponentDraft::from_canonical(&component),
                ));
            }
            records
        }
        Section::Allowances => serde_json::from_str::<Vec<Allowance>>(raw)?
            .iter()
            .map(|r| DraftRecord::Allowance(AllowanceDraft::from_canonical(r)))
            .collect(),
        Section::Reliefs => serde_json::from_str::<Vec<Relief>>(raw)?
            .iter()
            .map(|r| DraftRecord::Relief(ReliefDraft::from_canonical(r)))
            .collect(),
        Section::TaxBrackets => serde_json::from_str::<Vec<TaxBracket>>(raw)?
            .iter()
            .map(|r| DraftRecord::TaxBracket(TaxBracketDraft::from_canonical(r)))
            .collect(),
        Section::StatutoryDeductions => serde_json::from_str::<Vec<StatutoryDeduction>>(raw)?
            .iter()
            .map(|r| DraftRecord::StatutoryDeduction(StatutoryDeductionDraft::from_canonical(r)))
            .collect(),
        Section::OtherDeductions => serde_json::from_str::<Vec<OtherDeduction>>(raw)?
            .iter()
            .map(|r| DraftRecord::OtherDeduction(OtherDeductionDraft::from_canonical(r)))
            .collect(),
        Section::IncomeItems => serde_json::from_str::<Vec<IncomeItem>>(raw)?
            .iter()
            .map(|r| DraftRecord::IncomeItem(IncomeItemDraft::from_canonical(r)))
            .collect(),
    };
    Ok(records)
}
