use serde::{Deserialize, Serialize};

/// One of the seven configuration categories the editor manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Section {
    BasicComponents,
    Allowances,
    Reliefs,
    TaxBrackets,
    StatutoryDeductions,
    OtherDeductions,
    IncomeItems,
}

impl Section {
    /// All sections in presentation order.
    pub const ALL: [Section; 7] = [
        Self::BasicComponents,
        Self::Allowances,
        Self::Reliefs,
        Self::TaxBrackets,
        Self::StatutoryDeductions,
        Self::OtherDeductions,
        Self::IncomeItems,
    ];

    /// Stable identifier, matching the host form field carrying the
    /// section's serialized canonical form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BasicComponents => "basic_components",
            Self::Allowances => "allowances",
            Self::Reliefs => "reliefs_exemptions",
            Self::TaxBrackets => "tax_brackets",
            Self::StatutoryDeductions => "statutory_deductions",
            Self::OtherDeductions => "other_deductions_config",
            Self::IncomeItems => "income_items",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "basic_components" => Some(Self::BasicComponents),
            "allowances" => Some(Self::Allowances),
            "reliefs_exemptions" => Some(Self::Reliefs),
            "tax_brackets" => Some(Self::TaxBrackets),
            "statutory_deductions" => Some(Self::StatutoryDeductions),
            "other_deductions_config" => Some(Self::OtherDeductions),
            "income_items" => Some(Self::IncomeItems),
            _ => None,
        }
    }

    /// Whether the canonical form is a JSON object keyed by normalized name
    /// rather than an array.
    pub fn is_keyed(&self) -> bool {
        matches!(self, Self::BasicComponents)
    }

    /// Position of the section in [`Section::ALL`]; used by stores indexed
    /// with fixed-size arrays.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn as_str_parse_round_trips_every_section() {
        for section in Section::ALL {
            assert_eq!(Section::parse(section.as_str()), Some(section));
        }
    }

    #[test]
    fn parse_rejects_unknown_names() {
        assert_eq!(Section::parse("payslip"), None);
    }

    #[test]
    fn index_matches_position_in_all() {
        for (position, section) in Section::ALL.iter().enumerate() {
            assert_eq!(section.index(), position);
        }
    }

    #[test]
    fn only_basic_components_is_keyed() {
        let keyed: Vec<Section> = Section::ALL.into_iter().filter(Section::is_keyed).collect();

        assert_eq!(keyed, vec![Section::BasicComponents]);
    }
}
