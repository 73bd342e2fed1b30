use indexmap::IndexMap;

use super::measurement::Measurement;

/// Valid units per measurement kind, in preference order
pub type ValidUnits = IndexMap<Measurement, Vec<String>>;

/// Localized labels per locale, then per measurement kind
pub type DisplayNames = IndexMap<String, IndexMap<Measurement, String>>;

/// Constant reference tables for measurement kinds.
///
/// Built once at startup and shared read-only by the validator and the
/// handlers. `Default` yields the built-in tables.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementCatalog {
    valid_units: ValidUnits,
    display_names: DisplayNames,
}

impl MeasurementCatalog {
    /// Create a catalog from explicit tables
    pub fn new(valid_units: ValidUnits, display_names: DisplayNames) -> Self {
        Self {
            valid_units,
            display_names,
        }
    }

    /// The full valid-units table
    pub fn valid_units(&self) -> &ValidUnits {
        &self.valid_units
    }

    /// Units accepted for `kind`; empty when the kind has no entry
    pub fn units_for(&self, kind: Measurement) -> &[String] {
        self.valid_units
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The full display-names table
    pub fn display_names(&self) -> &DisplayNames {
        &self.display_names
    }

    /// Label for `kind` in `locale`, if the locale is known
    pub fn display_name(&self, locale: &str, kind: Measurement) -> Option<&str> {
        self.display_names
            .get(locale)
            .and_then(|labels| labels.get(&kind))
            .map(String::as_str)
    }

    /// Whether `unit` is one of the units accepted for `kind`. Exact, case-sensitive match.
    pub fn unit_allowed(&self, kind: Measurement, unit: &str) -> bool {
        self.units_for(kind).iter().any(|allowed| allowed == unit)
    }
}

impl Default for MeasurementCatalog {
    fn default() -> Self {
        let units = |list: &[&str]| list.iter().map(|u| u.to_string()).collect::<Vec<_>>();
        let labels = |weight: &str, sbp: &str, dbp: &str| {
            IndexMap::from([
                (Measurement::Weight, weight.to_string()),
                (Measurement::Sbp, sbp.to_string()),
                (Measurement::Dbp, dbp.to_string()),
            ])
        };

        let valid_units = IndexMap::from([
            (Measurement::Weight, units(&["kg", "lbs"])),
            (Measurement::Sbp, units(&["mmHg"])),
            (Measurement::Dbp, units(&["mmHg"])),
        ]);

        let display_names = IndexMap::from([
            (
                "en".to_string(),
                labels("Weight", "Systolic Blood Pressure", "Diastolic Blood Pressure"),
            ),
            (
                "fi".to_string(),
                labels("Paino", "Verenpaine, yläpaine", "Verenpaine, alapaine"),
            ),
        ]);

        Self::new(valid_units, display_names)
    }
}
