//! Tiered default resolution for plant attributes the dataset leaves empty.
//!
//! Each attribute resolves in order: the plant record, the subcategory
//! table, a category heuristic. When all tiers miss, the value stays
//! unresolved and a [`Diagnostic`] is recorded; the caller decides whether
//! that is fatal for its calculation.

use crate::models::{
    Attribute, DayRange, Diagnostic, Month, MonthRange, Plant, PlantCategory, PlantingMethod,
    TemperatureRange,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Which tier produced a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefaultSource {
    Explicit,
    Subcategory,
    Category,
    Derived,
    Unresolved,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    pub value: Option<T>,
    pub source: DefaultSource,
}

impl<T> Resolved<T> {
    fn found(value: T, source: DefaultSource) -> Self {
        Self {
            value: Some(value),
            source,
        }
    }

    fn unresolved() -> Self {
        Self {
            value: None,
            source: DefaultSource::Unresolved,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.value.is_some()
    }
}

/// Per-subcategory reference values. Every field is optional so a table
/// entry (or a config override) can supply just what it knows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubcategoryDefaults {
    pub planting_method: Option<PlantingMethod>,
    pub hardening_days: Option<u32>,
    pub days_indoor_growth: Option<u32>,
    pub frost_tolerant: Option<bool>,
    pub germination_days: Option<DayRange>,
    pub germination_temperature: Option<TemperatureRange>,
    pub growing_temperature: Option<TemperatureRange>,
}

impl SubcategoryDefaults {
    /// Fields set in `other` win.
    pub fn merged_with(&self, other: &SubcategoryDefaults) -> SubcategoryDefaults {
        SubcategoryDefaults {
            planting_method: other.planting_method.or(self.planting_method),
            hardening_days: other.hardening_days.or(self.hardening_days),
            days_indoor_growth: other.days_indoor_growth.or(self.days_indoor_growth),
            frost_tolerant: other.frost_tolerant.or(self.frost_tolerant),
            germination_days: other.germination_days.or(self.germination_days),
            germination_temperature: other
                .germination_temperature
                .or(self.germination_temperature),
            growing_temperature: other.growing_temperature.or(self.growing_temperature),
        }
    }
}

fn entry(
    planting_method: PlantingMethod,
    hardening_days: u32,
    days_indoor_growth: Option<u32>,
    frost_tolerant: bool,
    germination_days: (u32, u32),
    germination_temperature: (f64, f64),
    growing_temperature: (f64, f64),
) -> SubcategoryDefaults {
    SubcategoryDefaults {
        planting_method: Some(planting_method),
        hardening_days: Some(hardening_days),
        days_indoor_growth,
        frost_tolerant: Some(frost_tolerant),
        germination_days: Some(DayRange::new(germination_days.0, germination_days.1)),
        germination_temperature: Some(TemperatureRange::new(
            germination_temperature.0,
            germination_temperature.1,
        )),
        growing_temperature: Some(TemperatureRange::new(
            growing_temperature.0,
            growing_temperature.1,
        )),
    }
}

fn builtin_entries() -> Vec<(&'static str, SubcategoryDefaults)> {
    use PlantingMethod::{Indoor, Outdoor};
    vec![
        ("tomato", entry(Indoor, 10, Some(56), false, (6, 10), (20.0, 25.0), (18.0, 27.0))),
        ("pepper", entry(Indoor, 10, Some(70), false, (8, 14), (25.0, 30.0), (20.0, 28.0))),
        ("chili", entry(Indoor, 10, Some(70), false, (10, 20), (25.0, 30.0), (20.0, 30.0))),
        ("eggplant", entry(Indoor, 10, Some(70), false, (8, 14), (24.0, 30.0), (21.0, 29.0))),
        ("cucumber", entry(Indoor, 7, Some(28), false, (3, 7), (20.0, 30.0), (18.0, 30.0))),
        ("squash", entry(Indoor, 7, Some(28), false, (5, 10), (20.0, 30.0), (18.0, 28.0))),
        ("pumpkin", entry(Indoor, 7, Some(28), false, (5, 10), (20.0, 30.0), (18.0, 28.0))),
        ("cabbage", entry(Indoor, 7, Some(42), true, (4, 10), (15.0, 25.0), (12.0, 20.0))),
        ("broccoli", entry(Indoor, 7, Some(42), true, (4, 10), (15.0, 25.0), (12.0, 20.0))),
        ("cauliflower", entry(Indoor, 7, Some(42), true, (5, 10), (15.0, 25.0), (12.0, 20.0))),
        ("kale", entry(Indoor, 7, Some(35), true, (4, 10), (15.0, 25.0), (10.0, 20.0))),
        ("lettuce", entry(Indoor, 5, Some(28), true, (2, 7), (10.0, 20.0), (10.0, 20.0))),
        ("onion", entry(Indoor, 7, Some(56), true, (7, 14), (15.0, 25.0), (12.0, 24.0))),
        ("leek", entry(Indoor, 7, Some(70), true, (10, 18), (15.0, 22.0), (12.0, 22.0))),
        ("celery", entry(Indoor, 10, Some(70), false, (14, 21), (18.0, 24.0), (15.0, 21.0))),
        ("basil", entry(Indoor, 7, Some(42), false, (5, 10), (20.0, 25.0), (20.0, 30.0))),
        ("parsley", entry(Indoor, 7, Some(49), true, (14, 28), (15.0, 22.0), (12.0, 22.0))),
        ("beans", entry(Outdoor, 0, None, false, (6, 10), (18.0, 30.0), (18.0, 27.0))),
        ("peas", entry(Outdoor, 0, None, true, (7, 14), (10.0, 20.0), (10.0, 20.0))),
        ("carrot", entry(Outdoor, 0, None, true, (10, 21), (10.0, 25.0), (15.0, 21.0))),
        ("beetroot", entry(Outdoor, 0, None, true, (7, 14), (10.0, 25.0), (12.0, 22.0))),
        ("radish", entry(Outdoor, 0, None, true, (3, 7), (10.0, 25.0), (10.0, 20.0))),
        ("spinach", entry(Outdoor, 0, None, true, (7, 14), (10.0, 20.0), (10.0, 20.0))),
    ]
}

/// Dataset subcategory names that mean the same as a table key.
const SUBCATEGORY_ALIASES: &[(&str, &str)] = &[
    ("tomat", "tomato"),
    ("tomatoes", "tomato"),
    ("paprika", "pepper"),
    ("aubergine", "eggplant"),
    ("agurk", "cucumber"),
    ("gresskar", "pumpkin"),
    ("kål", "cabbage"),
    ("brokkoli", "broccoli"),
    ("blomkål", "cauliflower"),
    ("grønnkål", "kale"),
    ("salat", "lettuce"),
    ("løk", "onion"),
    ("purre", "leek"),
    ("selleri", "celery"),
    ("basilikum", "basil"),
    ("persille", "parsley"),
    ("bønner", "beans"),
    ("erter", "peas"),
    ("gulrot", "carrot"),
    ("rødbete", "beetroot"),
    ("reddik", "radish"),
    ("spinat", "spinach"),
];

fn normalize_key(subcategory: &str) -> String {
    let key = subcategory.trim().to_lowercase();
    SUBCATEGORY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(key)
}

/// Read-only subcategory lookup tables.
#[derive(Debug, Clone, Default)]
pub struct DefaultTables {
    subcategories: HashMap<String, SubcategoryDefaults>,
}

impl DefaultTables {
    pub fn builtin() -> Self {
        Self {
            subcategories: builtin_entries()
                .into_iter()
                .map(|(key, defaults)| (key.to_string(), defaults))
                .collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Layer overrides on top of the current tables, field by field.
    pub fn with_overrides(mut self, overrides: &HashMap<String, SubcategoryDefaults>) -> Self {
        for (name, partial) in overrides {
            let key = normalize_key(name);
            let merged = match self.subcategories.get(&key) {
                Some(existing) => existing.merged_with(partial),
                None => partial.clone(),
            };
            self.subcategories.insert(key, merged);
        }
        self
    }

    pub fn lookup(&self, subcategory: &str) -> Option<&SubcategoryDefaults> {
        if subcategory.trim().is_empty() {
            return None;
        }
        self.subcategories.get(&normalize_key(subcategory))
    }

    pub fn len(&self) -> usize {
        self.subcategories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subcategories.is_empty()
    }
}

/// Built-in tables, built on first use.
pub fn builtin_tables() -> &'static DefaultTables {
    static TABLES: OnceLock<DefaultTables> = OnceLock::new();
    TABLES.get_or_init(DefaultTables::builtin)
}

/// Default transplant window plus the reason it applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransplantWindow {
    pub window: MonthRange,
    pub rationale: &'static str,
}

pub const FROST_TOLERANT_RATIONALE: &str = "once frost risk passes";
pub const FROST_SENSITIVE_RATIONALE: &str = "after hardening, once frost risk is over";

pub struct DefaultResolver<'a> {
    tables: &'a DefaultTables,
}

impl<'a> DefaultResolver<'a> {
    pub fn new(tables: &'a DefaultTables) -> Self {
        Self { tables }
    }

    pub fn resolve_planting_method(
        &self,
        plant: &Plant,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Resolved<PlantingMethod> {
        let resolved = self.planting_method(plant);
        if !resolved.is_resolved() {
            record(
                diagnostics,
                plant,
                Attribute::PlantingMethod,
                "no planting method on record, subcategory or category; treating as indoor start",
            );
        }
        resolved
    }

    pub fn resolve_hardening_days(
        &self,
        plant: &Plant,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Resolved<u32> {
        self.resolve(
            plant,
            Attribute::HardeningDays,
            plant.hardening_days,
            |d| d.hardening_days,
            |plant| {
                // Direct-sown plants are never hardened off.
                if self.planting_method(plant).value == Some(PlantingMethod::Outdoor) {
                    return Some(0);
                }
                match plant.parsed_category()? {
                    PlantCategory::Herb | PlantCategory::Flower => Some(7),
                    PlantCategory::Legume => Some(0),
                    PlantCategory::Vegetable | PlantCategory::Fruit => None,
                }
            },
            diagnostics,
        )
    }

    pub fn resolve_days_indoor_growth(
        &self,
        plant: &Plant,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Resolved<u32> {
        self.resolve(
            plant,
            Attribute::DaysIndoorGrowth,
            plant.days_indoor_growth,
            |d| d.days_indoor_growth,
            |plant| match plant.parsed_category()? {
                PlantCategory::Herb => Some(42),
                PlantCategory::Flower => Some(56),
                _ => None,
            },
            diagnostics,
        )
    }

    pub fn resolve_frost_tolerance(
        &self,
        plant: &Plant,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Resolved<bool> {
        self.resolve(
            plant,
            Attribute::FrostTolerance,
            plant.frost_tolerant,
            |d| d.frost_tolerant,
            |_| None,
            diagnostics,
        )
    }

    pub fn resolve_germination_days(
        &self,
        plant: &Plant,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Resolved<DayRange> {
        self.resolve(
            plant,
            Attribute::GerminationDays,
            plant.germination_days,
            |d| d.germination_days,
            |_| None,
            diagnostics,
        )
    }

    pub fn resolve_germination_temperature(
        &self,
        plant: &Plant,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Resolved<TemperatureRange> {
        self.resolve(
            plant,
            Attribute::GerminationTemperature,
            plant.germination_temperature,
            |d| d.germination_temperature,
            |_| None,
            diagnostics,
        )
    }

    pub fn resolve_growing_temperature(
        &self,
        plant: &Plant,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Resolved<TemperatureRange> {
        self.resolve(
            plant,
            Attribute::GrowingTemperature,
            plant.growing_temperature,
            |d| d.growing_temperature,
            |_| None,
            diagnostics,
        )
    }

    /// Transplant window: explicit on the record, otherwise derived from
    /// frost tolerance. Unknown tolerance is treated as frost-sensitive.
    pub fn resolve_transplant_window(
        &self,
        plant: &Plant,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Resolved<TransplantWindow> {
        if let Some(window) = plant.transplant_window.as_ref().filter(|w| !w.is_blank()) {
            return Resolved::found(
                TransplantWindow {
                    window: window.clone(),
                    rationale: "as given for this plant",
                },
                DefaultSource::Explicit,
            );
        }

        let tolerant = self.resolve_frost_tolerance(plant, diagnostics).value;
        let derived = match tolerant {
            Some(true) => TransplantWindow {
                window: MonthRange::from_months(Month::April, Month::May),
                rationale: FROST_TOLERANT_RATIONALE,
            },
            Some(false) => TransplantWindow {
                window: MonthRange::from_months(Month::May, Month::June),
                rationale: FROST_SENSITIVE_RATIONALE,
            },
            None => {
                record(
                    diagnostics,
                    plant,
                    Attribute::TransplantWindow,
                    "frost tolerance unknown; assuming frost-sensitive transplant window",
                );
                TransplantWindow {
                    window: MonthRange::from_months(Month::May, Month::June),
                    rationale: FROST_SENSITIVE_RATIONALE,
                }
            }
        };
        Resolved::found(derived, DefaultSource::Derived)
    }

    fn planting_method(&self, plant: &Plant) -> Resolved<PlantingMethod> {
        if let Some(method) = plant.planting_method {
            return Resolved::found(method, DefaultSource::Explicit);
        }
        if let Some(method) = self
            .tables
            .lookup(&plant.subcategory)
            .and_then(|d| d.planting_method)
        {
            return Resolved::found(method, DefaultSource::Subcategory);
        }
        let by_category = match plant.parsed_category() {
            Some(PlantCategory::Legume) => Some(PlantingMethod::Outdoor),
            Some(PlantCategory::Vegetable | PlantCategory::Herb | PlantCategory::Flower) => {
                Some(PlantingMethod::Indoor)
            }
            Some(PlantCategory::Fruit) | None => None,
        };
        match by_category {
            Some(method) => Resolved::found(method, DefaultSource::Category),
            None => Resolved::unresolved(),
        }
    }

    fn resolve<T: Copy>(
        &self,
        plant: &Plant,
        attribute: Attribute,
        explicit: Option<T>,
        from_table: impl Fn(&SubcategoryDefaults) -> Option<T>,
        from_category: impl Fn(&Plant) -> Option<T>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Resolved<T> {
        if let Some(value) = explicit {
            return Resolved::found(value, DefaultSource::Explicit);
        }
        if let Some(value) = self.tables.lookup(&plant.subcategory).and_then(from_table) {
            return Resolved::found(value, DefaultSource::Subcategory);
        }
        if let Some(value) = from_category(plant) {
            return Resolved::found(value, DefaultSource::Category);
        }
        record(
            diagnostics,
            plant,
            attribute,
            format!(
                "no {} for subcategory '{}' and no category default",
                attribute, plant.subcategory
            ),
        );
        Resolved::unresolved()
    }
}

fn record(
    diagnostics: &mut Vec<Diagnostic>,
    plant: &Plant,
    attribute: Attribute,
    message: impl Into<String>,
) {
    let diagnostic = Diagnostic::new(plant.id, attribute, message);
    tracing::debug!(
        plant_id = plant.id,
        attribute = attribute.as_str(),
        "{}",
        diagnostic.message
    );
    diagnostics.push(diagnostic);
}
