use super::Month;
use crate::error::CalendarError;
use crate::logic::calendar::parse_month;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlantingMethod {
    Indoor,
    Outdoor,
}

impl PlantingMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlantingMethod::Indoor => "indoor",
            PlantingMethod::Outdoor => "outdoor",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "indoor" | "indoors" | "inne" => Some(PlantingMethod::Indoor),
            "outdoor" | "outdoors" | "ute" | "direct" => Some(PlantingMethod::Outdoor),
            _ => None,
        }
    }
}

impl std::fmt::Display for PlantingMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Broad crop grouping used for the last tier of default resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlantCategory {
    Vegetable,
    Legume,
    Herb,
    Flower,
    Fruit,
}

impl PlantCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlantCategory::Vegetable => "Vegetable",
            PlantCategory::Legume => "Legume",
            PlantCategory::Herb => "Herb",
            PlantCategory::Flower => "Flower",
            PlantCategory::Fruit => "Fruit",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "vegetable" | "vegetables" | "grønnsaker" | "grønnsak" => {
                Some(PlantCategory::Vegetable)
            }
            "legume" | "legumes" | "belgvekster" => Some(PlantCategory::Legume),
            "herb" | "herbs" | "krydderurter" => Some(PlantCategory::Herb),
            "flower" | "flowers" | "blomster" => Some(PlantCategory::Flower),
            "fruit" | "fruits" | "frukt" | "bær" => Some(PlantCategory::Fruit),
            _ => None,
        }
    }
}

impl std::fmt::Display for PlantCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recurring `{start, end}` month range as stored in the dataset.
///
/// Bounds are kept as raw strings: records come from an external loader and
/// may carry blank or misspelled month names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthRange {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
}

impl MonthRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn from_months(start: Month, end: Month) -> Self {
        Self::new(start.as_str(), end.as_str())
    }

    /// A range with either bound blank counts as absent.
    pub fn is_blank(&self) -> bool {
        self.start.trim().is_empty() || self.end.trim().is_empty()
    }

    /// Parse both bounds, rejecting blanks, unknown names and ranges that wrap
    /// across the year boundary.
    pub fn months(&self) -> Result<(Month, Month), CalendarError> {
        let start = parse_month(&self.start)?;
        let end = parse_month(&self.end)?;
        if end < start {
            return Err(CalendarError::ReversedRange {
                start: self.start.clone(),
                end: self.end.clone(),
            });
        }
        Ok((start, end))
    }

    pub fn is_valid(&self) -> bool {
        self.months().is_ok()
    }
}

impl std::fmt::Display for MonthRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantingWindows {
    #[serde(default)]
    pub indoors: Option<MonthRange>,
    #[serde(default)]
    pub outdoors: Option<MonthRange>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRange {
    pub min: u32,
    pub max: u32,
}

impl DayRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

/// Temperature range in °C.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRange {
    pub min: f64,
    pub max: f64,
}

impl TemperatureRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// One crop variety. Read-only to the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub subcategory: String,
    #[serde(default)]
    pub planting_method: Option<PlantingMethod>,
    #[serde(default)]
    pub planting_windows: PlantingWindows,
    #[serde(default)]
    pub harvest_time: Option<MonthRange>,
    #[serde(default)]
    pub days_indoor_growth: Option<u32>,
    #[serde(default)]
    pub hardening_days: Option<u32>,
    #[serde(default)]
    pub frost_tolerant: Option<bool>,
    #[serde(default)]
    pub germination_days: Option<DayRange>,
    #[serde(default)]
    pub germination_temperature: Option<TemperatureRange>,
    #[serde(default)]
    pub growing_temperature: Option<TemperatureRange>,
    #[serde(default)]
    pub transplant_window: Option<MonthRange>,
}

impl Plant {
    pub fn new(id: i64, name: impl Into<String>, subcategory: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            subcategory: subcategory.into(),
            ..Default::default()
        }
    }

    pub fn with_method(mut self, method: PlantingMethod) -> Self {
        self.planting_method = Some(method);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_indoor_window(mut self, start: &str, end: &str) -> Self {
        self.planting_windows.indoors = Some(MonthRange::new(start, end));
        self
    }

    pub fn with_outdoor_window(mut self, start: &str, end: &str) -> Self {
        self.planting_windows.outdoors = Some(MonthRange::new(start, end));
        self
    }

    pub fn with_harvest(mut self, start: &str, end: &str) -> Self {
        self.harvest_time = Some(MonthRange::new(start, end));
        self
    }

    pub fn with_indoor_growth(mut self, days: u32) -> Self {
        self.days_indoor_growth = Some(days);
        self
    }

    pub fn with_hardening(mut self, days: u32) -> Self {
        self.hardening_days = Some(days);
        self
    }

    pub fn with_frost_tolerance(mut self, tolerant: bool) -> Self {
        self.frost_tolerant = Some(tolerant);
        self
    }

    pub fn with_transplant_window(mut self, start: &str, end: &str) -> Self {
        self.transplant_window = Some(MonthRange::new(start, end));
        self
    }

    pub fn parsed_category(&self) -> Option<PlantCategory> {
        self.category.as_deref().and_then(PlantCategory::from_str)
    }

    /// Label for messages: the name when present, otherwise the id.
    pub fn label(&self) -> String {
        if self.name.trim().is_empty() {
            format!("plant #{}", self.id)
        } else {
            self.name.clone()
        }
    }
}
