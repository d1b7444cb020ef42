use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Plant attribute that default resolution can fill in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Attribute {
    PlantingMethod,
    HardeningDays,
    DaysIndoorGrowth,
    FrostTolerance,
    GerminationDays,
    GerminationTemperature,
    GrowingTemperature,
    TransplantWindow,
}

impl Attribute {
    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::PlantingMethod => "planting method",
            Attribute::HardeningDays => "hardening days",
            Attribute::DaysIndoorGrowth => "indoor growth days",
            Attribute::FrostTolerance => "frost tolerance",
            Attribute::GerminationDays => "germination days",
            Attribute::GerminationTemperature => "germination temperature",
            Attribute::GrowingTemperature => "growing temperature",
            Attribute::TransplantWindow => "transplant window",
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured record of a default that could not be resolved, or was
/// resolved with an assumption the caller should know about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub plant_id: i64,
    pub attribute: Attribute,
    pub message: String,
}

impl Diagnostic {
    pub fn new(plant_id: i64, attribute: Attribute, message: impl Into<String>) -> Self {
        Self {
            plant_id,
            attribute,
            message: message.into(),
        }
    }
}

/// Dated schedule for one plant and one harvest date.
///
/// Exactly one of the sow dates is set, matching the planting method. Null
/// fields mean "not applicable" to presentation code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub plant_id: i64,
    pub outdoor_sow_date: Option<NaiveDate>,
    pub indoor_sow_date: Option<NaiveDate>,
    pub harden_start_date: Option<NaiveDate>,
    pub move_plant_outdoor_date: Option<NaiveDate>,
    pub harvest_date_iso: String,
    pub warnings: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl Recommendation {
    pub fn new(plant_id: i64, harvest_date_iso: impl Into<String>) -> Self {
        Self {
            plant_id,
            outdoor_sow_date: None,
            indoor_sow_date: None,
            harden_start_date: None,
            move_plant_outdoor_date: None,
            harvest_date_iso: harvest_date_iso.into(),
            warnings: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: Vec<Diagnostic>) -> Self {
        self.diagnostics.extend(diagnostics);
        self
    }

    /// The populated sow date, whichever path produced it.
    pub fn sow_date(&self) -> Option<NaiveDate> {
        self.indoor_sow_date.or(self.outdoor_sow_date)
    }

    pub fn has_schedule(&self) -> bool {
        self.sow_date().is_some()
    }
}
