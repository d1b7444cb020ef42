use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarningType {
    /// The window the date should be checked against is itself unusable.
    OutsidePlantingWindow,
    TooEarly,
    TooLate,
}

impl WarningType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningType::OutsidePlantingWindow => "outside-planting-window",
            WarningType::TooEarly => "too-early",
            WarningType::TooLate => "too-late",
        }
    }
}

impl std::fmt::Display for WarningType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which schedule date a warning is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateType {
    #[serde(rename = "outdoorSowDate")]
    OutdoorSow,
    #[serde(rename = "indoorSowDate")]
    IndoorSow,
    #[serde(rename = "hardenStartDate")]
    HardenStart,
    #[serde(rename = "movePlantOutdoorDate")]
    MovePlantOutdoor,
    #[serde(rename = "harvest")]
    Harvest,
}

impl DateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateType::OutdoorSow => "outdoorSowDate",
            DateType::IndoorSow => "indoorSowDate",
            DateType::HardenStart => "hardenStartDate",
            DateType::MovePlantOutdoor => "movePlantOutdoorDate",
            DateType::Harvest => "harvest",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DateType::OutdoorSow => "Outdoor sowing",
            DateType::IndoorSow => "Indoor sowing",
            DateType::HardenStart => "Hardening start",
            DateType::MovePlantOutdoor => "Transplanting outdoors",
            DateType::Harvest => "Harvest",
        }
    }
}

impl std::fmt::Display for DateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantWarning {
    pub plant_id: i64,
    pub warning_type: WarningType,
    pub message: String,
    pub date: String,
    pub date_type: DateType,
}

impl PlantWarning {
    pub fn new(
        plant_id: i64,
        warning_type: WarningType,
        message: impl Into<String>,
        date: NaiveDate,
        date_type: DateType,
    ) -> Self {
        Self {
            plant_id,
            warning_type,
            message: message.into(),
            date: date.format("%Y-%m-%d").to_string(),
            date_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_type_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&WarningType::OutsidePlantingWindow).unwrap(),
            "\"outside-planting-window\""
        );
        assert_eq!(
            serde_json::to_string(&WarningType::TooEarly).unwrap(),
            "\"too-early\""
        );
    }

    #[test]
    fn date_type_serializes_field_names() {
        for date_type in [
            DateType::OutdoorSow,
            DateType::IndoorSow,
            DateType::HardenStart,
            DateType::MovePlantOutdoor,
            DateType::Harvest,
        ] {
            assert_eq!(
                serde_json::to_string(&date_type).unwrap(),
                format!("\"{}\"", date_type.as_str())
            );
        }
    }

    #[test]
    fn plant_warning_formats_date() {
        let warning = PlantWarning::new(
            2,
            WarningType::TooLate,
            "late",
            NaiveDate::from_ymd_opt(2026, 6, 9).unwrap(),
            DateType::MovePlantOutdoor,
        );
        assert_eq!(warning.date, "2026-06-09");
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["warningType"], "too-late");
        assert_eq!(json["dateType"], "movePlantOutdoorDate");
    }
}
