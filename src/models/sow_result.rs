use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Closed set of outcomes when a harvest date is checked against a plant.
/// Presentation code switches on these keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SowResultKey {
    #[serde(rename = "harvestDate")]
    HarvestDate,
    #[serde(rename = "harvestDateInPast")]
    HarvestDateInPast,
    #[serde(rename = "harvestToClose")]
    HarvestTooClose,
    #[serde(rename = "harvestDateBeforeHarvestWindow")]
    BeforeHarvestWindow,
    #[serde(rename = "harvestDateAfterHarvestWindow")]
    AfterHarvestWindow,
}

impl SowResultKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SowResultKey::HarvestDate => "harvestDate",
            SowResultKey::HarvestDateInPast => "harvestDateInPast",
            SowResultKey::HarvestTooClose => "harvestToClose",
            SowResultKey::BeforeHarvestWindow => "harvestDateBeforeHarvestWindow",
            SowResultKey::AfterHarvestWindow => "harvestDateAfterHarvestWindow",
        }
    }

    pub fn is_warning(&self) -> bool {
        !matches!(self, SowResultKey::HarvestDate)
    }
}

impl std::fmt::Display for SowResultKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SowResult {
    pub key: SowResultKey,
    pub message: String,
    pub sow_date_iso: Option<String>,
}

impl SowResult {
    pub fn new(key: SowResultKey, message: impl Into<String>, sow_date: Option<NaiveDate>) -> Self {
        Self {
            key,
            message: message.into(),
            sow_date_iso: sow_date.map(|d| d.format("%Y-%m-%d").to_string()),
        }
    }

    pub fn sow_date(&self) -> Option<NaiveDate> {
        self.sow_date_iso
            .as_deref()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_serializes_to_stable_names() {
        let json = serde_json::to_string(&SowResultKey::HarvestTooClose).unwrap();
        assert_eq!(json, "\"harvestToClose\"");
        let json = serde_json::to_string(&SowResultKey::BeforeHarvestWindow).unwrap();
        assert_eq!(json, "\"harvestDateBeforeHarvestWindow\"");
    }

    #[test]
    fn key_as_str_matches_serde() {
        for key in [
            SowResultKey::HarvestDate,
            SowResultKey::HarvestDateInPast,
            SowResultKey::HarvestTooClose,
            SowResultKey::BeforeHarvestWindow,
            SowResultKey::AfterHarvestWindow,
        ] {
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.as_str()));
        }
    }

    #[test]
    fn sow_result_formats_iso_date() {
        let result = SowResult::new(
            SowResultKey::HarvestDate,
            "ok",
            NaiveDate::from_ymd_opt(2026, 3, 5),
        );
        assert_eq!(result.sow_date_iso.as_deref(), Some("2026-03-05"));
        assert_eq!(result.sow_date(), NaiveDate::from_ymd_opt(2026, 3, 5));
        assert!(!result.key.is_warning());
    }
}
