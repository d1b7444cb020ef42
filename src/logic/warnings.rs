//! Re-checks each date of a finished schedule against the window it belongs
//! to.

use super::calendar::{
    add_days, first_day_of_month, format_date, last_day_of_month, parse_iso_date,
};
use super::defaults::DefaultResolver;
use super::recommendations::plan_hardening;
use super::window::select_planting_window;
use crate::models::{
    DateType, MonthRange, Plant, PlantWarning, PlantingMethod, Recommendation, WarningType,
};
use chrono::{Datelike, NaiveDate};

/// Check every populated date of `recommendation` and collect a warning for
/// each one outside its window. A date that cannot be checked is skipped.
///
/// `fallback_hardening_days` must match the value the schedule was generated
/// with, since it decides how early hardening may start.
pub fn get_plant_warnings(
    recommendation: &Recommendation,
    plant: &Plant,
    resolver: &DefaultResolver,
    fallback_hardening_days: u32,
) -> Vec<PlantWarning> {
    let mut warnings = Vec::new();
    // Resolution diagnostics are already attached to the recommendation.
    let mut diagnostics = Vec::new();
    let windows = &plant.planting_windows;

    if let (Some(date), Some(window)) = (
        recommendation.outdoor_sow_date,
        select_planting_window(windows, Some(PlantingMethod::Outdoor)),
    ) {
        warnings.extend(check_date(plant.id, date, window, 0, DateType::OutdoorSow));
    }

    if let (Some(date), Some(window)) = (
        recommendation.indoor_sow_date,
        select_planting_window(windows, Some(PlantingMethod::Indoor)),
    ) {
        warnings.extend(check_date(plant.id, date, window, 0, DateType::IndoorSow));
    }

    if recommendation.harden_start_date.is_some() || recommendation.move_plant_outdoor_date.is_some()
    {
        if let Some(transplant) = resolver
            .resolve_transplant_window(plant, &mut diagnostics)
            .value
        {
            if let Some(date) = recommendation.harden_start_date {
                let hardening_days = match resolver
                    .resolve_days_indoor_growth(plant, &mut diagnostics)
                    .value
                {
                    Some(growth_days) => {
                        plan_hardening(
                            plant,
                            growth_days,
                            resolver,
                            fallback_hardening_days,
                            &mut diagnostics,
                        )
                        .days
                    }
                    None => resolver
                        .resolve_hardening_days(plant, &mut diagnostics)
                        .value
                        .unwrap_or(fallback_hardening_days),
                };
                warnings.extend(check_date(
                    plant.id,
                    date,
                    &transplant.window,
                    i64::from(hardening_days),
                    DateType::HardenStart,
                ));
            }
            if let Some(date) = recommendation.move_plant_outdoor_date {
                warnings.extend(check_date(
                    plant.id,
                    date,
                    &transplant.window,
                    0,
                    DateType::MovePlantOutdoor,
                ));
            }
        }
    }

    match (
        parse_iso_date(&recommendation.harvest_date_iso),
        plant.harvest_time.as_ref().filter(|w| !w.is_blank()),
    ) {
        (Some(date), Some(window)) => {
            warnings.extend(check_date(plant.id, date, window, 0, DateType::Harvest));
        }
        (None, _) => {
            tracing::debug!(
                plant_id = plant.id,
                "skipping harvest check for '{}'",
                recommendation.harvest_date_iso
            );
        }
        _ => {}
    }

    warnings
}

/// Compare `date` with `window` in the date's year. `lead_days` lets the
/// window open that many days early.
fn check_date(
    plant_id: i64,
    date: NaiveDate,
    window: &MonthRange,
    lead_days: i64,
    date_type: DateType,
) -> Option<PlantWarning> {
    let (start, end) = match window.months() {
        Ok(months) => months,
        Err(e) => {
            return Some(PlantWarning::new(
                plant_id,
                WarningType::OutsidePlantingWindow,
                format!(
                    "{} on {} cannot be placed in its window {}: {}",
                    date_type.label(),
                    format_date(date),
                    window,
                    e
                ),
                date,
                date_type,
            ));
        }
    };

    let opens = add_days(first_day_of_month(start, date.year())?, -lead_days)?;
    let closes = last_day_of_month(end, date.year())?;

    let (warning_type, message) = if date < opens {
        (
            WarningType::TooEarly,
            format!(
                "{} on {} is before the recommended window ({}, opening {}).",
                date_type.label(),
                format_date(date),
                window,
                format_date(opens)
            ),
        )
    } else if date > closes {
        (
            WarningType::TooLate,
            format!(
                "{} on {} is after the recommended window ({}, closing {}).",
                date_type.label(),
                format_date(date),
                window,
                format_date(closes)
            ),
        )
    } else {
        return None;
    };

    Some(PlantWarning::new(plant_id, warning_type, message, date, date_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::defaults::builtin_tables;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn resolver() -> DefaultResolver<'static> {
        DefaultResolver::new(builtin_tables())
    }

    fn tomato() -> Plant {
        Plant::new(1, "Tomato", "tomato")
            .with_method(PlantingMethod::Indoor)
            .with_indoor_window("mars", "april")
            .with_harvest("juli", "sept")
            .with_hardening(7)
            .with_frost_tolerance(false)
    }

    fn indoor_rec(
        sow: NaiveDate,
        harden: NaiveDate,
        moved: NaiveDate,
        harvest: &str,
    ) -> Recommendation {
        let mut rec = Recommendation::new(1, harvest);
        rec.indoor_sow_date = Some(sow);
        rec.harden_start_date = Some(harden);
        rec.move_plant_outdoor_date = Some(moved);
        rec
    }

    #[test]
    fn schedule_inside_all_windows_has_no_warnings() {
        // Transplant window for a frost-sensitive plant is May-June.
        let rec = indoor_rec(d(2026, 3, 20), d(2026, 4, 28), d(2026, 5, 5), "2026-07-15");
        assert!(get_plant_warnings(&rec, &tomato(), &resolver(), 0).is_empty());
    }

    #[test]
    fn hardening_may_start_before_transplant_window() {
        // May 1 minus 7 hardening days: April 24 is the earliest start.
        let ok = indoor_rec(d(2026, 3, 20), d(2026, 4, 24), d(2026, 5, 1), "2026-07-15");
        assert!(get_plant_warnings(&ok, &tomato(), &resolver(), 0).is_empty());

        let early = indoor_rec(d(2026, 3, 20), d(2026, 4, 23), d(2026, 5, 1), "2026-07-15");
        let warnings = get_plant_warnings(&early, &tomato(), &resolver(), 0);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].date_type, DateType::HardenStart);
        assert_eq!(warnings[0].warning_type, WarningType::TooEarly);
        assert_eq!(warnings[0].date, "2026-04-23");
    }

    #[test]
    fn transplant_before_window_is_too_early() {
        let rec = indoor_rec(d(2026, 3, 1), d(2026, 4, 12), d(2026, 4, 19), "2026-07-15");
        let warnings = get_plant_warnings(&rec, &tomato(), &resolver(), 0);
        let kinds: Vec<_> = warnings
            .iter()
            .map(|w| (w.date_type, w.warning_type))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (DateType::HardenStart, WarningType::TooEarly),
                (DateType::MovePlantOutdoor, WarningType::TooEarly),
            ]
        );
    }

    #[test]
    fn late_sow_and_harvest_are_too_late() {
        let rec = indoor_rec(d(2026, 5, 3), d(2026, 6, 14), d(2026, 6, 21), "2026-10-15");
        let warnings = get_plant_warnings(&rec, &tomato(), &resolver(), 0);
        assert!(warnings
            .iter()
            .any(|w| w.date_type == DateType::IndoorSow && w.warning_type == WarningType::TooLate));
        assert!(warnings
            .iter()
            .any(|w| w.date_type == DateType::Harvest && w.warning_type == WarningType::TooLate));
        assert!(warnings.iter().all(|w| w.plant_id == 1));
    }

    #[test]
    fn outdoor_sow_checked_against_outdoor_window() {
        let plant = Plant::new(2, "Carrot", "carrot")
            .with_method(PlantingMethod::Outdoor)
            .with_outdoor_window("mai", "juni")
            .with_harvest("august", "oktober");
        let mut rec = Recommendation::new(2, "2026-08-10");
        rec.outdoor_sow_date = Some(d(2026, 4, 20));
        let warnings = get_plant_warnings(&rec, &plant, &resolver(), 0);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].date_type, DateType::OutdoorSow);
        assert_eq!(warnings[0].warning_type, WarningType::TooEarly);
    }

    #[test]
    fn malformed_harvest_date_is_skipped() {
        let mut rec = indoor_rec(d(2026, 3, 20), d(2026, 4, 28), d(2026, 5, 5), "someday");
        rec.indoor_sow_date = Some(d(2026, 2, 1));
        let warnings = get_plant_warnings(&rec, &tomato(), &resolver(), 0);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].date_type, DateType::IndoorSow);
    }

    #[test]
    fn unusable_window_is_flagged() {
        let plant = tomato().with_harvest("november", "februar");
        let rec = indoor_rec(d(2026, 3, 20), d(2026, 4, 28), d(2026, 5, 5), "2026-12-01");
        let warnings = get_plant_warnings(&rec, &plant, &resolver(), 0);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].warning_type, WarningType::OutsidePlantingWindow);
        assert_eq!(warnings[0].date_type, DateType::Harvest);
    }

    #[test]
    fn hardening_lead_uses_fallback_days() {
        // No table entry: hardening comes from the 7-day fallback.
        let okra = Plant::new(3, "Okra", "okra")
            .with_indoor_window("mars", "april")
            .with_harvest("juli", "sept")
            .with_indoor_growth(61)
            .with_frost_tolerance(false);
        let mut rec = Recommendation::new(3, "2026-07-01");
        rec.indoor_sow_date = Some(d(2026, 3, 1));
        rec.harden_start_date = Some(d(2026, 4, 24));
        rec.move_plant_outdoor_date = Some(d(2026, 5, 1));
        assert!(get_plant_warnings(&rec, &okra, &resolver(), 7).is_empty());

        let warnings = get_plant_warnings(&rec, &okra, &resolver(), 0);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].date_type, DateType::HardenStart);
    }

    #[test]
    fn empty_recommendation_has_no_warnings() {
        let rec = Recommendation::new(1, "2026-07-15");
        assert!(get_plant_warnings(&rec, &tomato(), &resolver(), 0).is_empty());
    }
}
