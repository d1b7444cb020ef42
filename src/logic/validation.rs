//! Classification of a chosen harvest date against a plant's windows.

use super::calendar::{
    days_between, first_day_of_month, format_date, last_day_of_month, parse_iso_date,
};
use super::sow_date::{calculate_sow_date, try_anyway_sow_date, WindowDates};
use super::window::select_planting_window;
use crate::models::{MonthRange, Plant, PlantingMethod, SowResult, SowResultKey};
use chrono::{Datelike, Local, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPosition {
    Before,
    Within,
    After,
}

/// Where `date` falls relative to `window` in the date's own year.
pub fn harvest_window_position(date: NaiveDate, window: &MonthRange) -> Option<WindowPosition> {
    let (start, end) = window.months().ok()?;
    let first = first_day_of_month(start, date.year())?;
    let last = last_day_of_month(end, date.year())?;
    Some(if date < first {
        WindowPosition::Before
    } else if date > last {
        WindowPosition::After
    } else {
        WindowPosition::Within
    })
}

/// Classify `harvest_date_iso` for `plant`, taking today from the local clock.
pub fn get_plant_sow_result(harvest_date_iso: &str, plant: &Plant) -> Option<SowResult> {
    get_plant_sow_result_on(harvest_date_iso, plant, Local::now().date_naive())
}

pub fn get_plant_sow_result_on(
    harvest_date_iso: &str,
    plant: &Plant,
    today: NaiveDate,
) -> Option<SowResult> {
    classify_harvest_date(harvest_date_iso, plant, plant.planting_method, today)
}

/// Classify a harvest date with an already-resolved planting method.
///
/// Returns `None` when the date cannot be parsed or the plant lacks the
/// window data to compute a sow date.
pub fn classify_harvest_date(
    harvest_date_iso: &str,
    plant: &Plant,
    method: Option<PlantingMethod>,
    today: NaiveDate,
) -> Option<SowResult> {
    let Some(harvest_date) = parse_iso_date(harvest_date_iso) else {
        tracing::debug!(plant_id = plant.id, "unparseable harvest date '{}'", harvest_date_iso);
        return None;
    };

    if harvest_date <= today {
        return Some(SowResult::new(
            SowResultKey::HarvestDateInPast,
            format!(
                "The harvest date {} is not in the future. Choose a date after today.",
                format_date(harvest_date)
            ),
            None,
        ));
    }

    let harvest_window = plant.harvest_time.as_ref()?;
    let sow_date = calculate_sow_date(
        harvest_date,
        &plant.planting_windows,
        Some(harvest_window),
        method,
    )?;
    let planting_window = select_planting_window(&plant.planting_windows, method)?;
    let dates = WindowDates::for_year(planting_window, harvest_window, harvest_date.year())?;
    let position = harvest_window_position(harvest_date, harvest_window)?;
    let outside = position != WindowPosition::Within;

    let growing_days = days_between(sow_date, harvest_date);
    let too_close = growing_days < dates.min_maturity_days();
    let too_close_try_anyway = growing_days < dates.typical_maturity_days();

    let harvest = format_date(harvest_date);
    let sow = format_date(sow_date);
    let mut clauses = Vec::new();

    match position {
        WindowPosition::Before => clauses.push(format!(
            "{} is before the usual harvest window ({}). For the earliest harvest, sow on {}.",
            harvest, harvest_window, sow
        )),
        WindowPosition::After => clauses.push(format!(
            "{} is after the usual harvest window ({}). For the latest harvest, sow on {}.",
            harvest, harvest_window, sow
        )),
        WindowPosition::Within => {}
    }

    // Inside the window harvest is on or after the harvest window opens and
    // sowing is on or before the planting window closes, so there only the
    // typical-maturity check can fire.
    if too_close || (!outside && too_close_try_anyway) {
        clauses.push(if outside {
            format!(
                "Even then there is too little time for {} to mature by {}.",
                plant.label(),
                harvest
            )
        } else {
            format!(
                "There is too little time between sowing on {} and harvesting on {} for {} to mature.",
                sow,
                harvest,
                plant.label()
            )
        });
    }

    if too_close_try_anyway {
        if let Some(backward) = try_anyway_sow_date(
            harvest_date,
            &plant.planting_windows,
            Some(harvest_window),
            method,
        ) {
            clauses.push(if backward > today {
                format!(
                    "To try anyway, sow around {}; this will likely need extra effort such as a heated greenhouse.",
                    format_date(backward)
                )
            } else {
                format!(
                    "To try anyway you would have needed to sow around {}, which has passed; try another year.",
                    format_date(backward)
                )
            });
        }
    }

    let key = match position {
        _ if too_close => SowResultKey::HarvestTooClose,
        WindowPosition::Before => SowResultKey::BeforeHarvestWindow,
        WindowPosition::After => SowResultKey::AfterHarvestWindow,
        WindowPosition::Within if too_close_try_anyway => SowResultKey::HarvestTooClose,
        WindowPosition::Within => SowResultKey::HarvestDate,
    };

    let message = if clauses.is_empty() {
        format!("Sow on {} to harvest around {}.", sow, harvest)
    } else {
        clauses.join(" ")
    };

    Some(SowResult::new(key, message, Some(sow_date)))
}
