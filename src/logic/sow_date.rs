//! Harvest date to sow date mapping.
//!
//! The harvest window and the planting window are treated as two intervals of
//! possibly different lengths. A harvest date's position inside the harvest
//! window is scaled onto the same relative position inside the planting
//! window. Harvest dates outside the harvest window are clamped to its nearer
//! edge, so the result always lies inside the planting window.

use super::calendar::{
    add_days, days_between, first_day_of_month, last_day_of_month, range_span,
};
use super::window::select_planting_window;
use crate::models::{MonthRange, Plant, PlantingMethod, PlantingWindows};
use chrono::{Datelike, NaiveDate};

/// Concrete first/last days of a planting window and a harvest window in
/// one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowDates {
    pub planting_start: NaiveDate,
    pub planting_end: NaiveDate,
    pub harvest_start: NaiveDate,
    pub harvest_end: NaiveDate,
}

impl WindowDates {
    pub fn for_year(planting: &MonthRange, harvest: &MonthRange, year: i32) -> Option<Self> {
        let (planting_start, planting_end) = planting.months().ok()?;
        let (harvest_start, harvest_end) = harvest.months().ok()?;
        Some(Self {
            planting_start: first_day_of_month(planting_start, year)?,
            planting_end: last_day_of_month(planting_end, year)?,
            harvest_start: first_day_of_month(harvest_start, year)?,
            harvest_end: last_day_of_month(harvest_end, year)?,
        })
    }

    /// Days from the planting window's end to the harvest window's start:
    /// the shortest growing time the windows allow.
    pub fn min_maturity_days(&self) -> i64 {
        days_between(self.planting_end, self.harvest_start)
    }

    /// Days from the planting window's start to the harvest window's start.
    pub fn typical_maturity_days(&self) -> i64 {
        days_between(self.planting_start, self.harvest_start)
    }
}

fn usable(range: Option<&MonthRange>) -> Option<&MonthRange> {
    range.filter(|r| !r.is_blank())
}

/// Proportionally map `harvest_date` onto the applicable planting window.
///
/// Returns `None` when either window is missing, blank, unparseable or wraps
/// the year, or when the planting window spans zero days.
pub fn calculate_sow_date(
    harvest_date: NaiveDate,
    planting_windows: &PlantingWindows,
    harvest_window: Option<&MonthRange>,
    method: Option<PlantingMethod>,
) -> Option<NaiveDate> {
    let harvest_window = usable(harvest_window)?;
    let planting_window = select_planting_window(planting_windows, method)?;

    let planting_span = match range_span(planting_window) {
        Ok(span) => span,
        Err(e) => {
            tracing::debug!(window = %planting_window, "unusable planting window: {}", e);
            return None;
        }
    };
    let harvest_span = match range_span(harvest_window) {
        Ok(span) => span,
        Err(e) => {
            tracing::debug!(window = %harvest_window, "unusable harvest window: {}", e);
            return None;
        }
    };
    if planting_span == 0 {
        return None;
    }

    let year = harvest_date.year();
    let dates = WindowDates::for_year(planting_window, harvest_window, year)?;

    let scale_factor = f64::from(harvest_span) / f64::from(planting_span);
    let harvest_offset =
        days_between(dates.harvest_start, harvest_date).clamp(0, i64::from(harvest_span));
    let sow_offset = (harvest_offset as f64 / scale_factor).round() as i64;

    let sow_date = add_days(dates.planting_start, sow_offset)?;
    // The inclusive span puts the far edge one day past the window.
    Some(sow_date.min(dates.planting_end))
}

/// [`calculate_sow_date`] using the plant's own windows and method.
pub fn calculate_plant_sow_date(harvest_date: NaiveDate, plant: &Plant) -> Option<NaiveDate> {
    calculate_sow_date(
        harvest_date,
        &plant.planting_windows,
        plant.harvest_time.as_ref(),
        plant.planting_method,
    )
}

/// Backward estimate for off-season attempts: subtract the usual time from
/// planting-window start to harvest-window start from the harvest date.
///
/// Earlier than the proportional result; following it typically needs extra
/// effort such as a heated greenhouse.
pub fn try_anyway_sow_date(
    harvest_date: NaiveDate,
    planting_windows: &PlantingWindows,
    harvest_window: Option<&MonthRange>,
    method: Option<PlantingMethod>,
) -> Option<NaiveDate> {
    let harvest_window = usable(harvest_window)?;
    let planting_window = select_planting_window(planting_windows, method)?;
    let dates = WindowDates::for_year(planting_window, harvest_window, harvest_date.year())?;
    let maturity_days = dates.typical_maturity_days().max(0);
    add_days(harvest_date, -maturity_days)
}

pub fn calculate_try_anyway_sow_date(harvest_date: NaiveDate, plant: &Plant) -> Option<NaiveDate> {
    try_anyway_sow_date(
        harvest_date,
        &plant.planting_windows,
        plant.harvest_time.as_ref(),
        plant.planting_method,
    )
}
