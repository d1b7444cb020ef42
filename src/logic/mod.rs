pub mod calendar;
pub mod defaults;
pub mod engine;
pub mod recommendations;
pub mod sow_date;
pub mod validation;
pub mod warnings;
pub mod window;

pub use engine::ScheduleEngine;

use crate::models::{Plant, Recommendation};

/// Recommendations using the built-in default tables.
pub fn generate_recommendations(plants: &[Plant], harvest_date_iso: &str) -> Vec<Recommendation> {
    ScheduleEngine::new().generate_recommendations(plants, harvest_date_iso)
}
