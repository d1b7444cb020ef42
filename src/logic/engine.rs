use super::defaults::{builtin_tables, DefaultResolver, DefaultTables};
use super::recommendations;
use super::validation::classify_harvest_date;
use super::warnings::get_plant_warnings;
use crate::config::Config;
use crate::models::{Plant, PlantWarning, Recommendation, SowResult};
use chrono::{Local, NaiveDate};

/// Entry point for schedule calculation. Holds the read-only default tables
/// and the few settings that shape results; every method is pure apart from
/// reading the clock when no fixed "today" is set.
pub struct ScheduleEngine {
    tables: DefaultTables,
    fallback_hardening_days: u32,
    today: Option<NaiveDate>,
}

impl ScheduleEngine {
    pub fn new() -> Self {
        Self {
            tables: builtin_tables().clone(),
            fallback_hardening_days: 0,
            today: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            tables: DefaultTables::builtin().with_overrides(&config.defaults.subcategories),
            fallback_hardening_days: config.schedule.fallback_hardening_days,
            today: config.schedule.today,
        }
    }

    pub fn with_tables(mut self, tables: DefaultTables) -> Self {
        self.tables = tables;
        self
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn resolver(&self) -> DefaultResolver<'_> {
        DefaultResolver::new(&self.tables)
    }

    pub fn generate_recommendations(
        &self,
        plants: &[Plant],
        harvest_date_iso: &str,
    ) -> Vec<Recommendation> {
        recommendations::generate_recommendations(
            plants,
            harvest_date_iso,
            &self.resolver(),
            self.fallback_hardening_days,
        )
    }

    pub fn plant_sow_result(&self, harvest_date_iso: &str, plant: &Plant) -> Option<SowResult> {
        self.plant_sow_result_on(harvest_date_iso, plant, self.today())
    }

    pub fn plant_sow_result_on(
        &self,
        harvest_date_iso: &str,
        plant: &Plant,
        today: NaiveDate,
    ) -> Option<SowResult> {
        // Diagnostics surface through generate_recommendations.
        let method = self
            .resolver()
            .resolve_planting_method(plant, &mut Vec::new())
            .value;
        classify_harvest_date(harvest_date_iso, plant, method, today)
    }

    pub fn plant_warnings(&self, recommendation: &Recommendation, plant: &Plant) -> Vec<PlantWarning> {
        get_plant_warnings(
            recommendation,
            plant,
            &self.resolver(),
            self.fallback_hardening_days,
        )
    }
}

impl Default for ScheduleEngine {
    fn default() -> Self {
        Self::new()
    }
}
