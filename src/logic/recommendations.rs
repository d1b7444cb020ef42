use super::calendar::{add_days, parse_iso_date};
use super::defaults::DefaultResolver;
use super::sow_date::calculate_sow_date;
use crate::models::{Diagnostic, Plant, PlantingMethod, Recommendation};
use chrono::NaiveDate;

/// One recommendation per plant, in input order. Never fails: problems end up
/// as warnings on the recommendation.
pub fn generate_recommendations(
    plants: &[Plant],
    harvest_date_iso: &str,
    resolver: &DefaultResolver,
    fallback_hardening_days: u32,
) -> Vec<Recommendation> {
    let Some(harvest_date) = parse_iso_date(harvest_date_iso) else {
        tracing::warn!("invalid harvest date '{}'", harvest_date_iso);
        return plants
            .iter()
            .map(|plant| {
                Recommendation::new(plant.id, harvest_date_iso).with_warning(format!(
                    "Invalid harvest date '{}'; no schedule calculated.",
                    harvest_date_iso
                ))
            })
            .collect();
    };

    plants
        .iter()
        .map(|plant| {
            recommend(
                plant,
                harvest_date,
                harvest_date_iso,
                resolver,
                fallback_hardening_days,
            )
        })
        .collect()
}

fn recommend(
    plant: &Plant,
    harvest_date: NaiveDate,
    harvest_date_iso: &str,
    resolver: &DefaultResolver,
    fallback_hardening_days: u32,
) -> Recommendation {
    let mut diagnostics = Vec::new();
    let mut rec = Recommendation::new(plant.id, harvest_date_iso);

    let method = resolver
        .resolve_planting_method(plant, &mut diagnostics)
        .value
        .unwrap_or(PlantingMethod::Indoor);

    match method {
        PlantingMethod::Outdoor => {
            rec.outdoor_sow_date = calculate_sow_date(
                harvest_date,
                &plant.planting_windows,
                plant.harvest_time.as_ref(),
                Some(PlantingMethod::Outdoor),
            );
            if rec.outdoor_sow_date.is_none() {
                rec.warnings.push(
                    "Insufficient planting or harvest window data to calculate an outdoor sow date."
                        .to_string(),
                );
            }
        }
        PlantingMethod::Indoor => {
            indoor_schedule(
                plant,
                harvest_date,
                resolver,
                fallback_hardening_days,
                &mut rec,
                &mut diagnostics,
            );
        }
    }

    rec.with_diagnostics(diagnostics)
}

fn indoor_schedule(
    plant: &Plant,
    harvest_date: NaiveDate,
    resolver: &DefaultResolver,
    fallback_hardening_days: u32,
    rec: &mut Recommendation,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let Some(sow_date) = calculate_sow_date(
        harvest_date,
        &plant.planting_windows,
        plant.harvest_time.as_ref(),
        Some(PlantingMethod::Indoor),
    ) else {
        rec.warnings.push(
            "Insufficient planting or harvest window data to calculate an indoor sow date."
                .to_string(),
        );
        return;
    };
    rec.indoor_sow_date = Some(sow_date);

    let Some(growth_days) = resolver.resolve_days_indoor_growth(plant, diagnostics).value else {
        rec.warnings.push(
            "Indoor growth days unknown; hardening and transplant dates not calculated."
                .to_string(),
        );
        return;
    };

    let hardening = plan_hardening(
        plant,
        growth_days,
        resolver,
        fallback_hardening_days,
        diagnostics,
    );
    if hardening.assumed {
        rec.warnings.push(format!(
            "Hardening days unknown; assuming {} days.",
            fallback_hardening_days
        ));
    }
    if let Some(requested) = hardening.capped_from {
        rec.warnings.push(format!(
            "Hardening days ({}) exceed indoor growth days ({}); hardening starts at sowing.",
            requested, growth_days
        ));
    }
    let hardening_days = hardening.days;

    // Hardening takes up the last `hardening_days` of the indoor period.
    rec.harden_start_date = add_days(sow_date, i64::from(growth_days - hardening_days));
    rec.move_plant_outdoor_date = add_days(sow_date, i64::from(growth_days));
}

/// Hardening days an indoor schedule actually uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HardeningPlan {
    pub days: u32,
    /// Nothing resolved; the fallback was used.
    pub assumed: bool,
    /// Value before it was capped at the indoor growth days.
    pub capped_from: Option<u32>,
}

/// Resolve hardening days, fall back to `fallback_days` and cap at
/// `growth_days`. Schedule generation and schedule checks both go through
/// here so they agree on when hardening may start.
pub fn plan_hardening(
    plant: &Plant,
    growth_days: u32,
    resolver: &DefaultResolver,
    fallback_days: u32,
    diagnostics: &mut Vec<Diagnostic>,
) -> HardeningPlan {
    let resolved = resolver.resolve_hardening_days(plant, diagnostics).value;
    let requested = resolved.unwrap_or(fallback_days);
    HardeningPlan {
        days: requested.min(growth_days),
        assumed: resolved.is_none(),
        capped_from: (requested > growth_days).then_some(requested),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::calendar::days_between;
    use crate::logic::defaults::{builtin_tables, DefaultTables};
    use crate::models::Attribute;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn run(plants: &[Plant], harvest: &str) -> Vec<Recommendation> {
        generate_recommendations(plants, harvest, &DefaultResolver::new(builtin_tables()), 0)
    }

    fn tomato() -> Plant {
        Plant::new(1, "Tomato", "tomato")
            .with_method(PlantingMethod::Indoor)
            .with_indoor_window("mars", "april")
            .with_harvest("juli", "sept")
            .with_indoor_growth(49)
            .with_hardening(7)
    }

    fn carrot() -> Plant {
        Plant::new(2, "Carrot", "carrot")
            .with_method(PlantingMethod::Outdoor)
            .with_indoor_window("", "")
            .with_outdoor_window("mai", "juni")
            .with_harvest("august", "oktober")
    }

    #[test]
    fn indoor_schedule_scenario() {
        let recs = run(&[tomato()], "2026-07-15");
        let rec = &recs[0];
        let sow = rec.indoor_sow_date.unwrap();
        assert!(sow >= d(2026, 3, 1) && sow <= d(2026, 4, 30));
        assert_eq!(rec.harden_start_date, add_days(sow, 42));
        assert_eq!(rec.move_plant_outdoor_date, add_days(sow, 49));
        assert_eq!(rec.outdoor_sow_date, None);
        assert!(rec.warnings.is_empty());
        assert_eq!(rec.harvest_date_iso, "2026-07-15");
    }

    #[test]
    fn indoor_invariants_hold() {
        let recs = run(&[tomato(), tomato().with_hardening(0)], "2026-08-20");
        for rec in &recs {
            let sow = rec.indoor_sow_date.unwrap();
            let harden = rec.harden_start_date.unwrap();
            let moved = rec.move_plant_outdoor_date.unwrap();
            assert!(harden <= moved);
            assert_eq!(days_between(sow, moved), 49);
        }
    }

    #[test]
    fn outdoor_path_sets_only_outdoor_date() {
        let recs = run(&[carrot()], "2026-08-01");
        let rec = &recs[0];
        assert_eq!(rec.outdoor_sow_date, Some(d(2026, 5, 1)));
        assert_eq!(rec.indoor_sow_date, None);
        assert_eq!(rec.harden_start_date, None);
        assert_eq!(rec.move_plant_outdoor_date, None);
    }

    #[test]
    fn missing_windows_warn_and_leave_dates_empty() {
        let outdoor = carrot().with_outdoor_window("", "juni");
        let indoor = tomato().with_harvest("juli", "");
        let recs = run(&[outdoor, indoor], "2026-08-01");
        for rec in &recs {
            assert!(!rec.has_schedule());
            assert_eq!(rec.warnings.len(), 1);
            assert!(rec.warnings[0].contains("Insufficient"));
        }
    }

    #[test]
    fn unknown_growth_days_stops_after_sow_date() {
        let plant = Plant::new(3, "Okra", "okra")
            .with_method(PlantingMethod::Indoor)
            .with_indoor_window("mars", "april")
            .with_harvest("juli", "sept");
        let recs = run(&[plant], "2026-07-15");
        let rec = &recs[0];
        assert!(rec.indoor_sow_date.is_some());
        assert_eq!(rec.harden_start_date, None);
        assert_eq!(rec.move_plant_outdoor_date, None);
        assert!(rec.warnings[0].contains("Indoor growth days unknown"));
        assert!(rec
            .diagnostics
            .iter()
            .any(|d| d.attribute == Attribute::DaysIndoorGrowth));
    }

    #[test]
    fn unknown_hardening_days_falls_back() {
        let plant = Plant::new(4, "Okra", "okra")
            .with_method(PlantingMethod::Indoor)
            .with_indoor_window("mars", "april")
            .with_harvest("juli", "sept")
            .with_indoor_growth(35);
        let resolver = DefaultResolver::new(builtin_tables());
        let recs = generate_recommendations(&[plant], "2026-07-15", &resolver, 5);
        let rec = &recs[0];
        let sow = rec.indoor_sow_date.unwrap();
        assert_eq!(rec.harden_start_date, add_days(sow, 30));
        assert_eq!(rec.move_plant_outdoor_date, add_days(sow, 35));
        assert_eq!(rec.warnings, vec!["Hardening days unknown; assuming 5 days."]);
    }

    #[test]
    fn hardening_longer_than_growth_is_capped() {
        let plant = tomato().with_indoor_growth(5).with_hardening(10);
        let recs = run(&[plant], "2026-07-15");
        let rec = &recs[0];
        assert_eq!(rec.harden_start_date, rec.indoor_sow_date);
        assert_eq!(rec.warnings.len(), 1);
    }

    #[test]
    fn hardening_plan_falls_back_and_caps() {
        let resolver = DefaultResolver::new(builtin_tables());
        let okra = Plant::new(6, "Okra", "okra").with_indoor_growth(20);
        let mut diagnostics = Vec::new();

        let plan = plan_hardening(&okra, 20, &resolver, 7, &mut diagnostics);
        assert_eq!(
            plan,
            HardeningPlan {
                days: 7,
                assumed: true,
                capped_from: None
            }
        );

        let plan = plan_hardening(&okra, 5, &resolver, 7, &mut diagnostics);
        assert_eq!(plan.days, 5);
        assert_eq!(plan.capped_from, Some(7));

        let plan = plan_hardening(&tomato(), 49, &resolver, 3, &mut diagnostics);
        assert_eq!(plan.days, 7);
        assert!(!plan.assumed);
    }

    #[test]
    fn method_resolved_from_subcategory() {
        let mut plant = carrot();
        plant.planting_method = None;
        let recs = run(&[plant], "2026-08-01");
        let rec = &recs[0];
        assert_eq!(rec.outdoor_sow_date, Some(d(2026, 5, 1)));
    }

    #[test]
    fn unresolved_method_takes_indoor_path() {
        let plant = Plant::new(5, "Unknown", "")
            .with_outdoor_window("mai", "juni")
            .with_harvest("august", "oktober")
            .with_indoor_growth(21)
            .with_hardening(7);
        let tables = DefaultTables::empty();
        let resolver = DefaultResolver::new(&tables);
        let recs = generate_recommendations(&[plant], "2026-08-01", &resolver, 0);
        let rec = &recs[0];
        assert_eq!(rec.indoor_sow_date, Some(d(2026, 5, 1)));
        assert_eq!(rec.outdoor_sow_date, None);
        assert!(!rec.diagnostics.is_empty());
    }

    #[test]
    fn invalid_harvest_date_yields_empty_recommendations() {
        let recs = run(&[tomato(), carrot()], "2026-13-45");
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].plant_id, 1);
        assert_eq!(recs[1].plant_id, 2);
        for rec in &recs {
            assert!(!rec.has_schedule());
            assert!(rec.warnings[0].contains("Invalid harvest date"));
        }
    }

    #[test]
    fn output_preserves_order_and_is_repeatable() {
        let plants = vec![carrot(), tomato(), carrot()];
        let first = run(&plants, "2026-08-20");
        let second = run(&plants, "2026-08-20");
        assert_eq!(first, second);
        let ids: Vec<_> = first.iter().map(|r| r.plant_id).collect();
        assert_eq!(ids, vec![2, 1, 2]);
    }
}
