mod cli;

use clap::Parser;
use cli::{Cli, Commands, HarvestArgs};
use serde::Serialize;
use sowplan::config::Config;
use sowplan::dataset::{load_plants, select_plants};
use sowplan::error::{Result, SowPlanError};
use sowplan::logic::calendar::parse_iso_date;
use sowplan::logic::ScheduleEngine;
use sowplan::models::{Month, Plant, PlantWarning, Recommendation, SowResult};
use tracing_subscriber::EnvFilter;

fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Months => {
            print_months();
            Ok(())
        }
        Commands::Init { path } => {
            let written = Config::write_default(path.as_deref())?;
            println!("Wrote {}", written.display());
            Ok(())
        }
        Commands::Schedule(args) => {
            let config = Config::load(cli.config.as_deref())?;
            let engine = ScheduleEngine::from_config(&config);
            let plants = plants_for(&config, cli.plants.as_deref(), &args)?;
            let recs = engine.generate_recommendations(&plants, &args.harvest_date);
            if args.json {
                print_json(&recs)
            } else {
                for (plant, rec) in plants.iter().zip(&recs) {
                    print_recommendation(plant, rec);
                }
                Ok(())
            }
        }
        Commands::Check { harvest, today } => {
            let config = Config::load(cli.config.as_deref())?;
            let mut engine = ScheduleEngine::from_config(&config);
            if let Some(today) = today {
                let date = parse_iso_date(&today).ok_or_else(|| {
                    SowPlanError::InvalidData(format!("Invalid --today date '{}'", today))
                })?;
                engine = engine.with_today(date);
            }
            let plants = plants_for(&config, cli.plants.as_deref(), &harvest)?;
            let results: Vec<CheckRow> = plants
                .iter()
                .map(|plant| CheckRow {
                    plant_id: plant.id,
                    result: engine.plant_sow_result(&harvest.harvest_date, plant),
                })
                .collect();
            if harvest.json {
                print_json(&results)
            } else {
                for (plant, row) in plants.iter().zip(&results) {
                    print_check(plant, row.result.as_ref(), &harvest.harvest_date);
                }
                Ok(())
            }
        }
        Commands::Warnings(args) => {
            let config = Config::load(cli.config.as_deref())?;
            let engine = ScheduleEngine::from_config(&config);
            let plants = plants_for(&config, cli.plants.as_deref(), &args)?;
            let recs = engine.generate_recommendations(&plants, &args.harvest_date);
            let warnings: Vec<PlantWarning> = plants
                .iter()
                .zip(&recs)
                .flat_map(|(plant, rec)| engine.plant_warnings(rec, plant))
                .collect();
            if args.json {
                print_json(&warnings)
            } else {
                print_warnings(&plants, &warnings);
                Ok(())
            }
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckRow {
    plant_id: i64,
    result: Option<SowResult>,
}

fn plants_for(
    config: &Config,
    cli_plants: Option<&std::path::Path>,
    args: &HarvestArgs,
) -> Result<Vec<Plant>> {
    let path = config.plants_path(cli_plants)?;
    select_plants(load_plants(&path)?, &args.plant_ids)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_months() {
    println!("{:>3}  {:<10} {:>4}", "#", "month", "days");
    for month in Month::all() {
        println!("{:>3}  {:<10} {:>4}", month.order(), month.as_str(), month.days());
    }
}

fn print_recommendation(plant: &Plant, rec: &Recommendation) {
    println!("{} (#{})  harvest {}", plant.label(), plant.id, rec.harvest_date_iso);
    let rows = [
        ("sow outdoors", rec.outdoor_sow_date),
        ("sow indoors", rec.indoor_sow_date),
        ("start hardening", rec.harden_start_date),
        ("move outdoors", rec.move_plant_outdoor_date),
    ];
    for (label, date) in rows {
        if let Some(date) = date {
            println!("  {:<16} {}", label, date);
        }
    }
    for warning in &rec.warnings {
        println!("  ! {}", warning);
    }
}

fn print_check(plant: &Plant, result: Option<&SowResult>, harvest_date_iso: &str) {
    println!("{}", check_line(plant, result, harvest_date_iso));
}

fn check_line(plant: &Plant, result: Option<&SowResult>, harvest_date_iso: &str) -> String {
    match result {
        Some(result) => {
            let marker = if result.key.is_warning() { "!" } else { " " };
            format!("{} {} (#{}): {}", marker, plant.label(), plant.id, result.message)
        }
        None if parse_iso_date(harvest_date_iso).is_none() => format!(
            "! {} (#{}): invalid harvest date '{}'",
            plant.label(),
            plant.id,
            harvest_date_iso
        ),
        None => format!(
            "! {} (#{}): cannot recommend: insufficient window data",
            plant.label(),
            plant.id
        ),
    }
}

fn print_warnings(plants: &[Plant], warnings: &[PlantWarning]) {
    if warnings.is_empty() {
        println!("All dates fall within their recommended windows.");
        return;
    }
    for warning in warnings {
        let label = plants
            .iter()
            .find(|p| p.id == warning.plant_id)
            .map(Plant::label)
            .unwrap_or_else(|| format!("plant #{}", warning.plant_id));
        println!(
            "{} [{}] {} {}: {}",
            label,
            warning.warning_type.as_str(),
            warning.date_type.label(),
            warning.date,
            warning.message
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_line_tells_bad_dates_from_missing_data() {
        let plant = Plant::new(3, "Okra", "okra");
        assert_eq!(
            check_line(&plant, None, "2026-13-01"),
            "! Okra (#3): invalid harvest date '2026-13-01'"
        );
        assert_eq!(
            check_line(&plant, None, "2026-07-15"),
            "! Okra (#3): cannot recommend: insufficient window data"
        );
    }
}
