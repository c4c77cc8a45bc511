//! # Takeoff CLI Application
//!
//! Command-line front end for `takeoff_core`: reads a project file (or uses a
//! built-in demo house), runs the takeoff and estimate, and prints text
//! reports or JSON.
//!
//! Logging goes to stderr; set `RUST_LOG=debug` for engine detail.

mod args;
mod report;

use std::fs;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use takeoff_core::project::{analyze, ProjectInput};
use takeoff_core::{EstimateError, EstimateResult, LaborAvailability, QualityTier, Region, RoomInput, UnitSystem};

use args::Cli;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
}

/// Demo plan with mixed units and one unreadable room.
fn demo_project() -> ProjectInput {
    ProjectInput::new("Demo House").with_rooms([
        RoomInput::with_dimensions("Living Room", "15'", "20'").unit(UnitSystem::Imperial),
        RoomInput::with_area("Kitchen", "168 sq ft"),
        RoomInput::with_dimensions("Dining Room", "12'-6\"", "14'-0\""),
        RoomInput::with_dimensions("Master Bedroom", "14'", "16'"),
        RoomInput::with_area("Master Bathroom", "80 sq ft"),
        RoomInput::with_dimensions("Bedroom 2", "3,5", "4,2").unit(UnitSystem::Metric),
        RoomInput::with_area("Bedroom 3", "120").unit(UnitSystem::Imperial),
        RoomInput::with_area("Powder Room", "30 sq ft"),
        RoomInput::with_area("Laundry", "see plan"),
    ])
}

fn load_project(cli: &Cli) -> EstimateResult<ProjectInput> {
    let mut input = match &cli.input {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|e| {
                EstimateError::invalid_input("input", path.display().to_string(), e.to_string())
            })?;
            ProjectInput::from_json(&text)?
        }
        None => demo_project(),
    };

    if let Some(name) = &cli.project {
        input.name = name.clone();
    }
    if let Some(tier) = &cli.tier {
        input.estimator.quality_tier = QualityTier::from_str_flexible(tier)?;
    }
    if let Some(region) = &cli.region {
        input.estimator.region = Region::from_str_flexible(region)?;
    }
    if let Some(labor) = &cli.labor {
        input.estimator.labor_availability = LaborAvailability::from_str_flexible(labor)?;
    }
    if let Some(percent) = cli.contingency {
        input.estimator.contingency_percent = percent;
    }
    if cli.no_labor {
        input.estimator.include_labor = false;
    }
    if let Some(height) = cli.ceiling_height {
        input.calculator.ceiling_height_m = height;
    }
    if cli.insulation {
        input.calculator.include_insulation = true;
    }

    Ok(input)
}

fn run(cli: &Cli) -> EstimateResult<()> {
    let input = load_project(cli)?;
    info!(project = %input.name, rooms = input.rooms.len(), "analyzing project");

    let report = analyze(&input)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print!("{}", report::materials_report(&report));
    println!();
    print!("{}", report::cost_report(&report.estimate));
    if cli.compare {
        println!();
        print!("{}", report::tier_comparison_report(&report.tier_comparison));
    }

    if let Some(room) = report.takeoff.rooms.first() {
        let ceiling_ft = room.dimensions.height_m * takeoff_core::units::FEET_PER_METER;
        println!();
        println!("Ceiling height: {:.2} m ({:.1} ft); wall areas exclude openings.", room.dimensions.height_m, ceiling_ft);
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use takeoff_core::DimensionParser;

    #[test]
    fn test_demo_project_parses() {
        let input = demo_project();
        let readable = input
            .rooms
            .iter()
            .filter(|r| {
                DimensionParser::resolve(r.width.as_deref(), r.length.as_deref(), r.area.as_deref(), r.unit, 2.4)
                    .is_some()
            })
            .count();
        assert_eq!(readable, input.rooms.len() - 1);
    }

    #[test]
    fn test_flags_override_project() {
        let cli = Cli::parse_from(["takeoff", "--tier", "luxury", "--region", "west", "--labor", "low", "--no-labor"]);
        let input = load_project(&cli).unwrap();
        assert_eq!(input.estimator.quality_tier, QualityTier::Luxury);
        assert_eq!(input.estimator.region, Region::UsWest);
        assert_eq!(input.estimator.labor_availability, LaborAvailability::Shortage);
        assert!(!input.estimator.include_labor);
    }

    #[test]
    fn test_unknown_region_fails() {
        let cli = Cli::parse_from(["takeoff", "--region", "atlantis"]);
        let err = load_project(&cli).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIG");
    }

    #[test]
    fn test_missing_file_fails() {
        let cli = Cli::parse_from(["takeoff", "/nonexistent/house.json"]);
        assert_eq!(load_project(&cli).unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_demo_runs_end_to_end() {
        let report = analyze(&demo_project()).unwrap();
        assert_eq!(report.skipped_rooms(), ["Laundry".to_string()]);
        assert_eq!(report.takeoff.rooms.len(), 8);
    }
}
