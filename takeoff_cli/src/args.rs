//! CLI argument definitions using clap derive

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "takeoff")]
#[command(author, version, about = "Material quantities and cost estimates from room lists")]
#[command(long_about = "Reads a project JSON file (name, rooms, settings), computes material \
quantities per room, prices them, and prints a plain-text report or JSON. \
Without an input file a built-in demo house is used.")]
pub struct Cli {
    /// Project JSON file (default: built-in demo house)
    pub input: Option<PathBuf>,

    /// Override the project name
    #[arg(long)]
    pub project: Option<String>,

    /// Quality tier: budget, standard, premium, luxury
    #[arg(long, short = 't')]
    pub tier: Option<String>,

    /// Pricing region (e.g. us_national, us-west, northeast)
    #[arg(long, short = 'r')]
    pub region: Option<String>,

    /// Labor availability: shortage, average, surplus
    #[arg(long)]
    pub labor: Option<String>,

    /// Contingency as a fraction (0.10 = 10%)
    #[arg(long, short = 'c')]
    pub contingency: Option<f64>,

    /// Leave labor out of the estimate
    #[arg(long)]
    pub no_labor: bool,

    /// Ceiling height in meters
    #[arg(long)]
    pub ceiling_height: Option<f64>,

    /// Include batt insulation over wall area
    #[arg(long)]
    pub insulation: bool,

    /// Also print the quality tier comparison
    #[arg(long)]
    pub compare: bool,

    /// Print the full report as JSON instead of text
    #[arg(long)]
    pub json: bool,
}
