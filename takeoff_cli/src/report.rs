//! Plain-text reports.

use std::collections::BTreeMap;
use std::fmt::{self, Write};

use takeoff_core::materials::{MaterialCategory, MaterialQuantity};
use takeoff_core::project::ProjectReport;
use takeoff_core::{ProjectEstimate, QualityTier};

const WIDTH: usize = 70;

/// Dollar amount with thousands separators, e.g. `$12,345.67`
pub fn money(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::new();
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, cents)
}

fn render(write: impl FnOnce(&mut String) -> fmt::Result) -> String {
    let mut out = String::new();
    write(&mut out).expect("writing to a String cannot fail");
    out
}

fn rule(out: &mut String, ch: char) -> fmt::Result {
    writeln!(out, "{}", ch.to_string().repeat(WIDTH))
}

fn heading(out: &mut String, title: &str) -> fmt::Result {
    rule(out, '=')?;
    writeln!(out, "  {}", title)?;
    rule(out, '=')
}

/// Rooms, skipped rooms and material totals grouped by category.
pub fn materials_report(report: &ProjectReport) -> String {
    render(|out| write_materials(out, report))
}

fn write_materials(out: &mut String, report: &ProjectReport) -> fmt::Result {
    heading(out, &format!("MATERIAL TAKEOFF: {}", report.project_name))?;

    writeln!(out, "Rooms:")?;
    for room in &report.takeoff.rooms {
        writeln!(
            out,
            "  {:<24} {:<12} {:>7.1} m² ({:.0} sq ft){}",
            room.name,
            room.room_type.display_name(),
            room.floor_area_m2,
            room.dimensions.floor_area_sqft(),
            if room.dimensions.is_estimated() { "  [estimated footprint]" } else { "" }
        )?;
    }
    for name in report.skipped_rooms() {
        writeln!(out, "  {:<24} [skipped: no readable dimensions]", name)?;
    }

    let mut by_category: BTreeMap<MaterialCategory, Vec<&MaterialQuantity>> = BTreeMap::new();
    for qty in report.totals.values() {
        by_category.entry(qty.category).or_default().push(qty);
    }

    for (category, items) in &by_category {
        writeln!(out)?;
        writeln!(out, "{}", category.display_name())?;
        rule(out, '-')?;
        for qty in items {
            writeln!(out, "  {:<30} {:>5} {:<10} {}", qty.name, qty.units_needed, qty.unit, qty.notes)?;
        }
    }

    if !report.takeoff.warnings.is_empty() {
        writeln!(out)?;
        writeln!(out, "Warnings:")?;
        for warning in &report.takeoff.warnings {
            writeln!(out, "  [WARN] {}", warning)?;
        }
    }
    rule(out, '=')
}

/// Priced lines, subtotals and notes.
pub fn cost_report(estimate: &ProjectEstimate) -> String {
    render(|out| write_cost(out, estimate))
}

fn write_cost(out: &mut String, estimate: &ProjectEstimate) -> fmt::Result {
    heading(out, &format!("COST ESTIMATE: {}", estimate.project_name))?;
    writeln!(out, "Generated: {}", estimate.timestamp.format("%Y-%m-%d %H:%M UTC"))?;
    writeln!(out, "Region:    {}", estimate.region.display_name())?;
    writeln!(out, "Tier:      {}", estimate.quality_tier.display_name())?;

    for (category, lines) in estimate.lines_by_category() {
        writeln!(out)?;
        writeln!(out, "{}", category.display_name())?;
        rule(out, '-')?;
        for line in lines {
            writeln!(out, "  {} ({})", line.display_name, line.quality_tier.code())?;
            writeln!(out, "    Brand example: {}", line.brand_example)?;
            writeln!(
                out,
                "    Quantity:      {} {} @ {}/{}",
                line.units_needed,
                line.unit,
                money(line.price_per_unit),
                line.unit
            )?;
            writeln!(out, "    Material:      {}", money(line.material_cost))?;
            if line.labor_cost > 0.0 {
                writeln!(out, "    Labor:         {}", money(line.labor_cost))?;
            }
            writeln!(out, "    Subtotal:      {}", money(line.total_cost))?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Summary")?;
    rule(out, '-')?;
    writeln!(out, "  Materials subtotal: {:>14}", money(estimate.materials_subtotal))?;
    writeln!(out, "  Labor subtotal:     {:>14}", money(estimate.labor_subtotal))?;
    writeln!(
        out,
        "  Contingency ({:.0}%): {:>13}",
        estimate.contingency_percent * 100.0,
        money(estimate.contingency_amount)
    )?;
    writeln!(out, "  TOTAL ESTIMATE:     {:>14}", money(estimate.grand_total))?;

    if !estimate.omitted_materials.is_empty() {
        writeln!(out)?;
        writeln!(out, "  [WARN] Not priced: {}", estimate.omitted_materials.join(", "))?;
    }

    writeln!(out)?;
    writeln!(out, "Notes")?;
    rule(out, '-')?;
    for note in &estimate.notes {
        writeln!(out, "  - {}", note)?;
    }
    rule(out, '=')
}

/// Grand total per tier with the step up from the cheapest tier.
pub fn tier_comparison_report(comparison: &BTreeMap<QualityTier, f64>) -> String {
    render(|out| write_tier_comparison(out, comparison))
}

fn write_tier_comparison(out: &mut String, comparison: &BTreeMap<QualityTier, f64>) -> fmt::Result {
    heading(out, "QUALITY TIER COMPARISON")?;
    writeln!(out, "  {:<12} {:>16} {:>16}", "Tier", "Total", "vs. Budget")?;
    rule(out, '-')?;

    let baseline = comparison.get(&QualityTier::Budget).copied();
    for (tier, total) in comparison {
        let delta = baseline.map(|b| money(total - b)).unwrap_or_default();
        writeln!(out, "  {:<12} {:>16} {:>16}", tier.display_name(), money(*total), delta)?;
    }
    rule(out, '=')
}
