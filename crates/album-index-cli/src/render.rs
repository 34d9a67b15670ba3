use album_index_core::stats::format_valuation;
use album_index_core::StatsReport;
use anyhow::Result;
use colored::*;
use std::io;

pub fn print_table(report: &StatsReport) {
    for (group, bucket) in report.groups() {
        println!("{}", group.bold().cyan());
        println!("  Albums    : {}", bucket.album_count);
        println!("  Items     : {}", bucket.item_count);
        println!("  Valuation : {} €", format_valuation(bucket.valuation_sum));
    }
    let total = report.total();
    println!();
    println!("{} {}", "Total albums    :".bold(), total.album_count.to_string().green());
    println!("{} {}", "Total items     :".bold(), total.item_count.to_string().green());
    println!(
        "{} {} €",
        "Total valuation :".bold(),
        report.formatted_total_valuation().green()
    );
}

pub fn print_json(report: &StatsReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// One row per group followed by a `Total` row.
pub fn print_csv(report: &StatsReport) -> Result<()> {
    let mut writer = csv::Writer::from_writer(io::stdout());
    writer.write_record(["group", "albums", "items", "valuation"])?;
    for (group, bucket) in report.groups() {
        writer.write_record([
            group.clone(),
            bucket.album_count.to_string(),
            bucket.item_count.to_string(),
            format_valuation(bucket.valuation_sum),
        ])?;
    }
    let total = report.total();
    writer.write_record([
        "Total".to_string(),
        total.album_count.to_string(),
        total.item_count.to_string(),
        report.formatted_total_valuation(),
    ])?;
    writer.flush()?;
    Ok(())
}
