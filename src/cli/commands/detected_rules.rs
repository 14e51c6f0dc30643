//! Detected-rules command - List rules with findings matching the filters

use anyhow::{Context, Result};
use colored::Colorize;

use super::DetectedRulesArgs;
use crate::cli::exit_codes;
use crate::cli::output::renderer;
use crate::providers::RulesApi;

pub async fn execute(api: &dyn RulesApi, args: &DetectedRulesArgs) -> Result<i32> {
    let filter = args.filter();

    if let (Some(start), Some(end)) = (filter.start_date, filter.end_date) {
        if start > end {
            eprintln!(
                "{} --start-date {} is after --end-date {}",
                "Error:".red().bold(),
                start,
                end
            );
            return Ok(exit_codes::INVALID_ARGS);
        }
    }

    let response = api
        .get_all_detected_rules(&filter)
        .await
        .context("Failed to fetch detected rules")?;
    let rules: Vec<String> = response
        .json()
        .context("Unexpected detected rules response")?;

    println!("{}", renderer(&args.format).render_detected_rules(&rules)?);
    Ok(exit_codes::SUCCESS)
}
