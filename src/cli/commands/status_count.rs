//! Status-count command - Finding status counts per rule

use anyhow::{Context, Result};

use super::StatusCountArgs;
use crate::cli::exit_codes;
use crate::cli::output::renderer;
use crate::models::RuleFindingStatusCount;
use crate::providers::RulesApi;

pub async fn execute(api: &dyn RulesApi, args: &StatusCountArgs) -> Result<i32> {
    let response = api
        .get_rules_with_finding_status_count(&args.rule_pack_versions, &args.tags)
        .await
        .context("Failed to fetch finding status counts")?;
    let counts: Vec<RuleFindingStatusCount> = response
        .json()
        .context("Unexpected finding status count response")?;

    println!("{}", renderer(&args.format).render_status_counts(&counts)?);
    Ok(exit_codes::SUCCESS)
}
