//! Rule-packs command - List rule packs

use anyhow::{Context, Result};

use super::RulePacksArgs;
use crate::cli::exit_codes;
use crate::cli::output::renderer;
use crate::models::PaginatedRulePacks;
use crate::providers::RulesApi;

pub async fn execute(api: &dyn RulesApi, args: &RulePacksArgs) -> Result<i32> {
    let response = api
        .get_rule_packs(args.per_page, args.skip)
        .await
        .context("Failed to list rule packs")?;
    let page: PaginatedRulePacks = response
        .json()
        .context("Unexpected rule pack listing response")?;

    println!("{}", renderer(&args.format).render_rule_packs(&page)?);
    Ok(exit_codes::SUCCESS)
}
