//! Upload command - Upload a rule pack file

use anyhow::{Context, Result};
use colored::Colorize;

use super::UploadArgs;
use crate::cli::exit_codes;
use crate::models::RuleFile;
use crate::providers::RulesApi;

pub async fn execute(api: &dyn RulesApi, args: &UploadArgs) -> Result<i32> {
    let rule_file = RuleFile::from_path(&args.file)
        .await
        .with_context(|| format!("Failed to read rule file '{}'", args.file.display()))?;

    if rule_file.is_empty() {
        eprintln!(
            "{} Rule file '{}' is empty",
            "Error:".red().bold(),
            args.file.display()
        );
        return Ok(exit_codes::INVALID_ARGS);
    }

    let response = api
        .upload_rule_pack(&rule_file)
        .await
        .context("Failed to upload rule pack")?;

    println!(
        "{} Uploaded {} ({} bytes)",
        "Success:".green().bold(),
        rule_file.file_name.cyan(),
        rule_file.len()
    );
    let body = response.text();
    if !body.trim().is_empty() {
        println!("{}", body.trim());
    }

    Ok(exit_codes::SUCCESS)
}
