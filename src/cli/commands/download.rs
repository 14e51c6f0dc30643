//! Download command - Save a rule pack archive

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

use super::DownloadArgs;
use crate::cli::exit_codes;
use crate::providers::RulesApi;

pub async fn execute(api: &dyn RulesApi, args: &DownloadArgs) -> Result<i32> {
    let response = api
        .download_rule_pack(&args.version)
        .await
        .with_context(|| format!("Failed to download rule pack {}", args.version))?;

    let target = match &args.output {
        Some(path) => path.clone(),
        None => default_file_name(response.attachment_file_name().as_deref(), &args.version),
    };

    tokio::fs::write(&target, response.body())
        .await
        .with_context(|| format!("Failed to write '{}'", target.display()))?;

    println!(
        "{} Saved rule pack {} to {} ({} bytes)",
        "Success:".green().bold(),
        args.version.yellow(),
        target.display().to_string().cyan(),
        response.body().len()
    );

    Ok(exit_codes::SUCCESS)
}

/// Server-provided name without directory parts, else `RuleFile-<version>.toml`
pub fn default_file_name(attachment: Option<&str>, version: &str) -> PathBuf {
    attachment
        .and_then(|name| Path::new(name).file_name())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(format!("RuleFile-{}.toml", version)))
}
