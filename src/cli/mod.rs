//! # CLI Module
//!
//! This module defines the command-line interface for resc-rules using `clap`.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `init` | Write a configuration file |
//! | `detected-rules` | List rules with findings matching the filters |
//! | `status-count` | Finding status counts per rule |
//! | `rule-packs` | List rule packs |
//! | `upload` | Upload a rule pack file |
//! | `download` | Download a rule pack archive |
//!
//! ## Global Options
//!
//! - `-v, --verbose` - Increase verbosity level (use multiple times: -v, -vv, -vvv)
//! - `-c, --config <FILE>` - Path to configuration file
//! - `--base-url <URL>` - Rules API base URL (also `RESC_API_URL`)
//!
//! ## Examples
//!
//! ```bash
//! resc-rules detected-rules --status NOT_ANALYZED --vcs AZURE_DEVOPS --start-date 2023-01-01
//! resc-rules rule-packs --per-page 20 --skip 40 --format json
//! resc-rules download 0.0.3 -o rules-0.0.3.toml
//! ```

pub mod commands;
pub mod exit_codes;
pub mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{
    DetectedRulesArgs, DownloadArgs, InitArgs, RulePacksArgs, StatusCountArgs, UploadArgs,
};

use crate::config::Config;
use crate::providers::rules::RuleService;

/// resc-rules - Query and manage rules on a RESC backend
#[derive(Parser, Debug)]
#[command(name = "resc-rules")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Rules API base URL (overrides the configuration file)
    #[arg(long, global = true, env = "RESC_API_URL", value_name = "URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a configuration file
    Init(InitArgs),

    /// List detected rules matching finding filters
    DetectedRules(DetectedRulesArgs),

    /// Show finding status counts per rule
    StatusCount(StatusCountArgs),

    /// List rule packs
    RulePacks(RulePacksArgs),

    /// Upload a rule pack file
    Upload(UploadArgs),

    /// Download a rule pack archive
    Download(DownloadArgs),
}

impl Cli {
    /// Load the configuration named by `--config`, or discover one
    pub fn load_config(&self) -> Result<Config> {
        let config = match &self.config {
            Some(path) => Config::load_from_file(path)?,
            None => Config::load_or_default()?,
        };
        Ok(config)
    }

    /// Build a rule service from configuration and overrides
    pub fn rule_service(&self) -> Result<RuleService> {
        let config = self.load_config()?;
        let transport = config.transport_config(self.base_url.as_deref())?;
        tracing::info!(base_url = %transport.base_url, retries = transport.retries, "using rules API");
        Ok(RuleService::new(transport)?)
    }
}

/// Run the parsed command and return the process exit code
pub async fn run(cli: Cli) -> Result<i32> {
    match &cli.command {
        Commands::Init(args) => commands::init::execute(args, cli.base_url.as_deref()).await,
        Commands::DetectedRules(args) => {
            commands::detected_rules::execute(&cli.rule_service()?, args).await
        }
        Commands::StatusCount(args) => {
            commands::status_count::execute(&cli.rule_service()?, args).await
        }
        Commands::RulePacks(args) => {
            commands::rule_packs::execute(&cli.rule_service()?, args).await
        }
        Commands::Upload(args) => commands::upload::execute(&cli.rule_service()?, args).await,
        Commands::Download(args) => {
            commands::download::execute(&cli.rule_service()?, args).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FindingStatus, VcsProvider};
    use chrono::NaiveDate;

    #[test]
    fn test_parse_detected_rules() {
        let cli = Cli::try_parse_from([
            "resc-rules",
            "detected-rules",
            "--status",
            "not-analyzed",
            "--status",
            "TRUE_POSITIVE",
            "--vcs",
            "AZURE_DEVOPS",
            "--start-date",
            "2023-01-01",
            "--rule-pack-version",
            "1.0.0",
        ])
        .unwrap();

        let Commands::DetectedRules(args) = cli.command else {
            panic!("expected detected-rules");
        };
        let filter = args.filter();
        assert_eq!(
            filter.finding_statuses,
            vec![FindingStatus::NotAnalyzed, FindingStatus::TruePositive]
        );
        assert_eq!(filter.vcs_providers, vec![VcsProvider::AzureDevops]);
        assert_eq!(filter.start_date, NaiveDate::from_ymd_opt(2023, 1, 1));
        assert_eq!(filter.end_date, None);
        assert_eq!(filter.rule_pack_versions, vec!["1.0.0".to_string()]);
    }

    #[test]
    fn test_parse_rejects_bad_date() {
        let result = Cli::try_parse_from([
            "resc-rules",
            "detected-rules",
            "--start-date",
            "01/31/2023",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_status() {
        let result = Cli::try_parse_from(["resc-rules", "detected-rules", "--status", "resolved"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_base_url() {
        let cli = Cli::try_parse_from([
            "resc-rules",
            "rule-packs",
            "--base-url",
            "http://localhost:1234",
        ])
        .unwrap();
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:1234"));
    }
}
