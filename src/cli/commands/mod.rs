//! CLI commands module

pub mod detected_rules;
pub mod download;
pub mod init;
pub mod rule_packs;
pub mod status_count;
pub mod upload;

use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;

use super::output::OutputFormat;
use crate::models::{DetectedRulesFilter, FindingStatus, VcsProvider};

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Retries per request written to the configuration
    #[arg(long, value_name = "N")]
    pub retries: Option<u32>,

    /// Where to write the configuration (defaults to ./.resc-rules.toml)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for the detected-rules command
#[derive(Args, Debug)]
pub struct DetectedRulesArgs {
    /// Finding status to include (repeatable)
    #[arg(long = "status", value_name = "STATUS")]
    pub statuses: Vec<FindingStatus>,

    /// VCS provider to include (repeatable)
    #[arg(long = "vcs", value_name = "PROVIDER")]
    pub vcs_providers: Vec<VcsProvider>,

    /// Project name filter
    #[arg(long, value_name = "NAME")]
    pub project: Option<String>,

    /// Repository name filter
    #[arg(long, value_name = "NAME")]
    pub repository: Option<String>,

    /// Only findings detected on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub start_date: Option<NaiveDate>,

    /// Only findings detected on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub end_date: Option<NaiveDate>,

    /// Rule pack version (repeatable)
    #[arg(long = "rule-pack-version", value_name = "VERSION")]
    pub rule_pack_versions: Vec<String>,

    /// Output format (terminal, json)
    #[arg(short, long, default_value = "terminal")]
    pub format: OutputFormat,
}

impl DetectedRulesArgs {
    pub fn filter(&self) -> DetectedRulesFilter {
        DetectedRulesFilter {
            finding_statuses: self.statuses.clone(),
            vcs_providers: self.vcs_providers.clone(),
            project: self.project.clone(),
            repository: self.repository.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            rule_pack_versions: self.rule_pack_versions.clone(),
        }
    }
}

/// Arguments for the status-count command
#[derive(Args, Debug)]
pub struct StatusCountArgs {
    /// Rule pack version (repeatable)
    #[arg(long = "rule-pack-version", value_name = "VERSION")]
    pub rule_pack_versions: Vec<String>,

    /// Rule tag (repeatable)
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Output format (terminal, json)
    #[arg(short, long, default_value = "terminal")]
    pub format: OutputFormat,
}

/// Arguments for the rule-packs command
#[derive(Args, Debug)]
pub struct RulePacksArgs {
    /// Page size
    #[arg(long, value_name = "N")]
    pub per_page: Option<u32>,

    /// Rows to skip
    #[arg(long, value_name = "N")]
    pub skip: Option<u32>,

    /// Output format (terminal, json)
    #[arg(short, long, default_value = "terminal")]
    pub format: OutputFormat,
}

/// Arguments for the upload command
#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Rule pack file to upload
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Arguments for the download command
#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Rule pack version to download
    #[arg(id = "rule_pack_version", value_name = "VERSION")]
    pub version: String,

    /// Output file (defaults to the server-provided name, then
    /// RuleFile-<VERSION>.toml)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}
