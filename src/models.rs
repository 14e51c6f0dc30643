//! Value objects passed to and returned by the rules API

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use bytes::Bytes;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Review status of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FindingStatus {
    NotAnalyzed,
    UnderReview,
    ClarificationRequired,
    TruePositive,
    FalsePositive,
    NotAccessible,
    Outdated,
}

impl FindingStatus {
    pub const ALL: [FindingStatus; 7] = [
        FindingStatus::NotAnalyzed,
        FindingStatus::UnderReview,
        FindingStatus::ClarificationRequired,
        FindingStatus::TruePositive,
        FindingStatus::FalsePositive,
        FindingStatus::NotAccessible,
        FindingStatus::Outdated,
    ];

    /// Label used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingStatus::NotAnalyzed => "NOT_ANALYZED",
            FindingStatus::UnderReview => "UNDER_REVIEW",
            FindingStatus::ClarificationRequired => "CLARIFICATION_REQUIRED",
            FindingStatus::TruePositive => "TRUE_POSITIVE",
            FindingStatus::FalsePositive => "FALSE_POSITIVE",
            FindingStatus::NotAccessible => "NOT_ACCESSIBLE",
            FindingStatus::Outdated => "OUTDATED",
        }
    }
}

impl fmt::Display for FindingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FindingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_label(s);
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "unknown finding status '{}' (expected one of: {})",
                    s,
                    join_labels(Self::ALL.iter().map(FindingStatus::as_str))
                )
            })
    }
}

/// Version control system hosting a scanned repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VcsProvider {
    AzureDevops,
    Bitbucket,
    GithubPublic,
}

impl VcsProvider {
    pub const ALL: [VcsProvider; 3] = [
        VcsProvider::AzureDevops,
        VcsProvider::Bitbucket,
        VcsProvider::GithubPublic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VcsProvider::AzureDevops => "AZURE_DEVOPS",
            VcsProvider::Bitbucket => "BITBUCKET",
            VcsProvider::GithubPublic => "GITHUB_PUBLIC",
        }
    }
}

impl fmt::Display for VcsProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VcsProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_label(s);
        Self::ALL
            .into_iter()
            .find(|provider| provider.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "unknown VCS provider '{}' (expected one of: {})",
                    s,
                    join_labels(Self::ALL.iter().map(VcsProvider::as_str))
                )
            })
    }
}

// "not-analyzed", "Not Analyzed" and "NOT_ANALYZED" all map to the wire label
fn normalize_label(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            other => other.to_ascii_uppercase(),
        })
        .collect()
}

fn join_labels<'a>(labels: impl Iterator<Item = &'a str>) -> String {
    labels.collect::<Vec<_>>().join(", ")
}

/// Filters for listing detected rules
///
/// Empty lists and `None` values are left out of the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectedRulesFilter {
    pub finding_statuses: Vec<FindingStatus>,
    pub vcs_providers: Vec<VcsProvider>,
    pub project: Option<String>,
    pub repository: Option<String>,
    /// Inclusive, from the start of the day
    pub start_date: Option<NaiveDate>,
    /// Inclusive, up to the end of the day
    pub end_date: Option<NaiveDate>,
    pub rule_pack_versions: Vec<String>,
}

/// Start-of-day timestamp sent as `start_date_time`
pub fn start_of_day(date: NaiveDate) -> String {
    date.format("%Y-%m-%dT00:00:00").to_string()
}

/// End-of-day timestamp sent as `end_date_time`
pub fn end_of_day(date: NaiveDate) -> String {
    date.format("%Y-%m-%dT23:59:59").to_string()
}

/// A rule pack file held in memory for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleFile {
    pub file_name: String,
    pub bytes: Bytes,
}

impl RuleFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a rule pack from disk
    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "rule_file".to_string());
        Ok(Self::new(file_name, bytes))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Count of findings in one status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: FindingStatus,
    #[serde(default)]
    pub count: u64,
}

/// Per-rule finding totals returned by `/rules/finding-status-count`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleFindingStatusCount {
    pub rule_name: String,
    #[serde(default)]
    pub finding_count: u64,
    #[serde(default)]
    pub finding_statuses_count: Vec<StatusCount>,
}

/// A rule pack as listed by `/rules/rule-packs`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulePack {
    pub version: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub outdated: bool,
    #[serde(default)]
    pub global_allow_list: Option<i64>,
    #[serde(default)]
    pub created: Option<String>,
}

/// One page of rule packs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginatedRulePacks {
    #[serde(default)]
    pub data: Vec<RulePack>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub skip: u64,
}
