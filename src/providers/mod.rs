//! # Providers Module
//!
//! This module handles integrations with external services, here the RESC
//! rules API.
//!
//! ## Rules API
//!
//! The [`rules`] module provides [`rules::RuleService`], which implements
//! [`RulesApi`] for:
//!
//! - Listing detected rules with finding filters
//! - Per-rule finding status counts
//! - Listing, uploading and downloading rule packs
//!
//! ## Examples
//!
//! ```rust,no_run
//! use resc_rules::providers::{rules::RuleService, RulesApi};
//! use resc_rules::transport::TransportConfig;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let service = RuleService::new(TransportConfig::new("http://localhost:8000/resc/v1")?)?;
//! let response = service.get_rule_packs(Some(10), Some(0)).await?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! ```

pub mod rules;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::models::{DetectedRulesFilter, RuleFile};
use crate::transport::ApiResponse;

/// Operations offered by the rules backend
///
/// Every call performs one logical request and hands back the raw response.
/// Bodies are not parsed or validated.
#[async_trait]
pub trait RulesApi: Send + Sync {
    /// `GET /detected-rules`
    async fn get_all_detected_rules(
        &self,
        filter: &DetectedRulesFilter,
    ) -> Result<ApiResponse, TransportError>;

    /// `GET /rules/finding-status-count`
    async fn get_rules_with_finding_status_count(
        &self,
        rule_pack_versions: &[String],
        rule_tags: &[String],
    ) -> Result<ApiResponse, TransportError>;

    /// `GET /rules/rule-packs`
    async fn get_rule_packs(
        &self,
        per_page: Option<u32>,
        skip_row_count: Option<u32>,
    ) -> Result<ApiResponse, TransportError>;

    /// `POST /rules/upload-rule-pack`
    async fn upload_rule_pack(&self, rule_file: &RuleFile) -> Result<ApiResponse, TransportError>;

    /// `GET /rules/download-rule-pack`
    async fn download_rule_pack(
        &self,
        rule_pack_version: &str,
    ) -> Result<ApiResponse, TransportError>;
}
