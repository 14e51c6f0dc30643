//! JSON output formatting

use crate::error::RulesClientError;
use serde::Serialize;

use super::ListingRenderer;
use crate::models::{PaginatedRulePacks, RuleFindingStatusCount};

pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }

    fn pretty<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, RulesClientError> {
        serde_json::to_string_pretty(value).map_err(Into::into)
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingRenderer for JsonOutput {
    fn render_detected_rules(&self, rules: &[String]) -> Result<String, RulesClientError> {
        self.pretty(rules)
    }

    fn render_status_counts(
        &self,
        counts: &[RuleFindingStatusCount],
    ) -> Result<String, RulesClientError> {
        self.pretty(counts)
    }

    fn render_rule_packs(&self, page: &PaginatedRulePacks) -> Result<String, RulesClientError> {
        self.pretty(page)
    }
}
