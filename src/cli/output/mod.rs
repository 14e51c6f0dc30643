//! Output formatting module for CLI

pub mod json;
mod terminal;

pub use json::JsonOutput;
pub use terminal::TerminalOutput;

use crate::error::RulesClientError;
use crate::models::{PaginatedRulePacks, RuleFindingStatusCount};

/// Output format for listing commands
#[derive(Debug, Clone, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
}

/// Trait for rendering listing responses
pub trait ListingRenderer {
    fn render_detected_rules(&self, rules: &[String]) -> Result<String, RulesClientError>;

    fn render_status_counts(
        &self,
        counts: &[RuleFindingStatusCount],
    ) -> Result<String, RulesClientError>;

    fn render_rule_packs(&self, page: &PaginatedRulePacks) -> Result<String, RulesClientError>;
}

/// Renderer for `format`
pub fn renderer(format: &OutputFormat) -> Box<dyn ListingRenderer> {
    match format {
        OutputFormat::Terminal => Box::new(TerminalOutput::new()),
        OutputFormat::Json => Box::new(JsonOutput::new()),
    }
}
