//! Terminal output formatting with colors

use crate::error::RulesClientError;
use colored::Colorize;

use super::ListingRenderer;
use crate::models::{FindingStatus, PaginatedRulePacks, RuleFindingStatusCount};

pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }

    fn format_header(&self, title: &str) -> String {
        format!("\n{}\n{}\n\n", "━".repeat(50).dimmed(), format!("  {}", title).bold())
    }

    fn format_status(&self, status: FindingStatus) -> String {
        match status {
            FindingStatus::TruePositive => status.as_str().red().bold().to_string(),
            FindingStatus::NotAnalyzed | FindingStatus::UnderReview => {
                status.as_str().yellow().to_string()
            }
            FindingStatus::ClarificationRequired => status.as_str().magenta().to_string(),
            FindingStatus::FalsePositive | FindingStatus::Outdated => {
                status.as_str().green().to_string()
            }
            FindingStatus::NotAccessible => status.as_str().dimmed().to_string(),
        }
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingRenderer for TerminalOutput {
    fn render_detected_rules(&self, rules: &[String]) -> Result<String, RulesClientError> {
        let mut output = self.format_header("DETECTED RULES");

        if rules.is_empty() {
            output.push_str(&format!("  {}\n", "No rules matched the filters.".green()));
            return Ok(output);
        }

        for rule in rules {
            output.push_str(&format!("  {} {}\n", "•".dimmed(), rule.cyan()));
        }
        output.push_str(&format!("\nTotal: {}\n", rules.len().to_string().bold()));

        Ok(output)
    }

    fn render_status_counts(
        &self,
        counts: &[RuleFindingStatusCount],
    ) -> Result<String, RulesClientError> {
        let mut output = self.format_header("FINDINGS PER RULE");

        if counts.is_empty() {
            output.push_str(&format!("  {}\n", "No rules found.".green()));
            return Ok(output);
        }

        for rule in counts {
            output.push_str(&format!(
                "  {} {} ({})\n",
                "•".dimmed(),
                rule.rule_name.cyan(),
                rule.finding_count.to_string().bold()
            ));
            for status_count in rule.finding_statuses_count.iter().filter(|s| s.count > 0) {
                output.push_str(&format!(
                    "      {} {}: {}\n",
                    "└─".dimmed(),
                    self.format_status(status_count.status),
                    status_count.count
                ));
            }
        }

        let total: u64 = counts.iter().map(|r| r.finding_count).sum();
        output.push_str(&format!(
            "\nRules: {} │ Findings: {}\n",
            counts.len().to_string().bold(),
            total.to_string().bold()
        ));

        Ok(output)
    }

    fn render_rule_packs(&self, page: &PaginatedRulePacks) -> Result<String, RulesClientError> {
        let mut output = self.format_header("RULE PACKS");

        if page.data.is_empty() {
            output.push_str(&format!("  {}\n", "No rule packs found.".yellow()));
            return Ok(output);
        }

        for pack in &page.data {
            let marker = if pack.active {
                "active".green().bold().to_string()
            } else if pack.outdated {
                "outdated".dimmed().to_string()
            } else {
                "inactive".yellow().to_string()
            };
            output.push_str(&format!(
                "  {} {} [{}]",
                "•".dimmed(),
                pack.version.cyan(),
                marker
            ));
            if let Some(created) = &pack.created {
                output.push_str(&format!(" {}", created.dimmed()));
            }
            output.push('\n');
        }

        let first = page.skip.saturating_add(1);
        let last = page.skip.saturating_add(page.data.len() as u64);
        output.push_str(&format!(
            "\nShowing {}-{} of {}\n",
            first,
            last,
            page.total.max(last)
        ));

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RulePack, StatusCount};

    #[test]
    fn test_render_detected_rules_empty() {
        let output = TerminalOutput::new().render_detected_rules(&[]).unwrap();
        assert!(output.contains("No rules matched"));
    }

    #[test]
    fn test_render_detected_rules_lists_names() {
        let rules = vec!["aws-access-token".to_string(), "slack-webhook".to_string()];
        let output = TerminalOutput::new().render_detected_rules(&rules).unwrap();
        assert!(output.contains("aws-access-token"));
        assert!(output.contains("slack-webhook"));
    }

    #[test]
    fn test_render_status_counts_skips_zero_counts() {
        let counts = vec![RuleFindingStatusCount {
            rule_name: "private-key".to_string(),
            finding_count: 2,
            finding_statuses_count: vec![
                StatusCount {
                    status: FindingStatus::TruePositive,
                    count: 2,
                },
                StatusCount {
                    status: FindingStatus::Outdated,
                    count: 0,
                },
            ],
        }];
        let output = TerminalOutput::new().render_status_counts(&counts).unwrap();
        assert!(output.contains("private-key"));
        assert!(output.contains("TRUE_POSITIVE"));
        assert!(!output.contains("OUTDATED"));
    }

    #[test]
    fn test_render_rule_packs_range() {
        let page = PaginatedRulePacks {
            data: vec![
                RulePack {
                    version: "0.0.2".to_string(),
                    active: false,
                    outdated: true,
                    global_allow_list: None,
                    created: None,
                },
                RulePack {
                    version: "0.0.3".to_string(),
                    active: true,
                    outdated: false,
                    global_allow_list: None,
                    created: Some("2023-02-01T10:00:00".to_string()),
                },
            ],
            total: 12,
            limit: 2,
            skip: 4,
        };
        let output = TerminalOutput::new().render_rule_packs(&page).unwrap();
        assert!(output.contains("Showing 5-6 of 12"));
        assert!(output.contains("0.0.3"));
    }

    #[test]
    fn test_render_rule_packs_huge_skip() {
        let page = PaginatedRulePacks {
            data: vec![RulePack {
                version: "0.0.1".to_string(),
                active: false,
                outdated: false,
                global_allow_list: None,
                created: None,
            }],
            total: 1,
            limit: 1,
            skip: u64::MAX,
        };
        let output = TerminalOutput::new().render_rule_packs(&page).unwrap();
        assert!(output.contains(&format!("Showing {0}-{0} of {0}", u64::MAX)));
    }
}
