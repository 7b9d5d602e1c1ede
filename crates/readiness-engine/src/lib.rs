//! Filing readiness analyzer.
//!
//! Runs a fixed sequence of detectors over a draft's extracted text and the
//! surrounding case data, then filters the result against the user's ignore
//! list. Analysis is pure: same input, same report, and detector order never
//! affects issue identity.

pub mod checks;
pub mod patterns;

use filing_types::{
    extract_plain_text, Authority, Block, Exhibit, FilingSettings, Intake, Party, ReadinessReport,
};

/// Everything one analyze call looks at. Owned snapshot, no shared state.
#[derive(Debug, Default)]
pub struct AnalyzeInput {
    pub blocks: Option<Vec<Block>>,
    pub plain_text: Option<String>,
    pub intake: Intake,
    pub parties: Vec<Party>,
    pub exhibits: Vec<Exhibit>,
    pub authorities: Vec<Authority>,
    pub filing: FilingSettings,
}

impl AnalyzeInput {
    /// Text the content detectors scan: the structured document when present,
    /// the stored plain text otherwise.
    fn text(&self) -> String {
        match &self.blocks {
            Some(blocks) if !blocks.is_empty() => extract_plain_text(blocks),
            _ => self.plain_text.clone().unwrap_or_default(),
        }
    }
}

pub struct ReadinessEngine;

impl ReadinessEngine {
    pub fn analyze(input: &AnalyzeInput) -> ReadinessReport {
        let text = input.text();

        let mut issues = Vec::new();
        issues.extend(checks::caption::check(&input.intake, &input.parties));
        issues.extend(checks::placeholders::check(&text));
        issues.extend(checks::exhibits::check(&text, &input.exhibits));
        issues.extend(checks::citations::check(&text, &input.authorities));
        issues.extend(checks::sections::check(&input.filing));

        // The ignore filter is a set difference applied after detection, so
        // an ignored id keeps tracking the same underlying content.
        let ignored_set = &input.filing.ignored_issue_ids;
        let ignored: Vec<String> = ignored_set.iter().cloned().collect();
        issues.retain(|issue| !ignored_set.contains(&issue.id));

        ReadinessReport { issues, ignored }
    }
}
