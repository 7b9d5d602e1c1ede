//! Caption completeness: court, both party sides, case number.

use filing_types::{Intake, Issue, Party};

pub fn check(intake: &Intake, parties: &[Party]) -> Vec<Issue> {
    let mut issues = Vec::new();

    let has_court = [&intake.venue, &intake.jurisdiction, &intake.forum]
        .iter()
        .any(|v| v.as_deref().map(str::trim).is_some_and(|s| !s.is_empty()));
    if !has_court {
        issues.push(
            Issue::warning("caption:court_missing", "No court or venue on file")
                .with_hint("Add a venue or jurisdiction in case intake so the caption names the court."),
        );
    }

    if !parties.iter().any(Party::is_plaintiff_side) {
        issues.push(
            Issue::warning("caption:plaintiff_missing", "No plaintiff-side party on file")
                .with_hint("The caption will show [PLAINTIFF] until a plaintiff or petitioner is added."),
        );
    }
    if !parties.iter().any(Party::is_defendant_side) {
        issues.push(
            Issue::warning("caption:defendant_missing", "No defendant-side party on file")
                .with_hint("The caption will show [DEFENDANT] until a defendant or respondent is added."),
        );
    }

    let has_case_number = intake
        .case_number
        .as_deref()
        .map(str::trim)
        .is_some_and(|s| !s.is_empty());
    if !has_case_number {
        issues.push(
            Issue::warning("caption:case_number_missing", "No case number on file")
                .with_hint("Leave as-is only for a new filing that has not been assigned a number."),
        );
    }

    issues
}
