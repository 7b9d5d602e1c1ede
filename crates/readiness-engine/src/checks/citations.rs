//! Citation detection and advisory Bluebook lint.
//!
//! Candidates are the matched citation substrings themselves: a case name
//! extended through its cite and parenthetical, a volume-reporter-page cite,
//! a Westlaw or Lexis number, or a statute reference. Hashing the substring
//! rather than its surrounding sentence keeps an issue id, and therefore an
//! ignore choice, stable while the rest of the paragraph is edited. Every
//! finding here is a warning; citation style never blocks a filing.

use std::collections::BTreeSet;

use filing_types::{stable_id, Authority, Issue};

use crate::patterns::{
    CASE_NAME, CASE_NAME_BARE_V, COURT_YEAR_PAREN, LEXIS_CITE, PINCITE, REPORTER_CITE,
    STATUTE_REF, WL_CITE,
};

pub fn check(text: &str, authorities: &[Authority]) -> Vec<Issue> {
    let mut issues = Vec::new();
    let candidates = collect_candidates(text);

    for candidate in &candidates {
        lint_candidate(candidate, &mut issues);
    }

    if let Some(issue) = cross_check_authorities(&candidates, authorities) {
        issues.push(issue);
    }
    issues
}

/// Distinct citation substrings, in sorted order so output does not depend
/// on where in the draft a citation appears.
fn collect_candidates(text: &str) -> Vec<String> {
    let mut out: BTreeSet<String> = BTreeSet::new();
    for line in text.lines() {
        for span in citation_spans(line) {
            out.insert(span);
        }
    }
    out.into_iter().collect()
}

/// The citation spans of one line. A case name is extended through its
/// reporter cite, pincite, and `(Court Year)` parenthetical so the whole
/// citation is one candidate; cites and statute references outside a case
/// span stand alone.
fn citation_spans(line: &str) -> Vec<String> {
    let mut spans: Vec<(usize, usize)> = Vec::new();
    for m in CASE_NAME.find_iter(line) {
        spans.push((m.start(), case_citation_end(line, m.end())));
    }
    for m in REPORTER_CITE.find_iter(line) {
        if !covered(&spans, m.start(), m.end()) {
            let mut end = m.end();
            if let Some(p) = PINCITE.find(&line[end..]) {
                end += p.end();
            }
            spans.push((m.start(), end));
        }
    }
    for re in [&*WL_CITE, &*LEXIS_CITE, &*STATUTE_REF] {
        for m in re.find_iter(line) {
            if !covered(&spans, m.start(), m.end()) {
                spans.push((m.start(), m.end()));
            }
        }
    }
    spans.sort_unstable();
    spans
        .into_iter()
        .map(|(s, e)| {
            line[s..e]
                .trim_end_matches(|c| matches!(c, ',' | ';' | '.'))
                .to_string()
        })
        .filter(|s| !s.is_empty())
        .collect()
}

/// Extend a case-name match through the rest of the second party's name,
/// then through a trailing cite, pincite, and parenthetical when only
/// commas and whitespace separate them from the name.
fn case_citation_end(line: &str, name_end: usize) -> usize {
    let mut end = name_end;
    for (i, c) in line[name_end..].char_indices() {
        if c.is_alphanumeric() || matches!(c, '\'' | '.' | '-') {
            end = name_end + i + c.len_utf8();
        } else {
            break;
        }
    }
    if let Some(m) = REPORTER_CITE.find(&line[end..]) {
        if connector(&line[end..end + m.start()]) {
            end += m.end();
            if let Some(p) = PINCITE.find(&line[end..]) {
                end += p.end();
            }
        }
    } else if let Some(m) = WL_CITE
        .find(&line[end..])
        .or_else(|| LEXIS_CITE.find(&line[end..]))
    {
        if connector(&line[end..end + m.start()]) {
            end += m.end();
        }
    }
    if let Some(m) = COURT_YEAR_PAREN.find(&line[end..]) {
        if connector(&line[end..end + m.start()]) {
            end += m.end();
        }
    }
    end
}

/// Only commas and whitespace may separate the pieces of one citation.
fn connector(gap: &str) -> bool {
    gap.chars().all(|c| c == ',' || c.is_whitespace())
}

fn covered(spans: &[(usize, usize)], start: usize, end: usize) -> bool {
    spans.iter().any(|&(s, e)| start >= s && end <= e)
}

fn lint_candidate(candidate: &str, issues: &mut Vec<Issue>) {
    if CASE_NAME_BARE_V.is_match(candidate) {
        issues.push(
            Issue::warning(
                stable_id("citation_v_period", candidate),
                "Citation style: use \u{201C}v.\u{201D} in case names",
            )
            .with_detail(candidate.to_string()),
        );
    }

    let case_like = CASE_NAME.is_match(candidate)
        || REPORTER_CITE.is_match(candidate)
        || WL_CITE.is_match(candidate)
        || LEXIS_CITE.is_match(candidate);
    if case_like && !COURT_YEAR_PAREN.is_match(candidate) {
        issues.push(
            Issue::warning(
                stable_id("citation_parenthetical", candidate),
                "Citation may be missing its (Court Year) parenthetical",
            )
            .with_detail(candidate.to_string()),
        );
    }

    if let Some(m) = REPORTER_CITE.find(candidate) {
        if !PINCITE.is_match(&candidate[m.end()..]) {
            issues.push(
                Issue::warning(
                    stable_id("citation_pincite", candidate),
                    "Citation cites only the first page; consider a pincite",
                )
                .with_detail(candidate.to_string()),
            );
        }
    }
}

/// When the user keeps a pinned-authority list, flag candidates that match
/// none of them. Advisory only; an empty authority list disables the check.
fn cross_check_authorities(candidates: &[String], authorities: &[Authority]) -> Option<Issue> {
    if candidates.is_empty() || authorities.is_empty() {
        return None;
    }
    let pinned: Vec<String> = authorities
        .iter()
        .map(|a| normalize_citation(&a.citation))
        .filter(|c| !c.is_empty())
        .collect();

    let unmatched: Vec<&String> = candidates
        .iter()
        .filter(|candidate| {
            let normalized = normalize_citation(candidate);
            !pinned
                .iter()
                .any(|p| normalized.contains(p.as_str()) || p.contains(normalized.as_str()))
        })
        .collect();
    if unmatched.is_empty() {
        return None;
    }

    let joined = unmatched
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    let title = if unmatched.len() == 1 {
        "1 citation is not among the pinned authorities".to_string()
    } else {
        format!(
            "{} citations are not among the pinned authorities",
            unmatched.len()
        )
    };
    Some(
        Issue::warning(stable_id("authority_unpinned", &joined), title)
            .with_hint("Pin the authority to the case, or double-check the citation."),
    )
}

fn normalize_citation(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_v_in_case_name_is_flagged() {
        let issues = check("Smith v Jones", &[]);
        assert!(issues
            .iter()
            .any(|i| i.title.contains("use \u{201C}v.\u{201D} in case names")));
    }

    #[test]
    fn dotted_v_is_not_flagged_for_style() {
        let issues = check("Smith v. Jones, 410 U.S. 113, 115 (1973)", &[]);
        assert!(!issues.iter().any(|i| i.id.starts_with("citation_v_period:")));
    }

    #[test]
    fn missing_parenthetical_and_pincite_are_independent() {
        let issues = check("Roe v. Wade, 410 U.S. 113", &[]);
        let ids: Vec<&str> = issues.iter().map(|i| i.id.as_str()).collect();
        assert!(ids.iter().any(|id| id.starts_with("citation_parenthetical:")));
        assert!(ids.iter().any(|id| id.starts_with("citation_pincite:")));

        let complete = check("Roe v. Wade, 410 U.S. 113, 116 (1973)", &[]);
        assert!(complete.is_empty());
    }

    #[test]
    fn statute_reference_alone_is_not_a_case_citation() {
        let issues = check("Liability arises under \u{00A7} 768.28.", &[]);
        assert!(!issues
            .iter()
            .any(|i| i.id.starts_with("citation_parenthetical:")));
    }

    #[test]
    fn all_citation_findings_are_warnings() {
        let issues = check("Smith v Jones, 550 F.3d 640", &[]);
        assert!(!issues.is_empty());
        assert!(issues
            .iter()
            .all(|i| i.severity == filing_types::Severity::Warning));
    }

    #[test]
    fn unpinned_candidates_raise_one_advisory() {
        let authorities = vec![Authority {
            citation: "410 U.S. 113".into(),
            title: None,
            url: None,
        }];
        let text = "Roe v. Wade, 410 U.S. 113, 116 (1973)\nDoe v. Roe, 550 F.3d 640, 642 (7th Cir. 2008)";
        let issues = check(text, &authorities);
        let unpinned: Vec<&Issue> = issues
            .iter()
            .filter(|i| i.id.starts_with("authority_unpinned:"))
            .collect();
        assert_eq!(unpinned.len(), 1);
    }

    #[test]
    fn no_pinned_authorities_disables_the_cross_check() {
        let issues = check("Doe v. Roe, 550 F.3d 640, 642 (7th Cir. 2008)", &[]);
        assert!(!issues.iter().any(|i| i.id.starts_with("authority_unpinned:")));
    }

    #[test]
    fn issue_id_survives_edits_elsewhere_in_the_paragraph() {
        let before = check("The court held in Smith v Jones that discovery was due.", &[]);
        let after = check(
            "The court held in Smith v Jones that discovery was overdue.",
            &[],
        );
        let style_id = |issues: &[Issue]| {
            issues
                .iter()
                .find(|i| i.id.starts_with("citation_v_period:"))
                .map(|i| i.id.clone())
        };
        assert!(style_id(&before).is_some());
        assert_eq!(style_id(&before), style_id(&after));
    }

    #[test]
    fn candidate_is_the_citation_not_the_sentence() {
        let issues = check("The court held in Smith v Jones that discovery was due.", &[]);
        let style = issues
            .iter()
            .find(|i| i.id.starts_with("citation_v_period:"))
            .unwrap();
        assert_eq!(style.detail.as_deref(), Some("Smith v Jones"));
    }

    #[test]
    fn a_compliant_citation_does_not_mask_a_defective_neighbor() {
        let issues = check(
            "Compare Roe v. Wade, 410 U.S. 113, 116 (1973), with Smith v Jones.",
            &[],
        );
        assert!(issues.iter().any(|i| i.id.starts_with("citation_v_period:")));
        assert!(issues.iter().any(|i| {
            i.id.starts_with("citation_parenthetical:")
                && i.detail.as_deref() == Some("Smith v Jones")
        }));
    }

    #[test]
    fn findings_do_not_depend_on_candidate_position(){
        let a = check("Intro text.\nSmith v Jones\nMore text.", &[]);
        let b = check("Smith v Jones\nIntro text.\nMore text.", &[]);
        let ids_a: Vec<&str> = a.iter().map(|i| i.id.as_str()).collect();
        let ids_b: Vec<&str> = b.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids_a, ids_b);
    }
}
