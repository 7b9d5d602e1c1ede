//! Exhibit cross-references that do not resolve to a known exhibit.

use std::collections::BTreeSet;

use filing_types::{stable_id, Exhibit, Issue};

use crate::patterns::{EXHIBIT_CODE, EXHIBIT_WORD};

/// Canonical form of an exhibit label: upper-cased, prefix stripped, leading
/// zeros removed, so `EX-003`, `Exhibit 3`, and a stored label `3` all agree.
pub fn normalize_label(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    let stripped = ["EXHIBIT", "EX.", "EX-", "EX ", "C-"]
        .iter()
        .find_map(|p| upper.strip_prefix(p))
        .unwrap_or(&upper)
        .trim_matches(|c: char| c == ' ' || c == '.');
    let no_zeros = stripped.trim_start_matches('0');
    if no_zeros.is_empty() && !stripped.is_empty() {
        "0".to_string()
    } else {
        no_zeros.to_string()
    }
}

pub fn check(text: &str, exhibits: &[Exhibit]) -> Vec<Issue> {
    let mut known: BTreeSet<String> = BTreeSet::new();
    for exhibit in exhibits {
        if let Some(label) = &exhibit.label {
            known.insert(normalize_label(label));
        }
        if let Some(seq) = exhibit.sequence {
            known.insert(seq.to_string());
        }
    }

    let mut referenced: BTreeSet<String> = BTreeSet::new();
    for caps in EXHIBIT_WORD.captures_iter(text) {
        referenced.insert(normalize_label(&caps[1]));
    }
    for caps in EXHIBIT_CODE.captures_iter(text) {
        referenced.insert(normalize_label(&caps[1]));
    }

    let unresolved: Vec<String> = referenced.difference(&known).cloned().collect();
    if unresolved.is_empty() {
        return Vec::new();
    }

    let id = stable_id("exhibits", &unresolved.join("\n"));
    let title = if unresolved.len() == 1 {
        "1 exhibit reference has no matching exhibit".to_string()
    } else {
        format!(
            "{} exhibit references have no matching exhibit",
            unresolved.len()
        )
    };
    vec![Issue::warning(id, title)
        .with_detail(unresolved.join(", "))
        .with_hint("Add the exhibit to the case, or fix the reference in the draft.")
        .with_meta(serde_json::json!({ "labels": unresolved }))]
}
