//! Unresolved bracketed placeholders left in the draft body.

use std::collections::BTreeSet;

use filing_types::{stable_id, Issue};

use crate::patterns::PLACEHOLDER;

/// Cap on distinct tokens reported; beyond this the list is noise.
const MAX_DISTINCT: usize = 25;

pub fn check(text: &str) -> Vec<Issue> {
    let mut found: BTreeSet<String> = BTreeSet::new();
    for m in PLACEHOLDER.find_iter(text) {
        found.insert(m.as_str().to_string());
        if found.len() >= MAX_DISTINCT {
            break;
        }
    }
    if found.is_empty() {
        return Vec::new();
    }

    // BTreeSet iteration is sorted, so the hash input is order-insensitive.
    let tokens: Vec<String> = found.into_iter().collect();
    let id = stable_id("placeholders", &tokens.join("\n"));
    let title = if tokens.len() == 1 {
        "1 unresolved placeholder in the draft".to_string()
    } else {
        format!("{} unresolved placeholders in the draft", tokens.len())
    };
    vec![Issue::warning(id, title)
        .with_detail(tokens.join(", "))
        .with_hint("Replace each bracketed token with the real value before filing.")
        .with_meta(serde_json::json!({ "tokens": tokens }))]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_raises_nothing() {
        assert!(check("The plaintiff moves to compel.").is_empty());
    }

    #[test]
    fn distinct_tokens_are_counted_once() {
        let issues = check("[PLAINTIFF] sued [DEFENDANT]; [PLAINTIFF] now moves.");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].title, "2 unresolved placeholders in the draft");
        assert_eq!(
            issues[0].detail.as_deref(),
            Some("[DEFENDANT], [PLAINTIFF]")
        );
    }

    #[test]
    fn id_is_insensitive_to_token_order() {
        let a = check("[ALPHA] then [BETA]");
        let b = check("[BETA] then [ALPHA]");
        assert_eq!(a[0].id, b[0].id);
    }

    #[test]
    fn id_changes_when_the_set_changes() {
        let a = check("[ALPHA]");
        let b = check("[ALPHA] and [GAMMA]");
        assert_ne!(a[0].id, b[0].id);
    }

    #[test]
    fn distinct_tokens_cap_at_twenty_five() {
        let text: String = (0..40).map(|i| format!("[TOKEN {}] ", i)).collect();
        let issues = check(&text);
        assert_eq!(
            issues[0].title,
            "25 unresolved placeholders in the draft"
        );
    }
}
