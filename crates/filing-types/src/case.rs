//! Case metadata handed to the core by the surrounding CRUD system.
//!
//! These rows are read-only inputs here; their lifecycle (creation, editing,
//! deletion) belongs to the case-management layer.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Party {
    pub role: String,
    pub name: String,
}

impl Party {
    /// Plaintiff-side roles for caption purposes.
    pub fn is_plaintiff_side(&self) -> bool {
        matches!(
            self.role.to_lowercase().as_str(),
            "plaintiff" | "petitioner"
        )
    }

    /// Defendant-side roles for caption purposes.
    pub fn is_defendant_side(&self) -> bool {
        matches!(
            self.role.to_lowercase().as_str(),
            "defendant" | "respondent"
        )
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Exhibit {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub sequence: Option<u32>,
    #[serde(default)]
    pub title: Option<String>,
}

/// A legal authority the user has pinned to the case (cited source of law).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Authority {
    pub citation: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Intake record: where and under what number the case lives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Intake {
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub jurisdiction: Option<String>,
    #[serde(default)]
    pub forum: Option<String>,
    #[serde(default)]
    pub case_number: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn party_role_matching_is_case_insensitive() {
        let p = Party {
            role: "Petitioner".into(),
            name: "Jane Doe".into(),
        };
        assert!(p.is_plaintiff_side());
        assert!(!p.is_defendant_side());

        let d = Party {
            role: "RESPONDENT".into(),
            name: "Acme Corp".into(),
        };
        assert!(d.is_defendant_side());
    }

    #[test]
    fn unrelated_roles_match_neither_side() {
        let w = Party {
            role: "witness".into(),
            name: "Bob".into(),
        };
        assert!(!w.is_plaintiff_side());
        assert!(!w.is_defendant_side());
    }
}
