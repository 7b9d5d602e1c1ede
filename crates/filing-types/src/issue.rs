//! Readiness issues and their identity scheme.
//!
//! Issue ids are deterministic and content-addressed so that a user's
//! "ignore" choice, stored by id, survives edits to unrelated parts of the
//! document. Static defects use fixed literal ids; defects parameterized by
//! extracted text hash the offending content together with a defect-kind tag.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    pub severity: Severity,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl Issue {
    pub fn warning(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            severity: Severity::Warning,
            title: title.into(),
            detail: None,
            hint: None,
            meta: None,
        }
    }

    pub fn error(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            severity: Severity::Error,
            title: title.into(),
            detail: None,
            hint: None,
            meta: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_meta(mut self, meta: serde_json::Value) -> Self {
        self.meta = Some(meta);
        self
    }
}

/// Analyzer output: issues after the ignore filter, plus the full ignored-id
/// set so a caller can display "N ignored" and still offer un-ignore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessReport {
    pub issues: Vec<Issue>,
    pub ignored: Vec<String>,
}

/// Content-addressed issue id: `{kind}:{first 12 hex chars of sha256(content)}`.
pub fn stable_id(kind: &str, content: &str) -> String {
    let digest = Sha256::digest(content.as_bytes());
    format!("{}:{}", kind, &hex::encode(digest)[..12])
}
