//! Filing settings: the optional certificate-of-service, notary, and
//! proposed-order sections, plus the analyzer ignore list.
//!
//! Each sub-section is independently optional, and enabling a section does
//! not imply its fields are populated; that gap is exactly what the
//! readiness analyzer reports on.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilingSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notary: Option<NotarySettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proposed_order: Option<ProposedOrderSettings>,
    #[serde(default)]
    pub ignored_issue_ids: BTreeSet<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub default_method: Option<ServiceMethod>,
    #[serde(default)]
    pub recipients: Vec<ServiceRecipient>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecipient {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub method: Option<ServiceMethod>,
    #[serde(default)]
    pub details: Option<String>,
}

/// Fixed method-code enum for service of process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceMethod {
    Mail,
    CertifiedMail,
    Email,
    Efile,
    Hand,
    Fax,
}

impl ServiceMethod {
    /// Human-readable label rendered into the certificate of service.
    pub fn label(&self) -> &'static str {
        match self {
            ServiceMethod::Mail => "U.S. Mail",
            ServiceMethod::CertifiedMail => "Certified Mail",
            ServiceMethod::Email => "Email",
            ServiceMethod::Efile => "Electronic Filing",
            ServiceMethod::Hand => "Hand Delivery",
            ServiceMethod::Fax => "Fax",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotarySettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, rename = "type")]
    pub kind: Option<NotaryKind>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub notary_name: Option<String>,
    #[serde(default)]
    pub commission_expires: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotaryKind {
    Jurat,
    Acknowledgment,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposedOrderSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub judge_name: Option<String>,
    #[serde(default)]
    pub judge_title: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

// ---------------------------------------------------------------------------
// Patches
//
// Each sub-section is shallow-merged field by field; array fields
// (`recipients`) and the ignore set are replaced wholesale, never merged
// element-wise.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilingSettingsPatch {
    #[serde(default)]
    pub service: Option<ServicePatch>,
    #[serde(default)]
    pub notary: Option<NotaryPatch>,
    #[serde(default)]
    pub proposed_order: Option<ProposedOrderPatch>,
    #[serde(default)]
    pub ignored_issue_ids: Option<BTreeSet<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePatch {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub default_method: Option<ServiceMethod>,
    #[serde(default)]
    pub recipients: Option<Vec<ServiceRecipient>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotaryPatch {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default, rename = "type")]
    pub kind: Option<NotaryKind>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub notary_name: Option<String>,
    #[serde(default)]
    pub commission_expires: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposedOrderPatch {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub judge_name: Option<String>,
    #[serde(default)]
    pub judge_title: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl FilingSettings {
    /// Apply a partial update. A patch touching one sub-section must not
    /// drop unrelated fields of that sub-section.
    pub fn apply_patch(&mut self, patch: FilingSettingsPatch) {
        if let Some(p) = patch.service {
            let s = self.service.get_or_insert_with(Default::default);
            if let Some(enabled) = p.enabled {
                s.enabled = enabled;
            }
            if let Some(date) = p.date {
                s.date = Some(date);
            }
            if let Some(method) = p.default_method {
                s.default_method = Some(method);
            }
            if let Some(recipients) = p.recipients {
                s.recipients = recipients;
            }
        }
        if let Some(p) = patch.notary {
            let n = self.notary.get_or_insert_with(Default::default);
            if let Some(enabled) = p.enabled {
                n.enabled = enabled;
            }
            if let Some(kind) = p.kind {
                n.kind = Some(kind);
            }
            if let Some(state) = p.state {
                n.state = Some(state);
            }
            if let Some(county) = p.county {
                n.county = Some(county);
            }
            if let Some(date) = p.date {
                n.date = Some(date);
            }
            if let Some(name) = p.notary_name {
                n.notary_name = Some(name);
            }
            if let Some(exp) = p.commission_expires {
                n.commission_expires = Some(exp);
            }
        }
        if let Some(p) = patch.proposed_order {
            let o = self.proposed_order.get_or_insert_with(Default::default);
            if let Some(enabled) = p.enabled {
                o.enabled = enabled;
            }
            if let Some(title) = p.title {
                o.title = Some(title);
            }
            if let Some(name) = p.judge_name {
                o.judge_name = Some(name);
            }
            if let Some(title) = p.judge_title {
                o.judge_title = Some(title);
            }
            if let Some(date) = p.date {
                o.date = Some(date);
            }
        }
        if let Some(ids) = patch.ignored_issue_ids {
            self.ignored_issue_ids = ids;
        }
    }
}
