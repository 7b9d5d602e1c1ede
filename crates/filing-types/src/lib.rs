//! Shared data model for the filing compiler and readiness analyzer.
//!
//! Everything here is constructed fresh per compile/analyze call from
//! externally supplied data; nothing is persisted or cached between calls.

pub mod ast;
pub mod case;
pub mod issue;
pub mod settings;

pub use ast::{extract_plain_text, flatten, Block, DocNode};
pub use case::{Authority, Exhibit, Intake, Party};
pub use issue::{stable_id, Issue, ReadinessReport, Severity};
pub use settings::{
    FilingSettings, FilingSettingsPatch, NotaryKind, NotarySettings, ProposedOrderSettings,
    ServiceMethod, ServiceRecipient, ServiceSettings,
};
