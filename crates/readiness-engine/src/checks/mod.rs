//! Individual readiness detectors. Each returns its issues in a fixed order
//! and never fails on document content.

pub mod caption;
pub mod citations;
pub mod exhibits;
pub mod placeholders;
pub mod sections;
