//! Structural blocks of a court filing.
//!
//! Each renderer is a pure function of (data, layout state) → layout
//! mutations; none performs I/O. The signature image bytes are read by the
//! caller and handed in.

pub mod caption;
pub mod footer;
pub mod notary;
pub mod order;
pub mod service;
pub mod signature;
