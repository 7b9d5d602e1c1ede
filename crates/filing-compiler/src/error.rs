use thiserror::Error;

use crate::layout::LayoutError;

#[derive(Error, Debug)]
pub enum CompileError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("failed to serialize PDF: {0}")]
    Pdf(String),

    #[error("bates stamping failed: {0}")]
    Stamping(String),
}

/// Failure reported by the external Bates-stamping collaborator.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct StampError(pub String);
