//! Court-filing document compiler.
//!
//! Takes a draft's normalized content plus case metadata and filing settings,
//! lays the document out onto letter pages with measured Times text, and
//! serializes the result as PDF bytes. Bates stamping is delegated to an
//! injected collaborator so the compiler itself stays pure.

pub mod compile;
pub mod error;
pub mod fonts;
pub mod image;
pub mod layout;
pub mod pdf;
pub mod sections;

pub use compile::{compile, compile_and_stamp, compile_with_geometry, BatesConfig, BatesStamper, CompileInput};
pub use error::{CompileError, StampError};
pub use layout::{Layout, LayoutCursor, PageGeometry};
pub use sections::signature::SignatureBlock;
