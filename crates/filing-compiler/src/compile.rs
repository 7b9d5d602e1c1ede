//! Compile pipeline: normalized content in, finished PDF bytes out.
//!
//! Section order is fixed: caption, title, body, signature block, then the
//! optional certificate of service and notary block, then the proposed order
//! on its own page, and finally page-number footers once the page count is
//! known. Bates stamping is delegated to an external collaborator after the
//! base document is serialized.

use tracing::debug;

use crate::error::{CompileError, StampError};
use crate::layout::{Layout, PageGeometry};
use crate::pdf;
use crate::sections::signature::{render_signature, SignatureBlock};
use crate::sections::{caption, footer};
use crate::sections::{notary::render_notary, order::render_proposed_order, service::render_service};
use filing_types::{Block, FilingSettings, Intake, Party};

/// Everything a single compile call needs. Owned data, no shared state.
#[derive(Debug, Default)]
pub struct CompileInput {
    pub draft_id: String,
    pub title: String,
    /// Flattened editor blocks, when the draft has a structured document.
    pub blocks: Option<Vec<Block>>,
    /// Plain-text fallback for drafts without a structured document.
    pub plain_text: Option<String>,
    pub intake: Intake,
    pub parties: Vec<Party>,
    pub filing: FilingSettings,
    pub signature: SignatureBlock,
}

impl CompileInput {
    /// Body blocks in render order. Structured blocks win; otherwise plain
    /// text splits into paragraphs on blank lines; an empty draft still
    /// yields one empty paragraph.
    fn body_blocks(&self) -> Vec<Block> {
        if let Some(blocks) = &self.blocks {
            if !blocks.is_empty() {
                return blocks.clone();
            }
        }
        let paragraphs: Vec<Block> = self
            .plain_text
            .as_deref()
            .unwrap_or("")
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| Block::Paragraph {
                text: p.replace('\n', " "),
            })
            .collect();
        if paragraphs.is_empty() {
            vec![Block::Paragraph {
                text: String::new(),
            }]
        } else {
            paragraphs
        }
    }
}

/// Bates numbering parameters. Validated as a unit: either all three query
/// parameters are present and well formed, or stamping is skipped entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatesConfig {
    pub prefix: String,
    pub start: u32,
    pub width: u32,
}

impl BatesConfig {
    /// Build from optional query parameters, all-or-nothing. `Ok(None)`
    /// means no parameter was supplied and stamping is skipped.
    pub fn from_query(
        prefix: Option<String>,
        start: Option<u32>,
        width: Option<u32>,
    ) -> Result<Option<Self>, String> {
        match (prefix, start, width) {
            (None, None, None) => Ok(None),
            (Some(prefix), Some(start), Some(width)) => {
                if prefix.trim().is_empty() {
                    return Err("bates prefix must not be blank".to_string());
                }
                if start == 0 {
                    return Err("bates start must be at least 1".to_string());
                }
                if width == 0 {
                    return Err("bates width must be at least 1".to_string());
                }
                Ok(Some(Self {
                    prefix: prefix.trim().to_string(),
                    start,
                    width,
                }))
            }
            _ => Err("bates stamping requires prefix, batesStart, and batesWidth together"
                .to_string()),
        }
    }

    /// Formatted label for the given zero-based page index.
    pub fn label(&self, page_index: usize) -> String {
        format!(
            "{}{:0width$}",
            self.prefix,
            self.start as usize + page_index,
            width = self.width as usize
        )
    }
}

/// External collaborator that stamps Bates labels onto a finished PDF.
pub trait BatesStamper: Send + Sync {
    fn stamp(&self, pdf: &[u8], config: &BatesConfig) -> Result<Vec<u8>, StampError>;
}

pub fn compile(input: &CompileInput) -> Result<Vec<u8>, CompileError> {
    compile_with_geometry(input, PageGeometry::letter())
}

pub fn compile_with_geometry(
    input: &CompileInput,
    geometry: PageGeometry,
) -> Result<Vec<u8>, CompileError> {
    let mut layout = Layout::new(geometry);

    caption::render_caption(&mut layout, &input.intake, &input.parties);
    caption::render_title(&mut layout, &input.title);
    layout.draw_blocks(&input.body_blocks());
    render_signature(&mut layout, &input.signature);

    if let Some(svc) = input.filing.service.as_ref().filter(|s| s.enabled) {
        render_service(&mut layout, svc);
    }
    if let Some(n) = input.filing.notary.as_ref().filter(|n| n.enabled) {
        render_notary(&mut layout, n);
    }
    if let Some(o) = input.filing.proposed_order.as_ref().filter(|o| o.enabled) {
        render_proposed_order(&mut layout, o);
    }

    footer::render_footers(&mut layout);

    debug!(
        draft_id = %input.draft_id,
        pages = layout.page_count(),
        "compiled filing"
    );
    pdf::serialize(&layout)
}

/// Compile, then hand the bytes to the stamper when Bates numbering was
/// requested.
pub fn compile_and_stamp(
    input: &CompileInput,
    stamper: &dyn BatesStamper,
    bates: Option<&BatesConfig>,
) -> Result<Vec<u8>, CompileError> {
    let bytes = compile(input)?;
    match bates {
        Some(config) => stamper
            .stamp(&bytes, config)
            .map_err(|e| CompileError::Stamping(e.to_string())),
        None => Ok(bytes),
    }
}
