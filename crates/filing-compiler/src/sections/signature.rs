//! Signature block: date line, submission line, drawn signature (image or
//! blank rule), signer name and title.

use crate::fonts::Font;
use crate::image;
use crate::layout::{single_leading, Layout, BODY_SIZE};

/// Box the drawn signature image must fit inside, in points.
const MAX_SIGNATURE_WIDTH: f64 = 180.0;
const MAX_SIGNATURE_HEIGHT: f64 = 60.0;
/// Length of the blank signature rule fallback.
const SIGNATURE_RULE_WIDTH: f64 = 216.0;

#[derive(Debug, Clone, Default)]
pub struct SignatureBlock {
    pub dated: Option<String>,
    pub signer_name: Option<String>,
    pub signer_title: Option<String>,
    /// Raw stored image bytes, if the user has a drawn signature on file.
    pub image: Option<Vec<u8>>,
}

pub fn render_signature(layout: &mut Layout, block: &SignatureBlock) {
    let size = BODY_SIZE;
    let leading = single_leading(size);
    let left = layout.geometry.margin_left;

    layout.space(leading);
    let dated = block.dated.as_deref().unwrap_or("________________");
    layout.draw_text(left, &format!("Dated: {}", dated), Font::TimesRoman, size, leading);
    layout.space(leading / 2.0);
    layout.draw_text(left, "Respectfully submitted,", Font::TimesRoman, size, leading);
    layout.space(leading);

    // Undecodable bytes degrade to the blank rule; never an error.
    match block.image.as_deref().and_then(image::decode) {
        Some(img) => layout.place_image(img, MAX_SIGNATURE_WIDTH, MAX_SIGNATURE_HEIGHT),
        None => layout.draw_rule(left, left + SIGNATURE_RULE_WIDTH, leading),
    }

    let name = block.signer_name.as_deref().unwrap_or("[SIGNER NAME]");
    layout.draw_text(left, name, Font::TimesRoman, size, leading);
    if let Some(title) = block
        .signer_title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
    {
        layout.draw_text(left, title, Font::TimesRoman, size, leading);
    }
}
