//! Page-number footer, stamped after all pages exist.

use crate::fonts::{measure_width, Font};
use crate::layout::{Layout, TextOp};

const FOOTER_SIZE: f64 = 10.0;
/// Baseline of the footer, above the band reserved for Bates stamps.
const FOOTER_BASELINE: f64 = 40.0;

/// Stamp "Page i of N" centered near the bottom of every page.
pub fn render_footers(layout: &mut Layout) {
    let total = layout.page_count();
    let page_width = layout.geometry.width;
    for (index, page) in layout.pages.iter_mut().enumerate() {
        let text = format!("Page {} of {}", index + 1, total);
        let x = (page_width - measure_width(&text, Font::TimesRoman, FOOTER_SIZE)) / 2.0;
        page.texts.push(TextOp {
            x,
            y: FOOTER_BASELINE,
            text,
            font: Font::TimesRoman,
            size: FOOTER_SIZE,
        });
    }
}
