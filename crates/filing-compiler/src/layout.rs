//! Measured text layout and pagination.
//!
//! The engine places typed blocks onto fixed-size pages. All cursor movement
//! goes through [`advance`], a pure transition over an explicit
//! [`LayoutCursor`], so the page-break rule is testable in isolation: before
//! any line is drawn, if the line would cross the bottom margin the cursor
//! moves to a fresh page. The check runs per line, not per block, so a
//! paragraph may legally split across a page boundary.

use thiserror::Error;

use crate::fonts::{measure_width, Font};
use crate::image::SignatureImage;
use filing_types::Block;

/// Body text is double-spaced to match court formatting conventions.
pub const BODY_SIZE: f64 = 12.0;
/// Half-inch first-line paragraph indent.
pub const FIRST_LINE_INDENT: f64 = 36.0;
/// Hanging indent for list item continuation lines.
pub const LIST_INDENT: f64 = 24.0;

pub fn double_leading(size: f64) -> f64 {
    size * 2.0
}

pub fn single_leading(size: f64) -> f64 {
    size * 1.2
}

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("invalid page geometry: {0}")]
    InvalidGeometry(String),
}

#[derive(Debug, Clone, Copy)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub margin_right: f64,
}

impl PageGeometry {
    pub fn new(width: f64, height: f64, margin: f64) -> Result<Self, LayoutError> {
        if width <= 0.0 || height <= 0.0 {
            return Err(LayoutError::InvalidGeometry(format!(
                "page size must be positive, got {}x{}",
                width, height
            )));
        }
        if margin < 0.0 || margin * 2.0 >= width || margin * 2.0 >= height {
            return Err(LayoutError::InvalidGeometry(format!(
                "margin {} leaves no content area on a {}x{} page",
                margin, width, height
            )));
        }
        Ok(Self {
            width,
            height,
            margin_top: margin,
            margin_bottom: margin,
            margin_left: margin,
            margin_right: margin,
        })
    }

    /// US Letter, one-inch margins.
    pub fn letter() -> Self {
        Self {
            width: 612.0,
            height: 792.0,
            margin_top: 72.0,
            margin_bottom: 72.0,
            margin_left: 72.0,
            margin_right: 72.0,
        }
    }

    pub fn content_width(&self) -> f64 {
        self.width - self.margin_left - self.margin_right
    }
}

/// Position within the document being laid out: page index plus baseline y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCursor {
    pub page: usize,
    pub y: f64,
}

/// Pure page-break transition. Returns the cursor after consuming `leading`
/// of vertical space, and whether a page break occurred.
pub fn advance(cursor: LayoutCursor, leading: f64, geometry: &PageGeometry) -> (LayoutCursor, bool) {
    if cursor.y - leading < geometry.margin_bottom {
        (
            LayoutCursor {
                page: cursor.page + 1,
                y: geometry.height - geometry.margin_top - leading,
            },
            true,
        )
    } else {
        (
            LayoutCursor {
                page: cursor.page,
                y: cursor.y - leading,
            },
            false,
        )
    }
}

#[derive(Debug, Clone)]
pub struct TextOp {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub font: Font,
    pub size: f64,
}

/// A horizontal rule (signature line, caption divider).
#[derive(Debug, Clone)]
pub struct RuleOp {
    pub x1: f64,
    pub x2: f64,
    pub y: f64,
}

#[derive(Debug, Clone)]
pub struct ImageOp {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub image: SignatureImage,
}

#[derive(Debug, Clone, Default)]
pub struct PageOps {
    pub texts: Vec<TextOp>,
    pub rules: Vec<RuleOp>,
    pub images: Vec<ImageOp>,
}

/// Per-compile layout state: finished pages plus the cursor. Allocated fresh
/// for every compile call; never shared across requests.
#[derive(Debug)]
pub struct Layout {
    pub geometry: PageGeometry,
    pub pages: Vec<PageOps>,
    cursor: LayoutCursor,
}

impl Layout {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: vec![PageOps::default()],
            cursor: LayoutCursor {
                page: 0,
                y: geometry.height - geometry.margin_top,
            },
        }
    }

    pub fn cursor(&self) -> LayoutCursor {
        self.cursor
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn step(&mut self, leading: f64) {
        let (next, _broke) = advance(self.cursor, leading, &self.geometry);
        self.cursor = next;
        while self.pages.len() <= self.cursor.page {
            self.pages.push(PageOps::default());
        }
    }

    fn page_mut(&mut self) -> &mut PageOps {
        let idx = self.cursor.page;
        &mut self.pages[idx]
    }

    /// Begin a fresh page unconditionally (used by the proposed order).
    pub fn new_page(&mut self) {
        self.cursor = LayoutCursor {
            page: self.cursor.page + 1,
            y: self.geometry.height - self.geometry.margin_top,
        };
        while self.pages.len() <= self.cursor.page {
            self.pages.push(PageOps::default());
        }
    }

    /// Consume vertical space without drawing. The next drawn line still
    /// performs its own page-break check.
    pub fn space(&mut self, amount: f64) {
        self.cursor.y -= amount;
    }

    pub fn draw_text(&mut self, x: f64, text: &str, font: Font, size: f64, leading: f64) {
        self.step(leading);
        let y = self.cursor.y;
        self.page_mut().texts.push(TextOp {
            x,
            y,
            text: text.to_string(),
            font,
            size,
        });
    }

    pub fn draw_centered(&mut self, text: &str, font: Font, size: f64, leading: f64) {
        let x = self.geometry.margin_left
            + (self.geometry.content_width() - measure_width(text, font, size)) / 2.0;
        self.draw_text(x.max(self.geometry.margin_left), text, font, size, leading);
    }

    pub fn draw_rule(&mut self, x1: f64, x2: f64, leading: f64) {
        self.step(leading);
        let y = self.cursor.y;
        self.page_mut().rules.push(RuleOp { x1, x2, y });
    }

    /// Wrap and draw a run of text. `first_indent` applies to the first
    /// wrapped line only, `rest_indent` to continuation lines; both are
    /// relative to the left margin. Embedded newlines force line breaks.
    pub fn draw_wrapped(
        &mut self,
        text: &str,
        font: Font,
        size: f64,
        leading: f64,
        first_indent: f64,
        rest_indent: f64,
    ) {
        let left = self.geometry.margin_left;
        let content = self.geometry.content_width();
        let mut first = true;
        for segment in text.split('\n') {
            let (head_avail, head_indent) = if first {
                (content - first_indent, first_indent)
            } else {
                (content - rest_indent, rest_indent)
            };
            let lines = wrap_indented(segment, font, size, head_avail, content - rest_indent);
            for (i, line) in lines.iter().enumerate() {
                let indent = if i == 0 { head_indent } else { rest_indent };
                self.draw_text(left + indent, line, font, size, leading);
            }
            first = false;
        }
    }

    /// Place an image scaled to fit within `max_w` × `max_h`, preserving
    /// aspect ratio, at the left margin.
    pub fn place_image(&mut self, image: SignatureImage, max_w: f64, max_h: f64) {
        let (w, h) = fit_box(image.width as f64, image.height as f64, max_w, max_h);
        self.step(h);
        let (x, y) = (self.geometry.margin_left, self.cursor.y);
        self.page_mut().images.push(ImageOp {
            x,
            y,
            width: w,
            height: h,
            image,
        });
    }

    /// Lay out flattened body blocks in order.
    pub fn draw_blocks(&mut self, blocks: &[Block]) {
        let size = BODY_SIZE;
        let leading = double_leading(size);
        for block in blocks {
            match block {
                Block::Heading { text, .. } => {
                    self.space(leading / 2.0);
                    self.draw_wrapped(text, Font::TimesBold, size, leading, 0.0, 0.0);
                    self.space(leading / 2.0);
                }
                Block::Paragraph { text } => {
                    self.draw_wrapped(text, Font::TimesRoman, size, leading, FIRST_LINE_INDENT, 0.0);
                }
                Block::ListItem {
                    ordered,
                    index,
                    text,
                } => {
                    let marker = if *ordered {
                        format!("{}.", index)
                    } else {
                        "\u{2022}".to_string()
                    };
                    // Marker sits at the left margin on the item's first line;
                    // the item text hangs at LIST_INDENT.
                    let marker_cursor = self.cursor;
                    self.draw_wrapped(text, Font::TimesRoman, size, leading, LIST_INDENT, LIST_INDENT);
                    let marker_y = {
                        let (after_first, _) = advance(marker_cursor, leading, &self.geometry);
                        after_first
                    };
                    self.pages[marker_y.page].texts.push(TextOp {
                        x: self.geometry.margin_left,
                        y: marker_y.y,
                        text: marker,
                        font: Font::TimesRoman,
                        size,
                    });
                }
            }
        }
    }
}

/// Greedy word wrap against a fixed width.
pub fn wrap(text: &str, font: Font, size: f64, available: f64) -> Vec<String> {
    wrap_indented(text, font, size, available, available)
}

/// Greedy word wrap where the first line may have a different available
/// width. A single word wider than the line is placed alone on its own line
/// rather than looping.
pub fn wrap_indented(
    text: &str,
    font: Font,
    size: f64,
    first_available: f64,
    rest_available: f64,
) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    let avail = |lines: &[String]| {
        if lines.is_empty() {
            first_available
        } else {
            rest_available
        }
    };

    for word in text.split_whitespace() {
        if current.is_empty() {
            if measure_width(word, font, size) > avail(&lines) {
                // Unbreakable token wider than the line: own line, unmodified.
                lines.push(word.to_string());
            } else {
                current.push_str(word);
            }
            continue;
        }
        let candidate = format!("{} {}", current, word);
        if measure_width(&candidate, font, size) <= avail(&lines) {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            if measure_width(word, font, size) > avail(&lines) {
                lines.push(word.to_string());
            } else {
                current.push_str(word);
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    // An empty run still occupies one (blank) line.
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Scale `(w, h)` down to fit within `(max_w, max_h)`, preserving aspect
/// ratio; never scales up.
pub fn fit_box(w: f64, h: f64, max_w: f64, max_h: f64) -> (f64, f64) {
    if w <= 0.0 || h <= 0.0 {
        return (max_w, max_h);
    }
    let scale = (max_w / w).min(max_h / h).min(1.0);
    (w * scale, h * scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn total_lines(layout: &Layout) -> usize {
        layout.pages.iter().map(|p| p.texts.len()).sum()
    }

    #[test]
    fn wrapped_lines_fit_available_width() {
        let text = "The plaintiff respectfully moves this Court for an order compelling \
                    the defendant to produce the documents requested on June 1.";
        let available = 200.0;
        for line in wrap(text, Font::TimesRoman, 12.0, available) {
            assert!(measure_width(&line, Font::TimesRoman, 12.0) <= available);
        }
    }

    #[test]
    fn oversized_token_gets_its_own_line() {
        let text = "short Supercalifragilisticexpialidociousandthensomemoreletters short";
        let lines = wrap(text, Font::TimesRoman, 12.0, 90.0);
        assert!(lines
            .iter()
            .any(|l| l == "Supercalifragilisticexpialidociousandthensomemoreletters"));
        // Terminates and keeps the neighbors.
        assert_eq!(lines.first().map(String::as_str), Some("short"));
        assert_eq!(lines.last().map(String::as_str), Some("short"));
    }

    #[test]
    fn empty_text_occupies_one_blank_line() {
        assert_eq!(wrap("", Font::TimesRoman, 12.0, 100.0), vec![String::new()]);
    }

    #[test]
    fn advance_breaks_page_at_bottom_margin() {
        let geom = PageGeometry::letter();
        let cursor = LayoutCursor { page: 0, y: 80.0 };
        let (next, broke) = advance(cursor, 24.0, &geom);
        assert!(broke);
        assert_eq!(next.page, 1);
        assert!((next.y - (792.0 - 72.0 - 24.0)).abs() < 1e-9);
    }

    #[test]
    fn advance_stays_on_page_with_room() {
        let geom = PageGeometry::letter();
        let cursor = LayoutCursor { page: 0, y: 700.0 };
        let (next, broke) = advance(cursor, 24.0, &geom);
        assert!(!broke);
        assert_eq!(next.page, 0);
        assert!((next.y - 676.0).abs() < 1e-9);
    }

    #[test]
    fn paragraph_splits_across_page_boundary() {
        let geom = PageGeometry::letter();
        let mut layout = Layout::new(geom);
        let long = "word ".repeat(2000);
        layout.draw_wrapped(
            &long,
            Font::TimesRoman,
            BODY_SIZE,
            double_leading(BODY_SIZE),
            FIRST_LINE_INDENT,
            0.0,
        );
        assert!(layout.page_count() > 1);
        // Every page carries part of the paragraph.
        assert!(layout.pages.iter().all(|p| !p.texts.is_empty()));
    }

    #[test]
    fn pagination_drops_no_lines() {
        // The paged layout must draw exactly as many lines as an infinitely
        // tall single page would.
        let blocks: Vec<filing_types::Block> = (0..40)
            .map(|i| filing_types::Block::Paragraph {
                text: format!("Paragraph {} with enough words to wrap at least once on a letter page, the quick brown fox jumps over the lazy dog.", i),
            })
            .collect();

        let mut paged = Layout::new(PageGeometry::letter());
        paged.draw_blocks(&blocks);

        let tall = PageGeometry {
            height: 1_000_000.0,
            ..PageGeometry::letter()
        };
        let mut single = Layout::new(tall);
        single.draw_blocks(&blocks);

        assert_eq!(single.page_count(), 1);
        assert_eq!(total_lines(&paged), total_lines(&single));
    }

    #[test]
    fn list_marker_shares_first_line_y() {
        let mut layout = Layout::new(PageGeometry::letter());
        layout.draw_blocks(&[filing_types::Block::ListItem {
            ordered: true,
            index: 2,
            text: "produce all documents".into(),
        }]);
        let page = &layout.pages[0];
        assert_eq!(page.texts.len(), 2);
        let item = &page.texts[0];
        let marker = &page.texts[1];
        assert_eq!(marker.text, "2.");
        assert!((marker.y - item.y).abs() < 1e-9);
        assert!((marker.x - 72.0).abs() < 1e-9);
        assert!((item.x - (72.0 + LIST_INDENT)).abs() < 1e-9);
    }

    #[test]
    fn non_positive_page_size_is_rejected() {
        assert!(PageGeometry::new(0.0, 792.0, 72.0).is_err());
        assert!(PageGeometry::new(612.0, -1.0, 72.0).is_err());
        assert!(PageGeometry::new(612.0, 792.0, 400.0).is_err());
        assert!(PageGeometry::new(612.0, 792.0, 72.0).is_ok());
    }

    #[test]
    fn fit_box_preserves_aspect_and_never_upscales() {
        let (w, h) = fit_box(400.0, 100.0, 180.0, 60.0);
        assert!((w - 180.0).abs() < 1e-9);
        assert!((h - 45.0).abs() < 1e-9);

        let (w, h) = fit_box(90.0, 30.0, 180.0, 60.0);
        assert_eq!((w, h), (90.0, 30.0));
    }

    proptest! {
        #[test]
        fn wrap_never_loses_words(words in proptest::collection::vec("[a-zA-Z]{1,12}", 0..60)) {
            let text = words.join(" ");
            let lines = wrap(&text, Font::TimesRoman, 12.0, 150.0);
            let rejoined: Vec<&str> = lines.iter().flat_map(|l| l.split_whitespace()).collect();
            prop_assert_eq!(rejoined, words.iter().map(String::as_str).collect::<Vec<_>>());
        }

        #[test]
        fn wrap_lines_fit_unless_single_token(words in proptest::collection::vec("[a-zA-Z]{1,30}", 1..40)) {
            let text = words.join(" ");
            let available = 120.0;
            for line in wrap(&text, Font::TimesRoman, 12.0, available) {
                let fits = measure_width(&line, Font::TimesRoman, 12.0) <= available;
                let single_token = !line.trim().contains(' ');
                prop_assert!(fits || single_token);
            }
        }
    }
}
