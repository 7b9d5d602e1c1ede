//! Proposed order: a judge-signature page appended after the motion.

use crate::fonts::Font;
use crate::layout::{double_leading, single_leading, Layout, BODY_SIZE};
use filing_types::ProposedOrderSettings;

const JUDGE_RULE_WIDTH: f64 = 252.0;

/// Always starts on a fresh page; the title is the first text drawn on it.
pub fn render_proposed_order(layout: &mut Layout, order: &ProposedOrderSettings) {
    let size = BODY_SIZE;
    let leading = single_leading(size);
    let left = layout.geometry.margin_left;

    layout.new_page();

    let title = order
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_uppercase)
        .unwrap_or_else(|| "PROPOSED ORDER".to_string());
    for line in crate::layout::wrap(&title, Font::TimesBold, size, layout.geometry.content_width()) {
        layout.draw_centered(&line, Font::TimesBold, size, double_leading(size));
    }
    layout.space(double_leading(size));

    layout.draw_text(left, "IT IS SO ORDERED.", Font::TimesRoman, size, leading);
    layout.space(double_leading(size) * 1.5);

    layout.draw_rule(left, left + JUDGE_RULE_WIDTH, leading);
    let judge = order
        .judge_name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("[JUDGE NAME]");
    layout.draw_text(left, judge, Font::TimesRoman, size, leading);
    if let Some(judge_title) = order
        .judge_title
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        layout.draw_text(left, judge_title, Font::TimesRoman, size, leading);
    }
    let date = order
        .date
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("________________");
    layout.draw_text(left, &format!("Dated: {}", date), Font::TimesRoman, size, leading);
}
