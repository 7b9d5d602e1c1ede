//! Case caption: court name, party block, case number, document title.

use crate::fonts::Font;
use crate::layout::{double_leading, single_leading, Layout, TextOp, BODY_SIZE};
use filing_types::{Intake, Party};

/// Court-name precedence, kept as one ordered accessor list so the fallback
/// rule lives in a single place.
type CourtSource = fn(&Intake) -> Option<String>;

const COURT_SOURCES: &[CourtSource] = &[
    |i| i.venue.clone(),
    |i| i.jurisdiction.clone(),
    |i| i.forum.as_ref().map(|f| format!("{} FORUM", f)),
];

/// First non-empty of venue, jurisdiction, "<forum> FORUM", else "COURT".
pub fn court_name(intake: &Intake) -> String {
    COURT_SOURCES
        .iter()
        .filter_map(|source| source(intake))
        .map(|s| s.trim().to_string())
        .find(|s| !s.is_empty())
        .unwrap_or_else(|| "COURT".to_string())
        .to_uppercase()
}

/// Joined names for one side of the caption, or the bracketed placeholder;
/// the document must render even with incomplete case data.
pub fn side_names(parties: &[Party], plaintiff_side: bool) -> (String, String) {
    let names: Vec<&str> = parties
        .iter()
        .filter(|p| {
            if plaintiff_side {
                p.is_plaintiff_side()
            } else {
                p.is_defendant_side()
            }
        })
        .map(|p| p.name.as_str())
        .collect();

    let label_base = if plaintiff_side { "Plaintiff" } else { "Defendant" };
    if names.is_empty() {
        let placeholder = if plaintiff_side {
            "[PLAINTIFF]"
        } else {
            "[DEFENDANT]"
        };
        (placeholder.to_string(), label_base.to_string())
    } else if names.len() == 1 {
        (names.join(", "), label_base.to_string())
    } else {
        (names.join(", "), format!("{}s", label_base))
    }
}

pub fn render_caption(layout: &mut Layout, intake: &Intake, parties: &[Party]) {
    let size = BODY_SIZE;
    let leading = single_leading(size);
    let left = layout.geometry.margin_left;
    let column = layout.geometry.content_width() * 0.55;

    // Centered court name, wrapped if long.
    for line in crate::layout::wrap(
        &court_name(intake),
        Font::TimesBold,
        size,
        layout.geometry.content_width(),
    ) {
        layout.draw_centered(&line, Font::TimesBold, size, leading);
    }
    layout.space(leading);

    let (plaintiffs, plaintiff_label) = side_names(parties, true);
    let (defendants, defendant_label) = side_names(parties, false);

    // Left column party block. The case number is pinned to the first line's
    // baseline in the right column.
    let first_line_cursor = layout.cursor();
    layout.draw_wrapped(&format!("{},", plaintiffs), Font::TimesRoman, size, leading, 0.0, 0.0);
    layout.draw_text(left + 108.0, &format!("{},", plaintiff_label), Font::TimesRoman, size, leading);
    layout.draw_text(left, "v.", Font::TimesRoman, size, leading);
    layout.draw_wrapped(&format!("{},", defendants), Font::TimesRoman, size, leading, 0.0, 0.0);
    layout.draw_text(left + 108.0, &format!("{}.", defendant_label), Font::TimesRoman, size, leading);

    let case_number = intake
        .case_number
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|n| format!("Case No. {}", n))
        .unwrap_or_else(|| "Case No. [CASE NUMBER]".to_string());
    let (case_cursor, _) = crate::layout::advance(first_line_cursor, leading, &layout.geometry);
    layout.pages[case_cursor.page].texts.push(TextOp {
        x: left + column,
        y: case_cursor.y,
        text: case_number,
        font: Font::TimesRoman,
        size,
    });

    // Divider under the caption block.
    layout.draw_rule(left, layout.geometry.width - layout.geometry.margin_right, leading);
    layout.space(leading);
}

/// Centered, upper-cased document title below the caption.
pub fn render_title(layout: &mut Layout, title: &str) {
    let size = BODY_SIZE;
    let upper = title.trim().to_uppercase();
    let text = if upper.is_empty() {
        "[UNTITLED FILING]".to_string()
    } else {
        upper
    };
    for line in crate::layout::wrap(&text, Font::TimesBold, size, layout.geometry.content_width()) {
        layout.draw_centered(&line, Font::TimesBold, size, double_leading(size));
    }
    layout.space(double_leading(size) / 2.0);
}
