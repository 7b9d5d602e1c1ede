//! Notary block: jurat or acknowledgment boilerplate plus the notary
//! signature line.

use crate::fonts::Font;
use crate::layout::{double_leading, single_leading, Layout, BODY_SIZE};
use filing_types::{NotaryKind, NotarySettings};

const NOTARY_RULE_WIDTH: f64 = 216.0;

pub fn render_notary(layout: &mut Layout, notary: &NotarySettings) {
    let size = BODY_SIZE;
    let leading = single_leading(size);
    let left = layout.geometry.margin_left;

    let state = field(&notary.state, "[STATE]");
    let county = field(&notary.county, "[COUNTY]");
    let date = field(&notary.date, "[DATE]");
    let name = field(&notary.notary_name, "the undersigned");

    layout.space(double_leading(size));
    layout.draw_text(left, &format!("STATE OF {}", state.to_uppercase()), Font::TimesRoman, size, leading);
    layout.draw_text(left, &format!("COUNTY OF {}", county.to_uppercase()), Font::TimesRoman, size, leading);
    layout.space(leading);

    let body = match notary.kind.unwrap_or(NotaryKind::Jurat) {
        NotaryKind::Jurat => format!(
            "Sworn to (or affirmed) and subscribed before me on {}, by {}, \
             who is personally known to me or has produced identification.",
            date, name
        ),
        NotaryKind::Acknowledgment => format!(
            "The foregoing instrument was acknowledged before me on {}, by {}, \
             who acknowledged executing the same voluntarily.",
            date, name
        ),
    };
    layout.draw_wrapped(&body, Font::TimesRoman, size, leading, 0.0, 0.0);
    layout.space(leading * 1.5);

    layout.draw_rule(left, left + NOTARY_RULE_WIDTH, leading);
    layout.draw_text(left, "Notary Public", Font::TimesRoman, size, leading);
    if let Some(expires) = notary
        .commission_expires
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        layout.draw_text(
            left,
            &format!("My commission expires: {}", expires),
            Font::TimesRoman,
            size,
            leading,
        );
    }
}

fn field<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(fallback)
}
