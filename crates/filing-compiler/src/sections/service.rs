//! Certificate of service.

use crate::fonts::Font;
use crate::layout::{double_leading, single_leading, Layout, LIST_INDENT, BODY_SIZE};
use filing_types::{ServiceRecipient, ServiceSettings};

pub fn render_service(layout: &mut Layout, service: &ServiceSettings) {
    let size = BODY_SIZE;
    let leading = single_leading(size);

    layout.space(double_leading(size));
    layout.draw_centered("CERTIFICATE OF SERVICE", Font::TimesBold, size, leading);
    layout.space(leading);

    let date = service
        .date
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or("[DATE]");
    layout.draw_wrapped(
        &format!(
            "I HEREBY CERTIFY that a true and correct copy of the foregoing \
             was served on {} upon the following:",
            date
        ),
        Font::TimesRoman,
        size,
        leading,
        0.0,
        0.0,
    );
    layout.space(leading / 2.0);

    if service.recipients.is_empty() {
        layout.draw_text(
            layout.geometry.margin_left,
            "[NO SERVICE RECIPIENTS CONFIGURED]",
            Font::TimesRoman,
            size,
            leading,
        );
        return;
    }

    for recipient in &service.recipients {
        let line = recipient_line(recipient, service);
        layout.draw_wrapped(&line, Font::TimesRoman, size, leading, 0.0, LIST_INDENT);
    }
}

fn recipient_line(recipient: &ServiceRecipient, service: &ServiceSettings) -> String {
    let mut parts: Vec<String> = Vec::new();
    parts.push(
        recipient
            .name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("[RECIPIENT]")
            .to_string(),
    );
    if let Some(address) = recipient
        .address
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        parts.push(address.to_string());
    }
    // Per-recipient method wins; the section default backs it up.
    let method = recipient.method.or(service.default_method);
    parts.push(match method {
        Some(m) => format!("via {}", m.label()),
        None => "via [SERVICE METHOD]".to_string(),
    });
    if let Some(details) = recipient
        .details
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        parts.push(details.to_string());
    }
    parts.join(", ")
}
