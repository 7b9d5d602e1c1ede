//! Requirements for the enabled optional sections: certificate of service,
//! notary block, proposed order. Disabled sections are never inspected.

use filing_types::{FilingSettings, Issue};

pub fn check(filing: &FilingSettings) -> Vec<Issue> {
    let mut issues = Vec::new();

    if let Some(service) = filing.service.as_ref().filter(|s| s.enabled) {
        if service.recipients.is_empty() {
            issues.push(
                Issue::error(
                    "service:recipients_missing",
                    "Certificate of service has no recipients",
                )
                .with_hint("Add every party or counsel who must be served."),
            );
        } else if service
            .recipients
            .iter()
            .any(|r| r.method.or(service.default_method).is_none())
        {
            issues.push(
                Issue::error(
                    "service:method_missing",
                    "A service recipient has no delivery method",
                )
                .with_hint("Set a method on the recipient or a default for the section."),
            );
        }
        let has_date = service
            .date
            .as_deref()
            .map(str::trim)
            .is_some_and(|d| !d.is_empty());
        if !has_date {
            issues.push(Issue::warning(
                "service:date_missing",
                "Certificate of service has no service date",
            ));
        }
    }

    if let Some(notary) = filing.notary.as_ref().filter(|n| n.enabled) {
        if notary.kind.is_none() {
            issues.push(Issue::error(
                "notary:kind_missing",
                "Notary block type not chosen (jurat or acknowledgment)",
            ));
        }
        let missing_location = [&notary.state, &notary.county]
            .iter()
            .any(|v| !v.as_deref().map(str::trim).is_some_and(|s| !s.is_empty()));
        if missing_location {
            issues.push(Issue::warning(
                "notary:location_missing",
                "Notary block is missing its state or county",
            ));
        }
    }

    if let Some(order) = filing.proposed_order.as_ref().filter(|o| o.enabled) {
        let has_title = order
            .title
            .as_deref()
            .map(str::trim)
            .is_some_and(|t| !t.is_empty());
        if !has_title {
            issues.push(Issue::warning(
                "order:title_missing",
                "Proposed order has no title",
            ));
        }
    }

    issues
}
