//! Human-readable reports for send results, delivery reports and balances.
//!
//! Every function here is pure: the same input always renders the same text.

use std::fmt;

use crate::domain::{BalanceInfo, DeliveryReport, SendResult, SentMessage, StatusGroup};

const UNKNOWN: &str = "unknown";
const RULE: &str = "==================================================";

/// Render a send result as a multi-line report.
///
/// Messages whose status group is `PENDING` count as successful, everything
/// else as failed. With `verbose` each message also shows its id and segment
/// count.
pub fn format_send_result(result: &SendResult, verbose: bool) -> String {
    SendReport { result, verbose }.to_string()
}

/// One-line summary of a send result, plus the bulk id when the provider
/// returned one.
pub fn format_send_summary(result: &SendResult) -> String {
    let mut out = format!(
        "SMS sent to {}/{} recipients",
        result.accepted_count(),
        result.messages.len()
    );
    if let Some(bulk_id) = result.bulk_id.as_deref() {
        out.push_str("\nBulk ID: ");
        out.push_str(bulk_id);
    }
    out
}

/// List at most `max` delivery reports, one per line.
pub fn format_delivery_reports(reports: &[DeliveryReport], max: usize) -> String {
    if reports.is_empty() {
        return "No delivery reports found.".to_owned();
    }
    ReportList { reports, max }.to_string()
}

pub fn format_balance(balance: &BalanceInfo) -> String {
    format!(
        "Account balance: {} {}",
        balance.amount,
        or_unknown(Some(balance.currency.as_str()).filter(|c| !c.is_empty()))
    )
}

struct SendReport<'a> {
    result: &'a SendResult,
    verbose: bool,
}

impl fmt::Display for SendReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages = &self.result.messages;

        writeln!(f, "SMS Batch Summary:")?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "Total messages: {}", messages.len())?;

        for (idx, message) in messages.iter().enumerate() {
            self.write_message(f, idx + 1, message)?;
        }

        writeln!(f)?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "Successful: {}", self.result.accepted_count())?;
        writeln!(f, "Failed: {}", self.result.rejected_count())?;
        if let Some(bulk_id) = self.result.bulk_id.as_deref() {
            writeln!(f, "Bulk ID: {bulk_id}")?;
        }
        Ok(())
    }
}

impl SendReport<'_> {
    fn write_message(
        &self,
        f: &mut fmt::Formatter<'_>,
        number: usize,
        message: &SentMessage,
    ) -> fmt::Result {
        let outcome = if message.status.group.is_accepted() {
            "OK"
        } else {
            "FAILED"
        };

        writeln!(f)?;
        writeln!(f, "[{outcome}] Message {number}:")?;
        writeln!(f, "  Phone: {}", or_unknown(message.to.as_deref()))?;
        writeln!(f, "  Status: {}", group_label(message.status.group))?;
        writeln!(
            f,
            "  Description: {}",
            or_unknown(message.status.description.as_deref())
        )?;
        if self.verbose {
            writeln!(f, "  Message ID: {}", or_unknown(message.message_id.as_deref()))?;
            match message.sms_count {
                Some(count) => writeln!(f, "  SMS Count: {count}")?,
                None => writeln!(f, "  SMS Count: {UNKNOWN}")?,
            }
        }
        Ok(())
    }
}

struct ReportList<'a> {
    reports: &'a [DeliveryReport],
    max: usize,
}

impl fmt::Display for ReportList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Recent delivery reports:")?;
        for report in self.reports.iter().take(self.max) {
            let status = report
                .status
                .name
                .as_deref()
                .unwrap_or_else(|| group_label(report.status.group));
            write!(
                f,
                "\n  {}: {} at {}",
                or_unknown(report.to.as_deref()),
                status,
                or_unknown(report.sent_at.as_deref())
            )?;
        }
        Ok(())
    }
}

fn group_label(group: StatusGroup) -> &'static str {
    match group {
        StatusGroup::Unknown => UNKNOWN,
        known => known.as_str(),
    }
}

fn or_unknown(value: Option<&str>) -> &str {
    value.unwrap_or(UNKNOWN)
}

#[cfg(test)]
mod tests {
    use crate::domain::MessageStatus;

    use super::*;

    fn message(to: &str, group: StatusGroup, description: &str) -> SentMessage {
        SentMessage {
            to: Some(to.to_owned()),
            message_id: Some(format!("id-{to}")),
            sms_count: Some(1),
            status: MessageStatus {
                group,
                description: Some(description.to_owned()),
                ..Default::default()
            },
        }
    }

    fn mixed_result() -> SendResult {
        SendResult {
            bulk_id: Some("bulk-7".to_owned()),
            messages: vec![
                message("+1234567890", StatusGroup::Pending, "Message sent to next instance"),
                message("+1987654321", StatusGroup::Rejected, "Destination not registered"),
            ],
        }
    }

    #[test]
    fn counts_pending_as_successful() {
        let text = format_send_result(&mixed_result(), false);
        assert!(text.contains("Total messages: 2"));
        assert!(text.contains("Successful: 1"));
        assert!(text.contains("Failed: 1"));
        assert!(text.contains("Bulk ID: bulk-7"));
        assert!(text.contains("[OK] Message 1:"));
        assert!(text.contains("[FAILED] Message 2:"));
        assert!(text.contains("  Phone: +1987654321"));
        assert!(text.contains("  Status: REJECTED"));
        assert!(text.contains("  Description: Destination not registered"));
        assert!(!text.contains("Message ID"));
    }

    #[test]
    fn verbose_adds_ids_and_segment_counts() {
        let text = format_send_result(&mixed_result(), true);
        assert!(text.contains("  Message ID: id-+1234567890"));
        assert!(text.contains("  SMS Count: 1"));
    }

    #[test]
    fn missing_fields_render_as_unknown() {
        let result = SendResult {
            bulk_id: None,
            messages: vec![SentMessage::default()],
        };
        let text = format_send_result(&result, true);
        assert!(text.contains("  Phone: unknown"));
        assert!(text.contains("  Status: unknown"));
        assert!(text.contains("  Description: unknown"));
        assert!(text.contains("  Message ID: unknown"));
        assert!(text.contains("  SMS Count: unknown"));
        assert!(text.contains("Failed: 1"));
        assert!(!text.contains("Bulk ID"));
    }

    #[test]
    fn formatting_is_deterministic() {
        let result = mixed_result();
        assert_eq!(
            format_send_result(&result, true),
            format_send_result(&result, true)
        );
    }

    #[test]
    fn summary_shows_ratio_and_bulk_id() {
        assert_eq!(
            format_send_summary(&mixed_result()),
            "SMS sent to 1/2 recipients\nBulk ID: bulk-7"
        );
        assert_eq!(
            format_send_summary(&SendResult::default()),
            "SMS sent to 0/0 recipients"
        );
    }

    #[test]
    fn report_list_is_truncated() {
        let reports: Vec<DeliveryReport> = (0..3)
            .map(|idx| DeliveryReport {
                to: Some(format!("+123456789{idx}")),
                sent_at: Some("2026-10-01T10:00:00.000+0000".to_owned()),
                status: MessageStatus {
                    group: StatusGroup::Delivered,
                    name: Some("DELIVERED_TO_HANDSET".to_owned()),
                    ..Default::default()
                },
                ..Default::default()
            })
            .collect();

        let text = format_delivery_reports(&reports, 2);
        assert_eq!(
            text,
            "Recent delivery reports:\n  \
             +1234567890: DELIVERED_TO_HANDSET at 2026-10-01T10:00:00.000+0000\n  \
             +1234567891: DELIVERED_TO_HANDSET at 2026-10-01T10:00:00.000+0000"
        );
        assert_eq!(format_delivery_reports(&[], 10), "No delivery reports found.");
    }

    #[test]
    fn balance_line() {
        let balance = BalanceInfo {
            currency: "EUR".to_owned(),
            amount: "47.79".to_owned(),
        };
        assert_eq!(format_balance(&balance), "Account balance: 47.79 EUR");
    }
}
