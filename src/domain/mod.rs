//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{DeliveryReportQuery, SEND_SMS_MAX_RECIPIENTS, SendSms, VALIDITY_PERIOD_MINUTES};
pub use response::{
    BalanceInfo, DeliveryReport, MessageStatus, Price, ReportError, SendResult, SentMessage,
};
pub use validation::ValidationError;
pub use value::{
    ApiKey, BulkId, MessageId, MessageText, PHONE_MAX_DIGITS, PHONE_MIN_DIGITS, Recipient,
    ReportLimit, SenderId, StatusGroup, is_valid_phone_number,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(count: usize) -> Vec<String> {
        (0..count).map(|idx| format!("+1234567{idx:04}")).collect()
    }

    #[test]
    fn build_accepts_single_recipient() {
        let request = SendSms::build(["+254700000000"], "hello", None).unwrap();
        assert_eq!(request.recipients().len(), 1);
        assert_eq!(request.recipients()[0].raw(), "+254700000000");
        assert_eq!(request.text().trimmed(), "hello");
        assert!(request.sender().is_none());
    }

    #[test]
    fn build_rejects_empty_text_first() {
        let err = SendSms::build(["not-a-number"], "   ", None).unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "text" });
        assert_eq!(err.to_string(), "text cannot be empty");
    }

    #[test]
    fn build_rejects_empty_recipient_list() {
        let err = SendSms::build(Vec::<String>::new(), "hi", None).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Empty {
                field: "recipients"
            }
        );
    }

    #[test]
    fn send_sms_recipient_limit_is_enforced() {
        assert!(SendSms::build(numbers(SEND_SMS_MAX_RECIPIENTS), "hi", None).is_ok());

        let err = SendSms::build(numbers(SEND_SMS_MAX_RECIPIENTS + 1), "hi", None).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::TooManyRecipients {
                max: 100,
                actual: 101
            }
        ));
        assert!(err.to_string().starts_with("too many recipients"));
    }

    #[test]
    fn build_reports_first_invalid_number() {
        let err = SendSms::build(["+1234567890", "123", "abc"], "hi", None).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidPhoneNumber {
                input: "123".to_owned()
            }
        );
    }

    #[test]
    fn build_keeps_order_and_duplicates() {
        let request =
            SendSms::build(["+1987654321", "+1234567890", "+1987654321"], "hi", None).unwrap();
        let raw: Vec<&str> = request.recipients().iter().map(Recipient::raw).collect();
        assert_eq!(raw, ["+1987654321", "+1234567890", "+1987654321"]);
    }

    #[test]
    fn build_validates_sender_override() {
        let request = SendSms::build(["+1234567890"], "hi", Some(" Brand ".to_owned())).unwrap();
        assert_eq!(request.sender().map(SenderId::as_str), Some("Brand"));

        let err = SendSms::build(["+1234567890"], "hi", Some("  ".to_owned())).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Empty {
                field: SenderId::FIELD
            }
        );
    }

    #[test]
    fn new_enforces_count_on_typed_parts() {
        let recipient = Recipient::new("+1234567890").unwrap();
        let text = MessageText::new("hi").unwrap();
        let err = SendSms::new(
            vec![recipient; SEND_SMS_MAX_RECIPIENTS + 1],
            text.clone(),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::TooManyRecipients { .. }));
        assert!(SendSms::new(Vec::new(), text, None).is_err());
    }

    #[test]
    fn report_query_defaults_to_fifty() {
        let query = DeliveryReportQuery::default();
        assert_eq!(query.limit.value(), 50);
        assert!(query.bulk_id.is_none());
        assert!(query.message_id.is_none());

        let query = DeliveryReportQuery::for_bulk(BulkId::new("b-1").unwrap())
            .with_limit(ReportLimit::new(10).unwrap());
        assert_eq!(query.limit.value(), 10);
        assert_eq!(query.bulk_id.as_ref().map(BulkId::as_str), Some("b-1"));
    }

    #[test]
    fn send_result_counts_pending_as_accepted() {
        let pending = SentMessage {
            status: MessageStatus {
                group: StatusGroup::Pending,
                ..Default::default()
            },
            ..Default::default()
        };
        let rejected = SentMessage {
            status: MessageStatus {
                group: StatusGroup::Rejected,
                ..Default::default()
            },
            ..Default::default()
        };
        let result = SendResult {
            bulk_id: None,
            messages: vec![pending, rejected, SentMessage::default()],
        };
        assert_eq!(result.accepted_count(), 1);
        assert_eq!(result.rejected_count(), 2);
    }
}
