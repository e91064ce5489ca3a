use crate::domain::validation::ValidationError;
use crate::domain::value::{BulkId, MessageId, MessageText, Recipient, ReportLimit, SenderId};

pub const SEND_SMS_MAX_RECIPIENTS: usize = 100;

/// How long the provider keeps trying to deliver a message, in minutes (12 hours).
pub const VALIDITY_PERIOD_MINUTES: u32 = 720;

/// One outbound message addressed to one or more recipients.
#[derive(Debug, Clone)]
pub struct SendSms {
    recipients: Vec<Recipient>,
    text: MessageText,
    sender: Option<SenderId>,
}

impl SendSms {
    /// Assemble a request from already validated parts.
    pub fn new(
        recipients: Vec<Recipient>,
        text: MessageText,
        sender: Option<SenderId>,
    ) -> Result<Self, ValidationError> {
        check_recipient_count(recipients.len())?;
        Ok(Self {
            recipients,
            text,
            sender,
        })
    }

    /// Validate raw inputs and assemble a request.
    ///
    /// Checks run in a fixed order: text, recipient count, each phone number
    /// (the first offender is reported), then the sender override.
    pub fn build<I, S>(
        recipients: I,
        text: impl Into<String>,
        sender: Option<String>,
    ) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let text = MessageText::new(text)?;
        let raw: Vec<String> = recipients.into_iter().map(Into::into).collect();
        check_recipient_count(raw.len())?;
        let recipients = raw
            .into_iter()
            .map(Recipient::new)
            .collect::<Result<Vec<_>, _>>()?;
        let sender = sender.map(SenderId::new).transpose()?;

        Ok(Self {
            recipients,
            text,
            sender,
        })
    }

    pub fn recipients(&self) -> &[Recipient] {
        &self.recipients
    }

    pub fn text(&self) -> &MessageText {
        &self.text
    }

    pub fn sender(&self) -> Option<&SenderId> {
        self.sender.as_ref()
    }
}

fn check_recipient_count(actual: usize) -> Result<(), ValidationError> {
    if actual == 0 {
        return Err(ValidationError::Empty {
            field: "recipients",
        });
    }
    if actual > SEND_SMS_MAX_RECIPIENTS {
        return Err(ValidationError::TooManyRecipients {
            max: SEND_SMS_MAX_RECIPIENTS,
            actual,
        });
    }
    Ok(())
}

/// Filter for the delivery reports endpoint.
#[derive(Debug, Clone, Default)]
pub struct DeliveryReportQuery {
    pub bulk_id: Option<BulkId>,
    pub message_id: Option<MessageId>,
    pub limit: ReportLimit,
}

impl DeliveryReportQuery {
    /// Reports for every message of one send call.
    pub fn for_bulk(bulk_id: BulkId) -> Self {
        Self {
            bulk_id: Some(bulk_id),
            ..Default::default()
        }
    }

    /// Reports for a single message.
    pub fn for_message(message_id: MessageId) -> Self {
        Self {
            message_id: Some(message_id),
            ..Default::default()
        }
    }

    pub fn with_limit(mut self, limit: ReportLimit) -> Self {
        self.limit = limit;
        self
    }
}
