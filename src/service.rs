//! Request-handling boundary shared by the web front-end and the CLI.
//!
//! Inputs arrive here as loosely shaped strings; this layer cleans them up,
//! hands them to [`SmsClient`], and shapes the answers for presentation.

use std::path::Path;
use std::time::{Duration, Instant};

use tracing::{info, instrument};

use crate::client::{SmsClient, SmsError};
use crate::domain::{
    BalanceInfo, BulkId, DeliveryReport, DeliveryReportQuery, MessageId, ReportLimit, SendSms,
    SentMessage, ValidationError,
};
use crate::extract::extract_phone_numbers_from_bytes;

/// File extensions accepted by [`SmsService::upload_and_parse_phone_file`].
pub const ALLOWED_PHONE_FILE_EXTENSIONS: [&str; 2] = ["txt", "csv"];

/// Outcome of [`SmsService::send_sms`].
#[derive(Debug, Clone, PartialEq)]
pub struct SendSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub bulk_id: Option<String>,
    pub duration: Duration,
    pub messages: Vec<SentMessage>,
}

/// Thin orchestration layer over [`SmsClient`].
#[derive(Debug, Clone)]
pub struct SmsService {
    client: SmsClient,
}

impl SmsService {
    pub fn new(client: SmsClient) -> Self {
        Self { client }
    }

    /// Send `text` to `recipients` and time the call.
    ///
    /// Recipients are trimmed and blank entries dropped before validation.
    /// An empty sender override counts as no override.
    #[instrument(skip_all, fields(recipients = recipients.len()))]
    pub async fn send_sms(
        &self,
        recipients: Vec<String>,
        text: &str,
        sender: Option<&str>,
    ) -> Result<SendSummary, SmsError> {
        let recipients: Vec<String> = recipients
            .iter()
            .map(|raw| raw.trim())
            .filter(|raw| !raw.is_empty())
            .map(str::to_owned)
            .collect();
        if recipients.is_empty() {
            return Err(ValidationError::NoPhoneNumbers.into());
        }
        let sender = sender
            .map(str::trim)
            .filter(|sender| !sender.is_empty())
            .map(str::to_owned);

        let request = SendSms::build(recipients, text, sender)?;

        let started = Instant::now();
        let result = self.client.send_sms(request).await?;
        let duration = started.elapsed();

        let successful = result.accepted_count();
        let total = result.messages.len();
        info!(
            total,
            successful,
            bulk_id = result.bulk_id.as_deref().unwrap_or_default(),
            elapsed_ms = duration.as_millis() as u64,
            "SMS batch sent"
        );

        Ok(SendSummary {
            total,
            successful,
            failed: total - successful,
            bulk_id: result.bulk_id,
            duration,
            messages: result.messages,
        })
    }

    /// Parse an uploaded `.txt` or `.csv` file into candidate phone numbers.
    ///
    /// The numbers themselves are not validated here.
    pub fn upload_and_parse_phone_file(
        &self,
        content: &[u8],
        filename: &str,
    ) -> Result<Vec<String>, ValidationError> {
        parse_phone_file(content, filename)
    }

    pub async fn check_balance(&self) -> Result<BalanceInfo, SmsError> {
        self.client.balance().await
    }

    /// Fetch delivery reports, optionally narrowed to one bulk or message.
    ///
    /// Blank ids count as absent; `limit` defaults to 50.
    pub async fn fetch_reports(
        &self,
        bulk_id: Option<&str>,
        message_id: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Vec<DeliveryReport>, SmsError> {
        let query = DeliveryReportQuery {
            bulk_id: non_blank(bulk_id).map(BulkId::new).transpose()?,
            message_id: non_blank(message_id).map(MessageId::new).transpose()?,
            limit: limit.map(ReportLimit::new).transpose()?.unwrap_or_default(),
        };
        self.client.delivery_reports(&query).await
    }
}

/// Validate the file name of an upload and extract the numbers it contains.
pub fn parse_phone_file(content: &[u8], filename: &str) -> Result<Vec<String>, ValidationError> {
    if !is_allowed_phone_file(filename) {
        return Err(ValidationError::UnsupportedFileType {
            filename: filename.to_owned(),
        });
    }

    let numbers = extract_phone_numbers_from_bytes(content);
    if numbers.is_empty() {
        return Err(ValidationError::NoPhoneNumbersInFile);
    }
    info!(count = numbers.len(), filename, "phone numbers extracted from file");
    Ok(numbers)
}

/// Whether `filename` ends in `.txt` or `.csv`, ignoring case.
pub fn is_allowed_phone_file(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ALLOWED_PHONE_FILE_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowed_extensions_ignore_case() {
        assert!(is_allowed_phone_file("test.txt"));
        assert!(is_allowed_phone_file("test.csv"));
        assert!(is_allowed_phone_file("test.TXT"));
        assert!(is_allowed_phone_file("test.CSV"));
        assert!(is_allowed_phone_file("archive.2026.csv"));

        assert!(!is_allowed_phone_file("test.exe"));
        assert!(!is_allowed_phone_file("test.jpg"));
        assert!(!is_allowed_phone_file("test"));
        assert!(!is_allowed_phone_file(".txt"));
        assert!(!is_allowed_phone_file(""));
    }

    #[test]
    fn parse_phone_file_rejects_other_extensions() {
        let err = parse_phone_file(b"+1234567890\n", "numbers.exe").unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnsupportedFileType {
                filename: "numbers.exe".to_owned()
            }
        );
    }

    #[test]
    fn parse_phone_file_extracts_numbers() {
        let numbers =
            parse_phone_file(b"+1234567890,John Doe\n+1987654321,Jane Smith\n", "phones.csv")
                .unwrap();
        assert_eq!(numbers, ["+1234567890", "+1987654321"]);
    }

    #[test]
    fn parse_phone_file_without_numbers_fails() {
        let err = parse_phone_file(b"# only a comment\n\n", "phones.txt").unwrap_err();
        assert_eq!(err, ValidationError::NoPhoneNumbersInFile);

        let err = parse_phone_file(&[0xff, 0xfe], "phones.txt").unwrap_err();
        assert_eq!(err, ValidationError::NoPhoneNumbersInFile);
    }

    #[test]
    fn non_blank_trims_and_drops_empty() {
        assert_eq!(non_blank(Some(" id ")), Some("id"));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }
}
