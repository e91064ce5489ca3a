use axum::{
    Json,
    extract::{
        Multipart, Query, State,
        multipart::MultipartRejection,
        rejection::{JsonRejection, QueryRejection},
    },
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::ApiError;
use crate::domain::{BalanceInfo, DeliveryReport, SentMessage};
use crate::service::SmsService;

const FILE_FIELD: &str = "file";

/// `phone_numbers` as sent by clients: a single string or a list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        }
    }
}

/// Body of `POST /api/send-sms`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendSmsBody {
    #[serde(default)]
    pub phone_numbers: Option<OneOrMany>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub sender: Option<String>,
}

/// Query string of `GET /api/reports`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportsParams {
    pub bulk_id: Option<String>,
    pub message_id: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub(super) struct SendSmsResponse {
    success: bool,
    total_sent: usize,
    successful: usize,
    failed: usize,
    bulk_id: Option<String>,
    /// Seconds spent waiting for the provider.
    duration: f64,
    messages: Vec<SentMessage>,
}

#[derive(Debug, Serialize)]
pub(super) struct UploadResponse {
    success: bool,
    phone_numbers: Vec<String>,
    count: usize,
}

#[derive(Debug, Serialize)]
pub(super) struct BalanceResponse {
    success: bool,
    balance: BalanceInfo,
}

#[derive(Debug, Serialize)]
pub(super) struct ReportsResponse {
    success: bool,
    reports: Vec<DeliveryReport>,
}

#[instrument(skip_all)]
pub(super) async fn send_sms(
    State(service): State<SmsService>,
    payload: Result<Json<SendSmsBody>, JsonRejection>,
) -> Result<Json<SendSmsResponse>, ApiError> {
    let Json(body) = payload?;
    let summary = service
        .send_sms(
            body.phone_numbers.map(OneOrMany::into_vec).unwrap_or_default(),
            body.message.as_deref().unwrap_or_default(),
            body.sender.as_deref(),
        )
        .await?;

    Ok(Json(SendSmsResponse {
        success: true,
        total_sent: summary.total,
        successful: summary.successful,
        failed: summary.failed,
        bulk_id: summary.bulk_id,
        duration: summary.duration.as_secs_f64(),
        messages: summary.messages,
    }))
}

#[instrument(skip_all)]
pub(super) async fn upload_phones(
    State(service): State<SmsService>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut multipart = multipart?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_owned();
        if filename.is_empty() {
            return Err(ApiError::bad_request("no file selected"));
        }
        let content = field.bytes().await?;
        debug!(filename = %filename, bytes = content.len(), "phone file received");

        let phone_numbers = service.upload_and_parse_phone_file(&content, &filename)?;
        return Ok(Json(UploadResponse {
            success: true,
            count: phone_numbers.len(),
            phone_numbers,
        }));
    }

    Err(ApiError::bad_request("no file provided"))
}

#[instrument(skip_all)]
pub(super) async fn balance(
    State(service): State<SmsService>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let balance = service.check_balance().await?;
    Ok(Json(BalanceResponse {
        success: true,
        balance,
    }))
}

#[instrument(skip_all)]
pub(super) async fn reports(
    State(service): State<SmsService>,
    params: Result<Query<ReportsParams>, QueryRejection>,
) -> Result<Json<ReportsResponse>, ApiError> {
    let Query(params) = params?;
    let reports = service
        .fetch_reports(
            params.bulk_id.as_deref(),
            params.message_id.as_deref(),
            params.limit,
        )
        .await?;
    Ok(Json(ReportsResponse {
        success: true,
        reports,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_numbers_accept_string_or_list() {
        let body: SendSmsBody =
            serde_json::from_str(r#"{"phone_numbers": "+1234567890", "message": "hi"}"#).unwrap();
        assert_eq!(body.phone_numbers.unwrap().into_vec(), ["+1234567890"]);

        let body: SendSmsBody = serde_json::from_str(
            r#"{"phone_numbers": ["+1234567890", "+1987654321"], "message": "hi", "sender": "Me"}"#,
        )
        .unwrap();
        assert_eq!(body.sender.as_deref(), Some("Me"));
        assert_eq!(
            body.phone_numbers.unwrap().into_vec(),
            ["+1234567890", "+1987654321"]
        );
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let body: SendSmsBody = serde_json::from_str("{}").unwrap();
        assert!(body.phone_numbers.is_none());
        assert!(body.message.is_none());
        assert!(body.sender.is_none());
    }

    #[test]
    fn null_fields_are_treated_as_missing() {
        let body: SendSmsBody =
            serde_json::from_str(r#"{"phone_numbers": null, "message": null, "sender": null}"#)
                .unwrap();
        assert!(body.phone_numbers.is_none());
        assert!(body.message.is_none());
        assert!(body.sender.is_none());
    }
}
