use serde::Serialize;

use crate::domain::value::StatusGroup;

/// Delivery state attached to a sent message or a delivery report.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageStatus {
    #[serde(rename = "groupName")]
    pub group: StatusGroup,
    pub group_id: Option<i32>,
    pub id: Option<i32>,
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Outcome of a send call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendResult {
    pub bulk_id: Option<String>,
    pub messages: Vec<SentMessage>,
}

impl SendResult {
    /// Messages the provider accepted for delivery.
    pub fn accepted_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|message| message.status.group.is_accepted())
            .count()
    }

    /// Messages the provider did not accept.
    pub fn rejected_count(&self) -> usize {
        self.messages.len() - self.accepted_count()
    }
}

/// Per-recipient entry of a [`SendResult`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SentMessage {
    pub to: Option<String>,
    pub message_id: Option<String>,
    pub sms_count: Option<u32>,
    pub status: MessageStatus,
}

/// Provider record describing the delivery of a previously sent message.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryReport {
    pub bulk_id: Option<String>,
    pub message_id: Option<String>,
    pub to: Option<String>,
    pub sent_at: Option<String>,
    pub done_at: Option<String>,
    pub sms_count: Option<u32>,
    pub status: MessageStatus,
    pub price: Option<Price>,
    pub error: Option<ReportError>,
}

/// Charge for a delivered message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub price_per_message: Option<String>,
    pub currency: Option<String>,
}

/// Delivery error reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportError {
    pub group_id: Option<i32>,
    pub group_name: Option<String>,
    pub id: Option<i32>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub permanent: Option<bool>,
}

/// Account balance. `amount` keeps the decimal exactly as the provider sent it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceInfo {
    pub currency: String,
    pub amount: String,
}
