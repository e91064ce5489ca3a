//! Transport layer: wire-format details (JSON bodies, query strings).

mod balance;
mod money;
mod reports;
mod send_sms;
mod status;

pub use balance::decode_balance_json_response;
pub use reports::{decode_reports_json_response, encode_reports_query};
pub use send_sms::{decode_send_sms_json_response, encode_send_sms_body};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
