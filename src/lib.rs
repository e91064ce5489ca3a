//! Typed client, JSON front-end and CLI helpers for a bulk-SMS HTTP API.
//!
//! The crate is layered: a domain layer of validated types, a transport layer
//! for the provider's wire format, a client issuing one HTTP request per call,
//! and a [`service`] boundary shared by the [`web`] routes and the CLI.
//!
//! ```rust,no_run
//! use bulksms::{Auth, SenderId, SmsClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), bulksms::SmsError> {
//!     let client = SmsClient::builder(Auth::api_key("...")?, SenderId::new("InfoSMS")?)
//!         .base_url("https://xxxxx.api.infobip.com")
//!         .build()?;
//!     let result = client
//!         .send_message(["+254700000000"], "Hello from Rust", None)
//!         .await?;
//!     println!("{}", bulksms::format::format_send_summary(&result));
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod domain;
pub mod extract;
pub mod format;
pub mod service;
mod transport;
pub mod web;

pub use client::{Auth, ErrorKind, SmsClient, SmsClientBuilder, SmsError};
pub use config::Config;
pub use domain::{
    BalanceInfo, BulkId, DeliveryReport, DeliveryReportQuery, MessageId, MessageStatus,
    MessageText, Recipient, ReportLimit, SendResult, SendSms, SenderId, SentMessage, StatusGroup,
    ValidationError, is_valid_phone_number,
};
pub use service::{SendSummary, SmsService};
