use serde::Deserialize;

use super::TransportError;
use super::money::TransportMoney;
use super::status::{StatusJson, status_or_unknown};
use crate::domain::{
    BulkId, DeliveryReport, DeliveryReportQuery, MessageId, Price, ReportError, ReportLimit,
};

#[derive(Debug, Clone, Deserialize)]
struct ReportsJsonResponse {
    #[serde(default)]
    results: Vec<ReportJson>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReportJson {
    #[serde(default)]
    bulk_id: Option<String>,
    #[serde(default)]
    message_id: Option<String>,
    #[serde(default)]
    to: Option<String>,
    #[serde(default)]
    sent_at: Option<String>,
    #[serde(default)]
    done_at: Option<String>,
    #[serde(default)]
    sms_count: Option<u32>,
    #[serde(default)]
    price: Option<PriceJson>,
    #[serde(default)]
    status: Option<StatusJson>,
    #[serde(default)]
    error: Option<ErrorJson>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceJson {
    #[serde(default)]
    price_per_message: Option<TransportMoney>,
    #[serde(default)]
    currency: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorJson {
    #[serde(default)]
    group_id: Option<i32>,
    #[serde(default)]
    group_name: Option<String>,
    #[serde(default)]
    id: Option<i32>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    permanent: Option<bool>,
}

/// Query string for `sms/1/reports`: `limit` first, then the optional filters.
pub fn encode_reports_query(query: &DeliveryReportQuery) -> Vec<(String, String)> {
    let mut params = vec![(
        ReportLimit::FIELD.to_owned(),
        query.limit.value().to_string(),
    )];
    if let Some(bulk_id) = query.bulk_id.as_ref() {
        params.push((BulkId::FIELD.to_owned(), bulk_id.as_str().to_owned()));
    }
    if let Some(message_id) = query.message_id.as_ref() {
        params.push((MessageId::FIELD.to_owned(), message_id.as_str().to_owned()));
    }
    params
}

pub fn decode_reports_json_response(json: &str) -> Result<Vec<DeliveryReport>, TransportError> {
    let parsed: ReportsJsonResponse = serde_json::from_str(json)?;

    Ok(parsed
        .results
        .into_iter()
        .map(|report| DeliveryReport {
            bulk_id: report.bulk_id,
            message_id: report.message_id,
            to: report.to,
            sent_at: report.sent_at,
            done_at: report.done_at,
            sms_count: report.sms_count,
            status: status_or_unknown(report.status),
            price: report.price.map(|price| Price {
                price_per_message: price.price_per_message.map(TransportMoney::into_string),
                currency: price.currency,
            }),
            error: report.error.map(|error| ReportError {
                group_id: error.group_id,
                group_name: error.group_name,
                id: error.id,
                name: error.name,
                description: error.description,
                permanent: error.permanent,
            }),
        })
        .collect())
}
