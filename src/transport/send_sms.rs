use serde::{Deserialize, Serialize};

use super::TransportError;
use super::status::{StatusJson, status_or_unknown};
use crate::domain::{SendResult, SendSms, SenderId, SentMessage, VALIDITY_PERIOD_MINUTES};

const NOTIFY_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Serialize)]
struct SendSmsJsonRequest<'a> {
    messages: [MessageJson<'a>; 1],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MessageJson<'a> {
    from: &'a str,
    destinations: Vec<DestinationJson<'a>>,
    text: &'a str,
    notify_url: &'a str,
    notify_content_type: &'a str,
    callback_data: &'a str,
    validity_period: u32,
}

#[derive(Debug, Serialize)]
struct DestinationJson<'a> {
    to: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendSmsJsonResponse {
    #[serde(default)]
    bulk_id: Option<String>,
    #[serde(default)]
    messages: Vec<SentMessageJson>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SentMessageJson {
    #[serde(default)]
    to: Option<String>,
    #[serde(default)]
    message_id: Option<String>,
    #[serde(default)]
    sms_count: Option<u32>,
    #[serde(default)]
    status: Option<StatusJson>,
}

/// Encode the `sms/2/text/advanced` body. The request's sender override wins
/// over `default_sender`.
pub fn encode_send_sms_body(
    request: &SendSms,
    default_sender: &SenderId,
) -> Result<String, TransportError> {
    let from = request.sender().unwrap_or(default_sender).as_str();
    let body = SendSmsJsonRequest {
        messages: [MessageJson {
            from,
            destinations: request
                .recipients()
                .iter()
                .map(|recipient| DestinationJson {
                    to: recipient.raw(),
                })
                .collect(),
            text: request.text().trimmed(),
            notify_url: "",
            notify_content_type: NOTIFY_CONTENT_TYPE,
            callback_data: "",
            validity_period: VALIDITY_PERIOD_MINUTES,
        }],
    };
    Ok(serde_json::to_string(&body)?)
}

pub fn decode_send_sms_json_response(json: &str) -> Result<SendResult, TransportError> {
    let parsed: SendSmsJsonResponse = serde_json::from_str(json)?;

    let messages = parsed
        .messages
        .into_iter()
        .map(|message| SentMessage {
            to: message.to,
            message_id: message.message_id,
            sms_count: message.sms_count,
            status: status_or_unknown(message.status),
        })
        .collect();

    Ok(SendResult {
        bulk_id: parsed.bulk_id,
        messages,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use crate::domain::{SendSms, StatusGroup};

    use super::*;

    fn sender() -> SenderId {
        SenderId::new("DefaultSender").unwrap()
    }

    #[test]
    fn encode_matches_provider_payload() {
        let request =
            SendSms::build(["+254700000000", "+1234567890"], "  hello world ", None).unwrap();
        let body = encode_send_sms_body(&request, &sender()).unwrap();

        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            value,
            json!({
                "messages": [{
                    "from": "DefaultSender",
                    "destinations": [{"to": "+254700000000"}, {"to": "+1234567890"}],
                    "text": "hello world",
                    "notifyUrl": "",
                    "notifyContentType": "application/json",
                    "callbackData": "",
                    "validityPeriod": 720
                }]
            })
        );
    }

    #[test]
    fn encode_keeps_field_order() {
        let request = SendSms::build(["+1234567890"], "hi", None).unwrap();
        let body = encode_send_sms_body(&request, &sender()).unwrap();
        assert_eq!(
            body,
            r#"{"messages":[{"from":"DefaultSender","destinations":[{"to":"+1234567890"}],"text":"hi","notifyUrl":"","notifyContentType":"application/json","callbackData":"","validityPeriod":720}]}"#
        );
    }

    #[test]
    fn encode_prefers_sender_override() {
        let request = SendSms::build(["+1234567890"], "hi", Some("Brand".to_owned())).unwrap();
        let body = encode_send_sms_body(&request, &sender()).unwrap();
        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["messages"][0]["from"], "Brand");
    }

    #[test]
    fn decode_maps_messages_and_bulk_id() {
        let json = r#"
        {
          "bulkId": "bulk-42",
          "messages": [
            {
              "to": "+254700000000",
              "messageId": "m-1",
              "smsCount": 1,
              "status": {
                "groupId": 1,
                "groupName": "PENDING",
                "id": 26,
                "name": "PENDING_ACCEPTED",
                "description": "Message sent to next instance"
              }
            },
            {
              "to": "+1234567890",
              "messageId": "m-2",
              "status": {
                "groupId": 5,
                "groupName": "REJECTED",
                "description": "Destination not registered"
              }
            }
          ]
        }
        "#;

        let result = decode_send_sms_json_response(json).unwrap();
        assert_eq!(result.bulk_id.as_deref(), Some("bulk-42"));
        assert_eq!(result.messages.len(), 2);

        let first = &result.messages[0];
        assert_eq!(first.to.as_deref(), Some("+254700000000"));
        assert_eq!(first.message_id.as_deref(), Some("m-1"));
        assert_eq!(first.sms_count, Some(1));
        assert_eq!(first.status.group, StatusGroup::Pending);
        assert_eq!(first.status.name.as_deref(), Some("PENDING_ACCEPTED"));

        let second = &result.messages[1];
        assert_eq!(second.status.group, StatusGroup::Rejected);
        assert_eq!(second.sms_count, None);
        assert_eq!(result.accepted_count(), 1);
    }

    #[test]
    fn decode_tolerates_missing_fields() {
        let result = decode_send_sms_json_response(r#"{"messages":[{}]}"#).unwrap();
        assert_eq!(result.bulk_id, None);
        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].status.group, StatusGroup::Unknown);

        let empty = decode_send_sms_json_response("{}").unwrap();
        assert!(empty.messages.is_empty());
    }

    #[test]
    fn decode_rejects_invalid_json() {
        assert!(decode_send_sms_json_response("{ not json }").is_err());
    }
}
