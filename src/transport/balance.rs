use serde::Deserialize;

use super::TransportError;
use super::money::TransportMoney;
use crate::domain::BalanceInfo;

#[derive(Debug, Clone, Deserialize)]
struct BalanceJsonResponse {
    #[serde(alias = "amount")]
    balance: TransportMoney,
    #[serde(default)]
    currency: String,
}

pub fn decode_balance_json_response(json: &str) -> Result<BalanceInfo, TransportError> {
    let parsed: BalanceJsonResponse = serde_json::from_str(json)?;
    Ok(BalanceInfo {
        currency: parsed.currency,
        amount: parsed.balance.into_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_balance_keeps_decimal_token() {
        let parsed =
            decode_balance_json_response(r#"{"balance": 47.10, "currency": "EUR"}"#).unwrap();
        assert_eq!(parsed.amount, "47.10");
        assert_eq!(parsed.currency, "EUR");
    }

    #[test]
    fn decode_balance_accepts_amount_alias_and_string_value() {
        let parsed =
            decode_balance_json_response(r#"{"amount": "12.00", "currency": "USD"}"#).unwrap();
        assert_eq!(parsed.amount, "12.00");
        assert_eq!(parsed.currency, "USD");
    }

    #[test]
    fn decode_balance_requires_amount() {
        assert!(decode_balance_json_response(r#"{"currency": "EUR"}"#).is_err());
    }
}
